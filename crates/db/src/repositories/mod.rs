//! Repository layer.
//!
//! Each repository is a zero-sized struct implementing [`EntityRepo`]. The
//! trait supplies the shared `list`/`find_by_id`/`delete` queries; each
//! repository writes its own `create` and `update` SQL.

pub mod attorney_repo;
pub mod blog_repo;
pub mod carousel_image_repo;
pub mod entity;
pub mod offer_repo;
pub mod promotional_offer_repo;
pub mod testimonial_repo;
pub mod work_repo;

pub use attorney_repo::AttorneyRepo;
pub use blog_repo::BlogRepo;
pub use carousel_image_repo::CarouselImageRepo;
pub use entity::EntityRepo;
pub use offer_repo::OfferRepo;
pub use promotional_offer_repo::PromotionalOfferRepo;
pub use testimonial_repo::TestimonialRepo;
pub use work_repo::WorkRepo;
