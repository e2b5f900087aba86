//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO (every client field required)
//! - A `Deserialize` + `Validate` update DTO (all `Option` fields) for patches
//!
//! DTOs reject unknown fields, so a typo in a request body is a 400 rather
//! than a silently ignored value.

pub mod attorney;
pub mod blog;
pub mod carousel_image;
pub mod offer;
pub mod promotional_offer;
pub mod testimonial;
pub mod work;
