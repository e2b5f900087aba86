pub mod entity;
pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use counsel_core::media::MAX_VIDEO_BYTES;
use counsel_db::repositories::{
    AttorneyRepo, BlogRepo, CarouselImageRepo, OfferRepo, PromotionalOfferRepo, TestimonialRepo,
    WorkRepo,
};

use crate::handlers;
use crate::state::AppState;

/// Room for multipart boundaries and part headers on top of the largest file.
const MULTIPART_OVERHEAD: u64 = 1024 * 1024;

/// Build the route tree.
///
/// Route hierarchy:
///
/// ```text
/// /carousel-images                 list, create
/// /carousel-images/{id}            get, update, delete
/// /carousel-images/row/{row}       list one row ordered by index
///
/// /testimonials[/{id}]             CRUD
/// /promotional-offers[/{id}]       CRUD
/// /attorneys[/{id}]                CRUD
/// /works[/{id}]                    CRUD
/// /offers[/{id}]                   CRUD
/// /blogs[/{id}]                    CRUD
///
/// /files                           upload (POST, multipart)
/// /files/{filename}                download (GET)
///
/// /email                           contact form (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    let carousel = entity::router::<CarouselImageRepo>().route(
        "/row/{row}",
        get(handlers::carousel::list_by_row),
    );

    let files = Router::new()
        .route(
            "/",
            post(handlers::files::upload)
                .layer(DefaultBodyLimit::max((MAX_VIDEO_BYTES + MULTIPART_OVERHEAD) as usize)),
        )
        .route("/{filename}", get(handlers::files::serve));

    Router::new()
        .nest("/carousel-images", carousel)
        .nest("/testimonials", entity::router::<TestimonialRepo>())
        .nest("/promotional-offers", entity::router::<PromotionalOfferRepo>())
        .nest("/attorneys", entity::router::<AttorneyRepo>())
        .nest("/works", entity::router::<WorkRepo>())
        .nest("/offers", entity::router::<OfferRepo>())
        .nest("/blogs", entity::router::<BlogRepo>())
        .nest("/files", files)
        .route("/email", post(handlers::email::send_contact))
}
