//! Route definitions shared by every content table.

use axum::routing::get;
use axum::Router;
use counsel_db::repositories::EntityRepo;

use crate::handlers::entity;
use crate::state::AppState;

/// Routes mounted under `/{kind}`.
///
/// ```text
/// GET    /           list
/// POST   /           create
/// GET    /{id}       get_by_id
/// PATCH  /{id}       update
/// DELETE /{id}       delete
/// ```
pub fn router<R: EntityRepo>() -> Router<AppState> {
    Router::new()
        .route("/", get(entity::list::<R>).post(entity::create::<R>))
        .route(
            "/{id}",
            get(entity::get_by_id::<R>)
                .patch(entity::update::<R>)
                .delete(entity::delete::<R>),
        )
}
