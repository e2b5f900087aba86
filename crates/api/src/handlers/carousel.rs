//! Handlers for carousel-specific routes.

use axum::extract::State;
use axum::Json;
use counsel_db::models::carousel_image::CarouselImage;
use counsel_db::repositories::CarouselImageRepo;

use crate::error::AppResult;
use crate::extract::CarouselRow;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /carousel-images/row/{row}
///
/// Images in one row, ascending by `index`.
pub async fn list_by_row(
    State(state): State<AppState>,
    CarouselRow(row): CarouselRow,
) -> AppResult<Json<DataResponse<Vec<CarouselImage>>>> {
    let images = CarouselImageRepo::list_by_row(&state.pool, row).await?;
    Ok(Json(DataResponse { data: images }))
}
