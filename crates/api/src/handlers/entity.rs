//! Generic CRUD handlers shared by every content table.
//!
//! Each handler is instantiated per repository, e.g.
//! `get(entity::list::<TestimonialRepo>)`. Input is validated by the
//! extractors before the handler body runs, and blob references are checked
//! against the upload directory before anything is written.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use counsel_core::blob_store::BlobRefs;
use counsel_core::error::CoreError;
use counsel_core::validation::ensure_not_empty;
use counsel_db::repositories::EntityRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{EntityId, ValidJson};
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

fn not_found<R: EntityRepo>(id: i64) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: R::ENTITY,
        id,
    })
}

/// GET /{kind}
pub async fn list<R: EntityRepo>(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<R::Record>>>> {
    let records = R::list(&state.pool).await?;
    Ok(Json(DataResponse { data: records }))
}

/// GET /{kind}/{id}
pub async fn get_by_id<R: EntityRepo>(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<DataResponse<R::Record>>> {
    let record = R::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found::<R>(id))?;
    Ok(Json(DataResponse { data: record }))
}

/// POST /{kind}
///
/// Referenced files must already exist; a missing one is a 404 naming the
/// file and nothing is inserted.
pub async fn create<R: EntityRepo>(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<R::Create>,
) -> AppResult<(StatusCode, Json<MessageResponse<R::Record>>)> {
    state.blobs.ensure_all_exist(&input.blob_refs()).await?;

    let record = R::create(&state.pool, &input).await?;
    tracing::info!(entity = R::ENTITY, "Record created");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!("{} created successfully", R::ENTITY),
            data: record,
        }),
    ))
}

/// PATCH /{kind}/{id}
///
/// Only the supplied fields change. An empty body is rejected before the
/// database is consulted.
pub async fn update<R: EntityRepo>(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidJson(input): ValidJson<R::Update>,
) -> AppResult<Json<MessageResponse<R::Record>>> {
    ensure_not_empty(&input)?;
    state.blobs.ensure_all_exist(&input.blob_refs()).await?;

    let record = R::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found::<R>(id))?;
    tracing::info!(entity = R::ENTITY, id, "Record updated");
    Ok(Json(MessageResponse {
        message: format!("{} updated successfully", R::ENTITY),
        data: record,
    }))
}

/// DELETE /{kind}/{id}
///
/// Referenced files stay on disk.
pub async fn delete<R: EntityRepo>(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<MessageResponse<R::Record>>> {
    let record = R::delete(&state.pool, id)
        .await?
        .ok_or_else(|| not_found::<R>(id))?;
    tracing::info!(entity = R::ENTITY, id, "Record deleted");
    Ok(Json(MessageResponse {
        message: format!("{} deleted successfully", R::ENTITY),
        data: record,
    }))
}
