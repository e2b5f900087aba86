//! Request extractors that reject with [`AppError`] instead of axum's
//! plain-text rejections, so every client error has the same JSON shape.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use counsel_core::error::CoreError;
use counsel_core::types::DbId;
use counsel_core::validation::{validate_id, validate_input};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body that has been deserialized and passed [`validate_input`].
///
/// Malformed JSON and unknown fields become `BAD_REQUEST`; schema failures
/// become `VALIDATION_ERROR`. The handler body never sees invalid input.
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        validate_input(&value)?;
        Ok(Self(value))
    }
}

/// A single `{id}` path segment holding a positive integer.
#[derive(Debug, Clone, Copy)]
pub struct EntityId(pub DbId);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<DbId>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        validate_id(id)?;
        Ok(Self(id))
    }
}

/// A `{row}` path segment: a positive carousel row number.
#[derive(Debug, Clone, Copy)]
pub struct CarouselRow(pub i32);

impl<S> FromRequestParts<S> for CarouselRow
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        match i32::try_from(raw) {
            Ok(row) if row > 0 => Ok(Self(row)),
            _ => Err(CoreError::Validation(format!(
                "row must be a positive integer, got {raw}"
            ))
            .into()),
        }
    }
}
