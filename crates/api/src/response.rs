//! Shared response envelope types for API handlers.
//!
//! Reads answer `{ "data": ... }`; writes answer `{ "message": ..., "data": ... }`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "message": ..., "data": T }` envelope returned by create, update and delete.
#[derive(Debug, Serialize)]
pub struct MessageResponse<T: Serialize> {
    pub message: String,
    pub data: T,
}

/// Bare `{ "message": ... }` acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageOnly {
    pub message: String,
}
