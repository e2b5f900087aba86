use std::sync::Arc;

use counsel_core::blob_store::BlobStore;
use counsel_mail::ContactMailer;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Built once in `main` (or by the test harness) and cloned per request;
/// everything inside is behind `Arc` or is already cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: counsel_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Upload directory for images and the site video.
    pub blobs: Arc<BlobStore>,
    /// Contact-form mailer.
    pub mailer: Arc<ContactMailer>,
}
