//! Work (portfolio case) model and DTOs.

use counsel_core::blob_store::BlobRefs;
use counsel_core::types::DbId;
use counsel_core::validation::Patch;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `works` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Work {
    pub id: DbId,
    pub title: String,
    pub category: String,
    pub image: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateWork {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub category: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub image: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateWork {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub category: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub image: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub description: Option<String>,
}

impl BlobRefs for CreateWork {
    fn blob_refs(&self) -> Vec<&str> {
        vec![self.image.as_str()]
    }
}

impl BlobRefs for UpdateWork {
    fn blob_refs(&self) -> Vec<&str> {
        self.image.as_deref().into_iter().collect()
    }
}

impl Patch for UpdateWork {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.category.is_none()
            && self.image.is_none()
            && self.description.is_none()
    }
}
