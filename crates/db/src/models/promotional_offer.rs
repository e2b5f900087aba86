//! Promotional offer model and DTOs.
//!
//! Unlike the other kinds, a promotional offer references a list of images.

use counsel_core::blob_store::BlobRefs;
use counsel_core::types::DbId;
use counsel_core::validation::{non_empty_items, Patch};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `promotional_offers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PromotionalOffer {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreatePromotionalOffer {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub description: String,
    #[validate(custom(function = "non_empty_items"))]
    pub images: Vec<String>,
}

/// Supplying `images` replaces the whole list.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdatePromotionalOffer {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub description: Option<String>,
    #[validate(custom(function = "non_empty_items"))]
    pub images: Option<Vec<String>>,
}

impl BlobRefs for CreatePromotionalOffer {
    fn blob_refs(&self) -> Vec<&str> {
        self.images.iter().map(String::as_str).collect()
    }
}

impl BlobRefs for UpdatePromotionalOffer {
    fn blob_refs(&self) -> Vec<&str> {
        self.images
            .iter()
            .flatten()
            .map(String::as_str)
            .collect()
    }
}

impl Patch for UpdatePromotionalOffer {
    fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.images.is_none()
    }
}
