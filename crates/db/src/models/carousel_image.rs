//! Carousel image model and DTOs.

use counsel_core::blob_store::BlobRefs;
use counsel_core::types::DbId;
use counsel_core::validation::Patch;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `carousel_images` table.
///
/// `index` orders images within a `row`. It comes from a sequence and is
/// never client-settable.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CarouselImage {
    pub id: DbId,
    pub image: String,
    #[sqlx(rename = "carousel_row")]
    pub row: i32,
    #[sqlx(rename = "sort_index")]
    pub index: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateCarouselImage {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub image: String,
    #[validate(range(min = 1, message = "must be a positive integer"))]
    pub row: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateCarouselImage {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub image: Option<String>,
    #[validate(range(min = 1, message = "must be a positive integer"))]
    pub row: Option<i32>,
}

impl BlobRefs for CreateCarouselImage {
    fn blob_refs(&self) -> Vec<&str> {
        vec![self.image.as_str()]
    }
}

impl BlobRefs for UpdateCarouselImage {
    fn blob_refs(&self) -> Vec<&str> {
        self.image.as_deref().into_iter().collect()
    }
}

impl Patch for UpdateCarouselImage {
    fn is_empty(&self) -> bool {
        self.image.is_none() && self.row.is_none()
    }
}
