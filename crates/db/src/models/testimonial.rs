//! Testimonial model and DTOs.

use counsel_core::blob_store::BlobRefs;
use counsel_core::types::DbId;
use counsel_core::validation::Patch;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `testimonials` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Testimonial {
    pub id: DbId,
    pub name: String,
    pub designation: String,
    pub company: String,
    pub image: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateTestimonial {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub designation: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub company: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub image: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateTestimonial {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub designation: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub company: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub image: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub content: Option<String>,
}

impl BlobRefs for CreateTestimonial {
    fn blob_refs(&self) -> Vec<&str> {
        vec![self.image.as_str()]
    }
}

impl BlobRefs for UpdateTestimonial {
    fn blob_refs(&self) -> Vec<&str> {
        self.image.as_deref().into_iter().collect()
    }
}

impl Patch for UpdateTestimonial {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.designation.is_none()
            && self.company.is_none()
            && self.image.is_none()
            && self.content.is_none()
    }
}
