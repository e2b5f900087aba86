//! Offer (priced service) model and DTOs.

use counsel_core::blob_store::BlobRefs;
use counsel_core::types::DbId;
use counsel_core::validation::{valid_price, Patch};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `offers` table.
///
/// `price` is `NUMERIC(10,2)` and serializes as a decimal string (`"19.99"`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Offer {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub price: Decimal,
}

/// `price` accepts either a JSON string or a JSON number.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateOffer {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub description: String,
    #[validate(custom(function = "valid_price"))]
    pub price: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateOffer {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub description: Option<String>,
    #[validate(custom(function = "valid_price"))]
    pub price: Option<Decimal>,
}

impl BlobRefs for CreateOffer {}

impl BlobRefs for UpdateOffer {}

impl Patch for UpdateOffer {
    fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.price.is_none()
    }
}
