//! Repository for the `promotional_offers` table.

use async_trait::async_trait;
use counsel_core::types::DbId;
use sqlx::PgPool;

use crate::models::promotional_offer::{
    CreatePromotionalOffer, PromotionalOffer, UpdatePromotionalOffer,
};
use crate::repositories::EntityRepo;

const COLUMNS: &str = "id, title, description, images";

pub struct PromotionalOfferRepo;

#[async_trait]
impl EntityRepo for PromotionalOfferRepo {
    const ENTITY: &'static str = "Promotional offer";
    const TABLE: &'static str = "promotional_offers";
    const COLUMNS: &'static str = COLUMNS;

    type Record = PromotionalOffer;
    type Create = CreatePromotionalOffer;
    type Update = UpdatePromotionalOffer;

    async fn create(
        pool: &PgPool,
        input: &CreatePromotionalOffer,
    ) -> Result<PromotionalOffer, sqlx::Error> {
        let query = format!(
            "INSERT INTO promotional_offers (title, description, images)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PromotionalOffer>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.images)
            .fetch_one(pool)
            .await
    }

    async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePromotionalOffer,
    ) -> Result<Option<PromotionalOffer>, sqlx::Error> {
        let query = format!(
            "UPDATE promotional_offers SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                images = COALESCE($4, images)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PromotionalOffer>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.images)
            .fetch_optional(pool)
            .await
    }
}
