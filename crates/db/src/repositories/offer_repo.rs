//! Repository for the `offers` table.

use async_trait::async_trait;
use counsel_core::types::DbId;
use sqlx::PgPool;

use crate::models::offer::{CreateOffer, Offer, UpdateOffer};
use crate::repositories::EntityRepo;

const COLUMNS: &str = "id, title, description, price";

pub struct OfferRepo;

#[async_trait]
impl EntityRepo for OfferRepo {
    const ENTITY: &'static str = "Offer";
    const TABLE: &'static str = "offers";
    const COLUMNS: &'static str = COLUMNS;

    type Record = Offer;
    type Create = CreateOffer;
    type Update = UpdateOffer;

    async fn create(pool: &PgPool, input: &CreateOffer) -> Result<Offer, sqlx::Error> {
        let query = format!(
            "INSERT INTO offers (title, description, price)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Offer>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.price)
            .fetch_one(pool)
            .await
    }

    async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOffer,
    ) -> Result<Option<Offer>, sqlx::Error> {
        let query = format!(
            "UPDATE offers SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                price = COALESCE($4, price)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Offer>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.price)
            .fetch_optional(pool)
            .await
    }
}
