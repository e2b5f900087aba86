//! Repository for the `attorneys` table.

use async_trait::async_trait;
use counsel_core::types::DbId;
use sqlx::PgPool;

use crate::models::attorney::{Attorney, CreateAttorney, UpdateAttorney};
use crate::repositories::EntityRepo;

const COLUMNS: &str = "id, name, designation, image, description";

pub struct AttorneyRepo;

#[async_trait]
impl EntityRepo for AttorneyRepo {
    const ENTITY: &'static str = "Attorney";
    const TABLE: &'static str = "attorneys";
    const COLUMNS: &'static str = COLUMNS;

    type Record = Attorney;
    type Create = CreateAttorney;
    type Update = UpdateAttorney;

    async fn create(pool: &PgPool, input: &CreateAttorney) -> Result<Attorney, sqlx::Error> {
        let query = format!(
            "INSERT INTO attorneys (name, designation, image, description)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attorney>(&query)
            .bind(&input.name)
            .bind(&input.designation)
            .bind(&input.image)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAttorney,
    ) -> Result<Option<Attorney>, sqlx::Error> {
        let query = format!(
            "UPDATE attorneys SET
                name = COALESCE($2, name),
                designation = COALESCE($3, designation),
                image = COALESCE($4, image),
                description = COALESCE($5, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attorney>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.designation)
            .bind(&input.image)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }
}
