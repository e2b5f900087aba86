//! Repository for the `works` table.

use async_trait::async_trait;
use counsel_core::types::DbId;
use sqlx::PgPool;

use crate::models::work::{CreateWork, UpdateWork, Work};
use crate::repositories::EntityRepo;

const COLUMNS: &str = "id, title, category, image, description";

pub struct WorkRepo;

#[async_trait]
impl EntityRepo for WorkRepo {
    const ENTITY: &'static str = "Work";
    const TABLE: &'static str = "works";
    const COLUMNS: &'static str = COLUMNS;

    type Record = Work;
    type Create = CreateWork;
    type Update = UpdateWork;

    async fn create(pool: &PgPool, input: &CreateWork) -> Result<Work, sqlx::Error> {
        let query = format!(
            "INSERT INTO works (title, category, image, description)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Work>(&query)
            .bind(&input.title)
            .bind(&input.category)
            .bind(&input.image)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWork,
    ) -> Result<Option<Work>, sqlx::Error> {
        let query = format!(
            "UPDATE works SET
                title = COALESCE($2, title),
                category = COALESCE($3, category),
                image = COALESCE($4, image),
                description = COALESCE($5, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Work>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.category)
            .bind(&input.image)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }
}
