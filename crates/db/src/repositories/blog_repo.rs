//! Repository for the `blogs` table.

use async_trait::async_trait;
use counsel_core::types::DbId;
use sqlx::PgPool;

use crate::models::blog::{Blog, CreateBlog, UpdateBlog};
use crate::repositories::EntityRepo;

const COLUMNS: &str = "id, title, author, content, created_at, updated_at";

pub struct BlogRepo;

#[async_trait]
impl EntityRepo for BlogRepo {
    const ENTITY: &'static str = "Blog";
    const TABLE: &'static str = "blogs";
    const COLUMNS: &'static str = COLUMNS;

    type Record = Blog;
    type Create = CreateBlog;
    type Update = UpdateBlog;

    async fn create(pool: &PgPool, input: &CreateBlog) -> Result<Blog, sqlx::Error> {
        let query = format!(
            "INSERT INTO blogs (title, author, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Blog>(&query)
            .bind(&input.title)
            .bind(&input.author)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// Every successful update refreshes `updated_at`.
    async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBlog,
    ) -> Result<Option<Blog>, sqlx::Error> {
        let query = format!(
            "UPDATE blogs SET
                title = COALESCE($2, title),
                author = COALESCE($3, author),
                content = COALESCE($4, content),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.author)
            .bind(&input.content)
            .fetch_optional(pool)
            .await
    }
}
