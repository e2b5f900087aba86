//! Capability trait shared by every content table.

use async_trait::async_trait;
use counsel_core::blob_store::BlobRefs;
use counsel_core::types::DbId;
use counsel_core::validation::Patch;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use validator::Validate;

/// One content table: its name, its row type and its request DTOs.
///
/// The generic HTTP handlers are written once against this trait and mounted
/// once per implementor.
#[async_trait]
pub trait EntityRepo: Send + Sync + 'static {
    /// Name used in responses and errors, e.g. `"Testimonial"`.
    const ENTITY: &'static str;
    /// Table name.
    const TABLE: &'static str;
    /// Column list returned by every query.
    const COLUMNS: &'static str;

    type Record: for<'r> FromRow<'r, PgRow> + Serialize + Send + Sync + Unpin + 'static;
    type Create: DeserializeOwned + Validate + BlobRefs + Send + Sync + 'static;
    type Update: DeserializeOwned + Validate + BlobRefs + Patch + Send + Sync + 'static;

    /// Insert a new row, returning it with its assigned id.
    async fn create(pool: &PgPool, input: &Self::Create) -> Result<Self::Record, sqlx::Error>;

    /// Apply the supplied fields. Returns `None` if no row has this id.
    async fn update(
        pool: &PgPool,
        id: DbId,
        input: &Self::Update,
    ) -> Result<Option<Self::Record>, sqlx::Error>;

    /// All rows, ordered by id.
    async fn list(pool: &PgPool) -> Result<Vec<Self::Record>, sqlx::Error> {
        let query = format!("SELECT {} FROM {} ORDER BY id", Self::COLUMNS, Self::TABLE);
        sqlx::query_as::<_, Self::Record>(&query)
            .fetch_all(pool)
            .await
    }

    async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Self::Record>, sqlx::Error> {
        let query = format!("SELECT {} FROM {} WHERE id = $1", Self::COLUMNS, Self::TABLE);
        sqlx::query_as::<_, Self::Record>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a row, returning it. Returns `None` if absent.
    async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Self::Record>, sqlx::Error> {
        let query = format!(
            "DELETE FROM {} WHERE id = $1 RETURNING {}",
            Self::TABLE,
            Self::COLUMNS
        );
        sqlx::query_as::<_, Self::Record>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Row count, used by tests to prove that rejected writes wrote nothing.
    async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM {}", Self::TABLE);
        let (count,): (i64,) = sqlx::query_as(&query).fetch_one(pool).await?;
        Ok(count)
    }
}
