//! Repository for the `carousel_images` table.

use async_trait::async_trait;
use counsel_core::types::DbId;
use sqlx::PgPool;

use crate::models::carousel_image::{CarouselImage, CreateCarouselImage, UpdateCarouselImage};
use crate::repositories::EntityRepo;

const COLUMNS: &str = "id, image, carousel_row, sort_index";

pub struct CarouselImageRepo;

impl CarouselImageRepo {
    /// Images in one row, in display order.
    pub async fn list_by_row(pool: &PgPool, row: i32) -> Result<Vec<CarouselImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM carousel_images WHERE carousel_row = $1 ORDER BY sort_index ASC"
        );
        sqlx::query_as::<_, CarouselImage>(&query)
            .bind(row)
            .fetch_all(pool)
            .await
    }
}

#[async_trait]
impl EntityRepo for CarouselImageRepo {
    const ENTITY: &'static str = "Carousel image";
    const TABLE: &'static str = "carousel_images";
    const COLUMNS: &'static str = COLUMNS;

    type Record = CarouselImage;
    type Create = CreateCarouselImage;
    type Update = UpdateCarouselImage;

    async fn create(
        pool: &PgPool,
        input: &CreateCarouselImage,
    ) -> Result<CarouselImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO carousel_images (image, carousel_row)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CarouselImage>(&query)
            .bind(&input.image)
            .bind(input.row)
            .fetch_one(pool)
            .await
    }

    async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCarouselImage,
    ) -> Result<Option<CarouselImage>, sqlx::Error> {
        let query = format!(
            "UPDATE carousel_images SET
                image = COALESCE($2, image),
                carousel_row = COALESCE($3, carousel_row)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CarouselImage>(&query)
            .bind(id)
            .bind(&input.image)
            .bind(input.row)
            .fetch_optional(pool)
            .await
    }
}
