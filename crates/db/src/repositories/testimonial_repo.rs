//! Repository for the `testimonials` table.

use async_trait::async_trait;
use counsel_core::types::DbId;
use sqlx::PgPool;

use crate::models::testimonial::{CreateTestimonial, Testimonial, UpdateTestimonial};
use crate::repositories::EntityRepo;

const COLUMNS: &str = "id, name, designation, company, image, content";

pub struct TestimonialRepo;

#[async_trait]
impl EntityRepo for TestimonialRepo {
    const ENTITY: &'static str = "Testimonial";
    const TABLE: &'static str = "testimonials";
    const COLUMNS: &'static str = COLUMNS;

    type Record = Testimonial;
    type Create = CreateTestimonial;
    type Update = UpdateTestimonial;

    async fn create(pool: &PgPool, input: &CreateTestimonial) -> Result<Testimonial, sqlx::Error> {
        let query = format!(
            "INSERT INTO testimonials (name, designation, company, image, content)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(&input.name)
            .bind(&input.designation)
            .bind(&input.company)
            .bind(&input.image)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTestimonial,
    ) -> Result<Option<Testimonial>, sqlx::Error> {
        let query = format!(
            "UPDATE testimonials SET
                name = COALESCE($2, name),
                designation = COALESCE($3, designation),
                company = COALESCE($4, company),
                image = COALESCE($5, image),
                content = COALESCE($6, content)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.designation)
            .bind(&input.company)
            .bind(&input.image)
            .bind(&input.content)
            .fetch_optional(pool)
            .await
    }
}
