//! Repository for the `surveys` table.

use courseware_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::survey::{CreateSurvey, Survey};

/// Column list for surveys queries.
const COLUMNS: &str = "id, course_id, title, description, start_at, end_at, \
    published, created_at, updated_at";

/// Provides CRUD operations for surveys.
pub struct SurveyRepo;

impl SurveyRepo {
    /// Insert a new survey, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateSurvey,
    ) -> Result<Survey, sqlx::Error> {
        let query = format!(
            "INSERT INTO surveys (course_id, title, description, start_at, end_at, published)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Survey>(&query)
            .bind(input.course_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.start_at)
            .bind(input.end_at)
            .bind(input.published)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Survey>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM surveys WHERE id = $1");
        sqlx::query_as::<_, Survey>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn count_by_course<'e>(
        executor: impl PgExecutor<'e>,
        course_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM surveys WHERE course_id = $1")
            .bind(course_id)
            .fetch_one(executor)
            .await?;
        Ok(row.0)
    }
}
