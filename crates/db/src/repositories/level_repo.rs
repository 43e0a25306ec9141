//! Repository for the `levels` table.

use courseware_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::level::{CreateLevel, Level};

/// Column list for levels queries.
const COLUMNS: &str = "id, course_id, experience_points_threshold, created_at, \
    updated_at";

/// Provides CRUD operations for levels.
pub struct LevelRepo;

impl LevelRepo {
    /// Insert a new level, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateLevel,
    ) -> Result<Level, sqlx::Error> {
        let query = format!(
            "INSERT INTO levels (course_id, experience_points_threshold)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Level>(&query)
            .bind(input.course_id)
            .bind(input.experience_points_threshold)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Level>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM levels WHERE id = $1");
        sqlx::query_as::<_, Level>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Count the course's levels.
    pub async fn count_by_course<'e>(
        executor: impl PgExecutor<'e>,
        course_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM levels WHERE course_id = $1")
            .bind(course_id)
            .fetch_one(executor)
            .await?;
        Ok(row.0)
    }

    /// Find a course's level at an exact experience threshold.
    pub async fn find_by_threshold<'e>(
        executor: impl PgExecutor<'e>,
        course_id: DbId,
        threshold: i32,
    ) -> Result<Option<Level>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM levels
             WHERE course_id = $1 AND experience_points_threshold = $2"
        );
        sqlx::query_as::<_, Level>(&query)
            .bind(course_id)
            .bind(threshold)
            .fetch_optional(executor)
            .await
    }
}
