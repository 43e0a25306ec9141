//! Repository for the `achievements` table.

use courseware_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::achievement::{Achievement, CreateAchievement};

/// Column list for achievements queries.
const COLUMNS: &str = "id, course_id, title, description, badge_name, weight, \
    published, created_at, updated_at";

/// Provides CRUD operations for course achievements.
pub struct AchievementRepo;

impl AchievementRepo {
    /// Insert a new achievement, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateAchievement,
    ) -> Result<Achievement, sqlx::Error> {
        let query = format!(
            "INSERT INTO achievements (course_id, title, description, badge_name, weight, published)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Achievement>(&query)
            .bind(input.course_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.badge_name)
            .bind(input.weight)
            .bind(input.published)
            .fetch_one(executor)
            .await
    }

    /// Find an achievement by its ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Achievement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM achievements WHERE id = $1");
        sqlx::query_as::<_, Achievement>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn count_by_course<'e>(
        executor: impl PgExecutor<'e>,
        course_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM achievements WHERE course_id = $1")
            .bind(course_id)
            .fetch_one(executor)
            .await?;
        Ok(row.0)
    }
}
