//! Repository for the `forums` table.

use courseware_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::forum::{CreateForum, Forum};

/// Column list for forums queries.
const COLUMNS: &str = "id, course_id, name, description, created_at, updated_at";

/// Provides CRUD operations for forums.
pub struct ForumRepo;

impl ForumRepo {
    /// Insert a new forum, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateForum,
    ) -> Result<Forum, sqlx::Error> {
        let query = format!(
            "INSERT INTO forums (course_id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Forum>(&query)
            .bind(input.course_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Forum>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM forums WHERE id = $1");
        sqlx::query_as::<_, Forum>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn count_by_course<'e>(
        executor: impl PgExecutor<'e>,
        course_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM forums WHERE course_id = $1")
            .bind(course_id)
            .fetch_one(executor)
            .await?;
        Ok(row.0)
    }
}
