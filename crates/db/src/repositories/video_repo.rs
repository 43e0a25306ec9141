//! Repository for the `videos` table.

use courseware_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::video::{CreateVideo, Video};

/// Column list for videos queries.
const COLUMNS: &str = "id, course_id, title, description, url, start_at, \
    published, created_at, updated_at";

/// Provides CRUD operations for videos.
pub struct VideoRepo;

impl VideoRepo {
    /// Insert a new video, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateVideo,
    ) -> Result<Video, sqlx::Error> {
        let query = format!(
            "INSERT INTO videos (course_id, title, description, url, start_at, published)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(input.course_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.url)
            .bind(input.start_at)
            .bind(input.published)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE id = $1");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn count_by_course<'e>(
        executor: impl PgExecutor<'e>,
        course_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM videos WHERE course_id = $1")
            .bind(course_id)
            .fetch_one(executor)
            .await?;
        Ok(row.0)
    }
}
