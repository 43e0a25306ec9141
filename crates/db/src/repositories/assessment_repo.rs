//! Repository for the `assessments` table.

use courseware_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::assessment::{Assessment, CreateAssessment};

/// Column list for assessments queries.
const COLUMNS: &str = "id, course_id, tab_id, folder_id, title, description, \
    base_exp, start_at, end_at, published, created_at, \
    updated_at";

/// Provides CRUD operations for assessments.
pub struct AssessmentRepo;

impl AssessmentRepo {
    /// Insert a new assessment, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateAssessment,
    ) -> Result<Assessment, sqlx::Error> {
        let query = format!(
            "INSERT INTO assessments (course_id, tab_id, folder_id, title, description, base_exp, start_at, end_at, published)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assessment>(&query)
            .bind(input.course_id)
            .bind(input.tab_id)
            .bind(input.folder_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.base_exp)
            .bind(input.start_at)
            .bind(input.end_at)
            .bind(input.published)
            .fetch_one(executor)
            .await
    }

    /// Find an assessment by its ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Assessment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assessments WHERE id = $1");
        sqlx::query_as::<_, Assessment>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Count the course's assessments.
    pub async fn count_by_course<'e>(
        executor: impl PgExecutor<'e>,
        course_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM assessments WHERE course_id = $1")
            .bind(course_id)
            .fetch_one(executor)
            .await?;
        Ok(row.0)
    }

    /// List the assessments of a tab in creation order.
    pub async fn list_by_tab<'e>(
        executor: impl PgExecutor<'e>,
        tab_id: DbId,
    ) -> Result<Vec<Assessment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assessments WHERE tab_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Assessment>(&query)
            .bind(tab_id)
            .fetch_all(executor)
            .await
    }
}
