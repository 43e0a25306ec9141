//! Repository for the `assessment_tabs` table.

use courseware_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::assessment::{AssessmentTab, CreateAssessmentTab};

/// Column list for assessment_tabs queries.
const COLUMNS: &str = "id, course_id, category_id, title, weight, is_default, \
    created_at, updated_at";

/// Provides CRUD operations for assessment tabs.
pub struct AssessmentTabRepo;

impl AssessmentTabRepo {
    /// Insert a new assessment tab, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateAssessmentTab,
    ) -> Result<AssessmentTab, sqlx::Error> {
        let query = format!(
            "INSERT INTO assessment_tabs (course_id, category_id, title, weight, is_default)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AssessmentTab>(&query)
            .bind(input.course_id)
            .bind(input.category_id)
            .bind(&input.title)
            .bind(input.weight)
            .bind(input.is_default)
            .fetch_one(executor)
            .await
    }

    /// Find an assessment tab by its ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<AssessmentTab>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assessment_tabs WHERE id = $1");
        sqlx::query_as::<_, AssessmentTab>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Count the course's assessment tabs.
    pub async fn count_by_course<'e>(
        executor: impl PgExecutor<'e>,
        course_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM assessment_tabs WHERE course_id = $1")
                .bind(course_id)
                .fetch_one(executor)
                .await?;
        Ok(row.0)
    }

    /// The default tab of a category.
    pub async fn find_default<'e>(
        executor: impl PgExecutor<'e>,
        category_id: DbId,
    ) -> Result<Option<AssessmentTab>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assessment_tabs
             WHERE category_id = $1 AND is_default = true"
        );
        sqlx::query_as::<_, AssessmentTab>(&query)
            .bind(category_id)
            .fetch_optional(executor)
            .await
    }

    /// List the tabs of a category in creation order.
    pub async fn list_by_category<'e>(
        executor: impl PgExecutor<'e>,
        category_id: DbId,
    ) -> Result<Vec<AssessmentTab>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assessment_tabs
             WHERE category_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, AssessmentTab>(&query)
            .bind(category_id)
            .fetch_all(executor)
            .await
    }
}
