//! Repository for the `assessment_categories` table.

use courseware_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::assessment::{AssessmentCategory, CreateAssessmentCategory};

/// Column list for assessment_categories queries.
const COLUMNS: &str = "id, course_id, folder_id, title, weight, is_default, \
    created_at, updated_at";

/// Provides CRUD operations for assessment categories.
pub struct AssessmentCategoryRepo;

impl AssessmentCategoryRepo {
    /// Insert a new assessment category, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateAssessmentCategory,
    ) -> Result<AssessmentCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO assessment_categories (course_id, folder_id, title, weight, is_default)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AssessmentCategory>(&query)
            .bind(input.course_id)
            .bind(input.folder_id)
            .bind(&input.title)
            .bind(input.weight)
            .bind(input.is_default)
            .fetch_one(executor)
            .await
    }

    /// Find an assessment category by its ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<AssessmentCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assessment_categories WHERE id = $1");
        sqlx::query_as::<_, AssessmentCategory>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Count the course's assessment categories.
    pub async fn count_by_course<'e>(
        executor: impl PgExecutor<'e>,
        course_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM assessment_categories WHERE course_id = $1")
                .bind(course_id)
                .fetch_one(executor)
                .await?;
        Ok(row.0)
    }

    /// The course's default category, which every course gets on creation.
    pub async fn find_default<'e>(
        executor: impl PgExecutor<'e>,
        course_id: DbId,
    ) -> Result<Option<AssessmentCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assessment_categories
             WHERE course_id = $1 AND is_default = true"
        );
        sqlx::query_as::<_, AssessmentCategory>(&query)
            .bind(course_id)
            .fetch_optional(executor)
            .await
    }

    /// The category owning a materials folder, if any.
    pub async fn find_by_folder<'e>(
        executor: impl PgExecutor<'e>,
        folder_id: DbId,
    ) -> Result<Option<AssessmentCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assessment_categories WHERE folder_id = $1");
        sqlx::query_as::<_, AssessmentCategory>(&query)
            .bind(folder_id)
            .fetch_optional(executor)
            .await
    }

    /// List a course's categories, default first, then by creation order.
    pub async fn list_by_course<'e>(
        executor: impl PgExecutor<'e>,
        course_id: DbId,
    ) -> Result<Vec<AssessmentCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assessment_categories
             WHERE course_id = $1
             ORDER BY is_default DESC, id ASC"
        );
        sqlx::query_as::<_, AssessmentCategory>(&query)
            .bind(course_id)
            .fetch_all(executor)
            .await
    }
}
