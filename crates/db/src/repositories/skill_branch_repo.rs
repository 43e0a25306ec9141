//! Repository for the `skill_branches` table.

use courseware_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::skill::{CreateSkillBranch, SkillBranch};

/// Column list for skill_branches queries.
const COLUMNS: &str = "id, course_id, title, description, created_at, updated_at";

/// Provides CRUD operations for skill branches.
pub struct SkillBranchRepo;

impl SkillBranchRepo {
    /// Insert a new skill branch, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateSkillBranch,
    ) -> Result<SkillBranch, sqlx::Error> {
        let query = format!(
            "INSERT INTO skill_branches (course_id, title, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SkillBranch>(&query)
            .bind(input.course_id)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<SkillBranch>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM skill_branches WHERE id = $1");
        sqlx::query_as::<_, SkillBranch>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Count the course's skill branches.
    pub async fn count_by_course<'e>(
        executor: impl PgExecutor<'e>,
        course_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM skill_branches WHERE course_id = $1")
            .bind(course_id)
            .fetch_one(executor)
            .await?;
        Ok(row.0)
    }
}
