//! Repository for the `skills` table.

use courseware_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::skill::{CreateSkill, Skill};

/// Column list for skills queries.
const COLUMNS: &str = "id, course_id, skill_branch_id, title, description, \
    created_at, updated_at";

/// Provides CRUD operations for skills.
pub struct SkillRepo;

impl SkillRepo {
    /// Insert a new skill, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateSkill,
    ) -> Result<Skill, sqlx::Error> {
        let query = format!(
            "INSERT INTO skills (course_id, skill_branch_id, title, description)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Skill>(&query)
            .bind(input.course_id)
            .bind(input.skill_branch_id)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_one(executor)
            .await
    }

    /// Find a skill by its ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Skill>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM skills WHERE id = $1");
        sqlx::query_as::<_, Skill>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Count the course's skills.
    pub async fn count_by_course<'e>(
        executor: impl PgExecutor<'e>,
        course_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM skills WHERE course_id = $1")
            .bind(course_id)
            .fetch_one(executor)
            .await?;
        Ok(row.0)
    }

    /// List the skills of a branch.
    pub async fn list_by_branch<'e>(
        executor: impl PgExecutor<'e>,
        skill_branch_id: DbId,
    ) -> Result<Vec<Skill>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM skills WHERE skill_branch_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, Skill>(&query)
            .bind(skill_branch_id)
            .fetch_all(executor)
            .await
    }
}
