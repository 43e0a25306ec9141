//! Repository for the `assessment_questions` table.

use courseware_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::assessment::{CreateQuestion, Question};

/// Column list for assessment_questions queries.
const COLUMNS: &str = "id, assessment_id, title, description, maximum_grade, \
    weight, created_at, updated_at";

/// Provides CRUD operations for assessment questions.
pub struct QuestionRepo;

impl QuestionRepo {
    /// Insert a new question, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateQuestion,
    ) -> Result<Question, sqlx::Error> {
        let query = format!(
            "INSERT INTO assessment_questions (assessment_id, title, description, maximum_grade, weight)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(input.assessment_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.maximum_grade)
            .bind(input.weight)
            .fetch_one(executor)
            .await
    }

    /// Find a question by its ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assessment_questions WHERE id = $1");
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List an assessment's questions in creation order.
    pub async fn list_by_assessment<'e>(
        executor: impl PgExecutor<'e>,
        assessment_id: DbId,
    ) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assessment_questions
             WHERE assessment_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(assessment_id)
            .fetch_all(executor)
            .await
    }

    /// Tag a question with a skill (idempotent).
    pub async fn add_skill<'e>(
        executor: impl PgExecutor<'e>,
        question_id: DbId,
        skill_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO question_skills (question_id, skill_id) \
             VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(question_id)
        .bind(skill_id)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// IDs of the skills a question is tagged with.
    pub async fn list_skill_ids<'e>(
        executor: impl PgExecutor<'e>,
        question_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT skill_id FROM question_skills WHERE question_id = $1 ORDER BY skill_id",
        )
        .bind(question_id)
        .fetch_all(executor)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// IDs of the questions tagged with a skill.
    pub async fn list_ids_for_skill<'e>(
        executor: impl PgExecutor<'e>,
        skill_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT question_id FROM question_skills WHERE skill_id = $1 ORDER BY question_id",
        )
        .bind(skill_id)
        .fetch_all(executor)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
