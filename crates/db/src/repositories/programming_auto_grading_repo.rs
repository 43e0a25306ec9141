//! Repository for the `programming_auto_gradings` table.

use courseware_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::auto_grading::{CreateProgrammingAutoGrading, ProgrammingAutoGrading};

const COLUMNS: &str = "id, answer_id, stdout, stderr, exit_code, created_at";

pub struct ProgrammingAutoGradingRepo;

impl ProgrammingAutoGradingRepo {
    /// Record an auto-grading run. NUL bytes are stripped from the captured
    /// output before insert; PostgreSQL text columns reject them.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateProgrammingAutoGrading,
    ) -> Result<ProgrammingAutoGrading, sqlx::Error> {
        let input = input.sanitized();
        let query = format!(
            "INSERT INTO programming_auto_gradings (answer_id, stdout, stderr, exit_code)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProgrammingAutoGrading>(&query)
            .bind(input.answer_id)
            .bind(&input.stdout)
            .bind(&input.stderr)
            .bind(input.exit_code)
            .fetch_one(executor)
            .await
    }

    pub async fn list_by_answer<'e>(
        executor: impl PgExecutor<'e>,
        answer_id: DbId,
    ) -> Result<Vec<ProgrammingAutoGrading>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM programming_auto_gradings
             WHERE answer_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ProgrammingAutoGrading>(&query)
            .bind(answer_id)
            .fetch_all(executor)
            .await
    }
}
