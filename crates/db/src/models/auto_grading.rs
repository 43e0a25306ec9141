//! Programming auto-grading model and DTOs.

use courseware_core::auto_grading::GradingOutput;
use courseware_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `programming_auto_gradings` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct ProgrammingAutoGrading {
    pub id: DbId,
    pub answer_id: DbId,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
    pub created_at: Timestamp,
}

/// Input for recording an auto-grading run.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProgrammingAutoGrading {
    pub answer_id: DbId,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

impl CreateProgrammingAutoGrading {
    /// Copy of this input with NUL bytes stripped from both output streams.
    pub fn sanitized(&self) -> Self {
        let output = GradingOutput::new(self.stdout.as_str(), self.stderr.as_str()).sanitized();
        Self {
            answer_id: self.answer_id,
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code: self.exit_code,
        }
    }
}
