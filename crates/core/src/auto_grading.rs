//! Programming auto-grading output handling.
//!
//! Test runners sometimes emit NUL bytes on stdout/stderr. PostgreSQL text
//! columns cannot store them, so captured output is sanitized before an
//! auto-grading record is saved.

use std::borrow::Cow;

/// Remove every NUL byte from `output`, borrowing when there is none.
pub fn strip_null_bytes(output: &str) -> Cow<'_, str> {
    if output.contains('\0') {
        Cow::Owned(output.replace('\0', ""))
    } else {
        Cow::Borrowed(output)
    }
}

/// Captured output of one programming auto-grading run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GradingOutput {
    pub stdout: String,
    pub stderr: String,
}

impl GradingOutput {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Output with NUL bytes removed from both streams.
    pub fn sanitized(&self) -> GradingOutput {
        GradingOutput {
            stdout: strip_null_bytes(&self.stdout).into_owned(),
            stderr: strip_null_bytes(&self.stderr).into_owned(),
        }
    }
}
