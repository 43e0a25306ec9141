//! Survey model and DTOs.

use courseware_core::types::{DbId, Timestamp};
use courseware_core::validation::not_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `surveys` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Survey {
    pub id: DbId,
    pub course_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub start_at: Option<Timestamp>,
    pub end_at: Option<Timestamp>,
    pub published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating a new survey.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSurvey {
    pub course_id: DbId,
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    pub description: Option<String>,
    pub start_at: Option<Timestamp>,
    pub end_at: Option<Timestamp>,
    pub published: bool,
}
