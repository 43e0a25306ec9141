//! Forum model and DTOs.

use courseware_core::types::{DbId, Timestamp};
use courseware_core::validation::not_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `forums` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Forum {
    pub id: DbId,
    pub course_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating a new forum.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateForum {
    pub course_id: DbId,
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    pub description: Option<String>,
}
