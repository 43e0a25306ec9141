//! Achievement model and DTOs.

use courseware_core::types::{DbId, Timestamp};
use courseware_core::validation::not_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `achievements` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Achievement {
    pub id: DbId,
    pub course_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub badge_name: Option<String>,
    pub weight: i32,
    pub published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating a new achievement.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAchievement {
    pub course_id: DbId,
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    pub description: Option<String>,
    pub badge_name: Option<String>,
    #[validate(range(min = 0))]
    pub weight: i32,
    pub published: bool,
}
