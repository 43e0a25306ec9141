//! Level model and DTOs.
//!
//! Levels are experience-point thresholds. Each course has a level at
//! threshold 0 from creation and thresholds are unique per course.

use courseware_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `levels` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Level {
    pub id: DbId,
    pub course_id: DbId,
    pub experience_points_threshold: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating a new level.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLevel {
    pub course_id: DbId,
    #[validate(range(min = 0))]
    pub experience_points_threshold: i32,
}
