//! Lesson plan milestone and event models and DTOs.

use courseware_core::types::{DbId, Timestamp};
use courseware_core::validation::not_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A row from the `lesson_plan_milestones` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct LessonPlanMilestone {
    pub id: DbId,
    pub course_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub start_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `lesson_plan_events` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct LessonPlanEvent {
    pub id: DbId,
    pub course_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub event_type: String,
    pub start_at: Timestamp,
    pub end_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Create DTOs
// ---------------------------------------------------------------------------

/// Input for creating a new milestone.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLessonPlanMilestone {
    pub course_id: DbId,
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    pub description: Option<String>,
    pub start_at: Timestamp,
}

/// Input for creating a new event.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLessonPlanEvent {
    pub course_id: DbId,
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub event_type: String,
    pub start_at: Timestamp,
    pub end_at: Option<Timestamp>,
}
