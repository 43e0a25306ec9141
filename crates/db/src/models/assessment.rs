//! Assessment models and DTOs.
//!
//! Assessments are organised category -> tab -> assessment. Categories and
//! assessments each own a materials folder; questions belong to their
//! assessment and are tagged with skills through `question_skills`.

use courseware_core::types::{DbId, Timestamp};
use courseware_core::validation::not_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A row from the `assessment_categories` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct AssessmentCategory {
    pub id: DbId,
    pub course_id: DbId,
    pub folder_id: DbId,
    pub title: String,
    pub weight: i32,
    pub is_default: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `assessment_tabs` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct AssessmentTab {
    pub id: DbId,
    pub course_id: DbId,
    pub category_id: DbId,
    pub title: String,
    pub weight: i32,
    pub is_default: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `assessments` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Assessment {
    pub id: DbId,
    pub course_id: DbId,
    pub tab_id: DbId,
    pub folder_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub base_exp: i32,
    pub start_at: Option<Timestamp>,
    pub end_at: Option<Timestamp>,
    pub published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `assessment_questions` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Question {
    pub id: DbId,
    pub assessment_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub maximum_grade: f64,
    pub weight: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Create DTOs
// ---------------------------------------------------------------------------

/// Input for creating a new assessment category.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAssessmentCategory {
    pub course_id: DbId,
    pub folder_id: DbId,
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[validate(range(min = 0))]
    pub weight: i32,
    pub is_default: bool,
}

/// Input for creating a new assessment tab.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAssessmentTab {
    pub course_id: DbId,
    pub category_id: DbId,
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[validate(range(min = 0))]
    pub weight: i32,
    pub is_default: bool,
}

/// Input for creating a new assessment.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAssessment {
    pub course_id: DbId,
    pub tab_id: DbId,
    pub folder_id: DbId,
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub base_exp: i32,
    pub start_at: Option<Timestamp>,
    pub end_at: Option<Timestamp>,
    pub published: bool,
}

/// Input for creating a new question.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuestion {
    pub assessment_id: DbId,
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub maximum_grade: f64,
    #[validate(range(min = 0))]
    pub weight: i32,
}
