//! Skill and skill branch models and DTOs.

use courseware_core::types::{DbId, Timestamp};
use courseware_core::validation::not_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `skill_branches` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct SkillBranch {
    pub id: DbId,
    pub course_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `skills` table. `skill_branch_id` is `None` for skills
/// that are not grouped under a branch.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Skill {
    pub id: DbId,
    pub course_id: DbId,
    pub skill_branch_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating a new skill branch.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSkillBranch {
    pub course_id: DbId,
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    pub description: Option<String>,
}

/// Input for creating a new skill.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSkill {
    pub course_id: DbId,
    pub skill_branch_id: Option<DbId>,
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    pub description: Option<String>,
}
