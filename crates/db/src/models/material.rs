//! Material folder and material models and DTOs.
//!
//! Every course has exactly one root folder (`parent_id IS NULL`). The
//! folders of assessment categories and assessments are ordinary folders
//! referenced from their owner's `folder_id`.

use courseware_core::types::{DbId, Timestamp};
use courseware_core::validation::not_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A row from the `material_folders` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct MaterialFolder {
    pub id: DbId,
    pub course_id: DbId,
    pub parent_id: Option<DbId>,
    pub name: String,
    pub description: Option<String>,
    pub start_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MaterialFolder {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A row from the `materials` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Material {
    pub id: DbId,
    pub folder_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub file_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Create DTOs
// ---------------------------------------------------------------------------

/// Input for creating a new folder.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMaterialFolder {
    pub course_id: DbId,
    pub parent_id: Option<DbId>,
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    pub description: Option<String>,
    pub start_at: Option<Timestamp>,
}

/// Input for creating a new material.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMaterial {
    pub folder_id: DbId,
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    pub description: Option<String>,
    pub file_name: Option<String>,
}
