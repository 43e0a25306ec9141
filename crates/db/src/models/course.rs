//! Course model and DTOs.
//!
//! A course owns every other object in this crate. Creating a course also
//! creates its default containers (see
//! [`CourseRepo::create`](crate::repositories::CourseRepo::create)).

use courseware_core::settings::SettingsDocument;
use courseware_core::types::{DbId, Timestamp};
use courseware_core::validation::not_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Title given to the default assessment category of every course.
pub const DEFAULT_CATEGORY_TITLE: &str = "Assessments";

/// Title given to the default tab of the default category.
pub const DEFAULT_TAB_TITLE: &str = "Default";

/// Name of the root materials folder.
pub const ROOT_FOLDER_NAME: &str = "Root";

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `courses` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Course {
    pub id: DbId,
    pub title: String,
    pub start_at: Timestamp,
    pub settings: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Course {
    /// The course's settings as a typed document.
    pub fn settings_document(&self) -> SettingsDocument {
        SettingsDocument::from_value(self.settings.clone())
    }
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for creating a new course.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCourse {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    pub start_at: Timestamp,
}
