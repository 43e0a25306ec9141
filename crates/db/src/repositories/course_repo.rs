//! Repository for the `courses` table.

use courseware_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::assessment::{CreateAssessmentCategory, CreateAssessmentTab};
use crate::models::course::{
    Course, CreateCourse, DEFAULT_CATEGORY_TITLE, DEFAULT_TAB_TITLE, ROOT_FOLDER_NAME,
};
use crate::models::level::CreateLevel;
use crate::models::material::CreateMaterialFolder;
use crate::repositories::{AssessmentCategoryRepo, AssessmentTabRepo, LevelRepo, MaterialFolderRepo};

/// Column list for courses queries.
const COLUMNS: &str = "id, title, start_at, settings, created_at, updated_at";

/// Provides CRUD operations for courses.
pub struct CourseRepo;

impl CourseRepo {
    /// Create a course together with its default containers.
    ///
    /// Runs in a transaction: the course row, its root materials folder, the
    /// default assessment category (with its own folder), that category's
    /// default tab, and the zero-threshold level.
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO courses (title, start_at)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let course = sqlx::query_as::<_, Course>(&query)
            .bind(&input.title)
            .bind(input.start_at)
            .fetch_one(&mut *tx)
            .await?;

        let root = MaterialFolderRepo::create(
            &mut *tx,
            &CreateMaterialFolder {
                course_id: course.id,
                parent_id: None,
                name: ROOT_FOLDER_NAME.to_string(),
                description: None,
                start_at: None,
            },
        )
        .await?;

        let category_folder = MaterialFolderRepo::create(
            &mut *tx,
            &CreateMaterialFolder {
                course_id: course.id,
                parent_id: Some(root.id),
                name: DEFAULT_CATEGORY_TITLE.to_string(),
                description: None,
                start_at: None,
            },
        )
        .await?;

        let category = AssessmentCategoryRepo::create(
            &mut *tx,
            &CreateAssessmentCategory {
                course_id: course.id,
                folder_id: category_folder.id,
                title: DEFAULT_CATEGORY_TITLE.to_string(),
                weight: 0,
                is_default: true,
            },
        )
        .await?;

        AssessmentTabRepo::create(
            &mut *tx,
            &CreateAssessmentTab {
                course_id: course.id,
                category_id: category.id,
                title: DEFAULT_TAB_TITLE.to_string(),
                weight: 0,
                is_default: true,
            },
        )
        .await?;

        LevelRepo::create(
            &mut *tx,
            &CreateLevel {
                course_id: course.id,
                experience_points_threshold: 0,
            },
        )
        .await?;

        tx.commit().await?;
        Ok(course)
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Replace a course's settings document. Returns `None` if not found.
    pub async fn update_settings<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        settings: &serde_json::Value,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET settings = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(settings)
            .fetch_optional(executor)
            .await
    }
}
