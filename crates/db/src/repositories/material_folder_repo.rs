//! Repository for the `material_folders` table.

use courseware_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::material::{CreateMaterialFolder, MaterialFolder};

/// Column list for material_folders queries.
const COLUMNS: &str = "id, course_id, parent_id, name, description, start_at, \
    created_at, updated_at";

/// Provides CRUD operations for material folders.
pub struct MaterialFolderRepo;

impl MaterialFolderRepo {
    /// Insert a new folder, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateMaterialFolder,
    ) -> Result<MaterialFolder, sqlx::Error> {
        let query = format!(
            "INSERT INTO material_folders (course_id, parent_id, name, description, start_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaterialFolder>(&query)
            .bind(input.course_id)
            .bind(input.parent_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.start_at)
            .fetch_one(executor)
            .await
    }

    /// Find a folder by its ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<MaterialFolder>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM material_folders WHERE id = $1");
        sqlx::query_as::<_, MaterialFolder>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Count the course's folders.
    pub async fn count_by_course<'e>(
        executor: impl PgExecutor<'e>,
        course_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM material_folders WHERE course_id = $1")
                .bind(course_id)
                .fetch_one(executor)
                .await?;
        Ok(row.0)
    }

    /// The course's root folder.
    pub async fn find_root<'e>(
        executor: impl PgExecutor<'e>,
        course_id: DbId,
    ) -> Result<Option<MaterialFolder>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM material_folders
             WHERE course_id = $1 AND parent_id IS NULL"
        );
        sqlx::query_as::<_, MaterialFolder>(&query)
            .bind(course_id)
            .fetch_optional(executor)
            .await
    }

    /// List the direct subfolders of a folder.
    pub async fn list_children<'e>(
        executor: impl PgExecutor<'e>,
        parent_id: DbId,
    ) -> Result<Vec<MaterialFolder>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM material_folders WHERE parent_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, MaterialFolder>(&query)
            .bind(parent_id)
            .fetch_all(executor)
            .await
    }
}
