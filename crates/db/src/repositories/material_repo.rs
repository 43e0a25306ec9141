//! Repository for the `materials` table.

use courseware_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::material::{CreateMaterial, Material};

/// Column list for materials queries.
const COLUMNS: &str = "id, folder_id, name, description, file_name, created_at, \
    updated_at";

/// Provides CRUD operations for materials.
pub struct MaterialRepo;

impl MaterialRepo {
    /// Insert a new material, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateMaterial,
    ) -> Result<Material, sqlx::Error> {
        let query = format!(
            "INSERT INTO materials (folder_id, name, description, file_name)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Material>(&query)
            .bind(input.folder_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.file_name)
            .fetch_one(executor)
            .await
    }

    /// Find a material by its ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Material>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM materials WHERE id = $1");
        sqlx::query_as::<_, Material>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List the materials in a folder.
    pub async fn list_by_folder<'e>(
        executor: impl PgExecutor<'e>,
        folder_id: DbId,
    ) -> Result<Vec<Material>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM materials WHERE folder_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Material>(&query)
            .bind(folder_id)
            .fetch_all(executor)
            .await
    }
}
