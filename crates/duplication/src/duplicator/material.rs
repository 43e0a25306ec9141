//! Material folders and materials.

use courseware_core::duplication::{ObjectKey, ObjectKind};
use courseware_db::models::course_object::CourseObject;
use courseware_db::models::material::{
    CreateMaterial, CreateMaterialFolder, Material, MaterialFolder,
};
use courseware_db::store::DuplicationTx;

use super::{check, copy_materials, Duplicator};
use crate::error::DuplicationError;
use crate::scope::DuplicationScope;

/// Copies a folder and the materials directly inside it. Subfolders are
/// only copied when selected themselves.
pub struct MaterialFolderDuplicator;

impl Duplicator for MaterialFolderDuplicator {
    const KIND: ObjectKind = ObjectKind::MaterialFolder;
    type Source = MaterialFolder;

    async fn duplicate<T: DuplicationTx>(
        &self,
        source: &MaterialFolder,
        scope: &mut DuplicationScope<'_>,
        tx: &mut T,
    ) -> Result<CourseObject, DuplicationError> {
        let key = Self::key(source.id);

        // The source root folder becomes the target root folder.
        if source.is_root() {
            let root = scope.root_folder(tx, key).await?;
            copy_materials(source.id, root.id, scope, tx).await?;
            return Ok(scope.register(key, root.into()));
        }

        let parent = source
            .parent_id
            .map(|id| ObjectKey::new(ObjectKind::MaterialFolder, id));
        let resolved = scope.parent_id(key, parent, CourseObject::container_folder_id)?;
        let parent_id = match resolved {
            Some(id) => id,
            None => scope.root_folder(tx, key).await?.id,
        };
        let input = CreateMaterialFolder {
            course_id: scope.target_course_id(),
            parent_id: Some(parent_id),
            name: source.name.clone(),
            description: source.description.clone(),
            start_at: scope.shift_opt(source.start_at),
        };
        check(key, &input)?;
        let copy = tx.insert_folder(&input).await?;
        copy_materials(source.id, copy.id, scope, tx).await?;
        Ok(scope.register(key, copy.into()))
    }
}

pub struct MaterialDuplicator;

impl Duplicator for MaterialDuplicator {
    const KIND: ObjectKind = ObjectKind::Material;
    type Source = Material;

    async fn duplicate<T: DuplicationTx>(
        &self,
        source: &Material,
        scope: &mut DuplicationScope<'_>,
        tx: &mut T,
    ) -> Result<CourseObject, DuplicationError> {
        let key = Self::key(source.id);
        let parent = ObjectKey::new(ObjectKind::MaterialFolder, source.folder_id);
        let resolved = scope.parent_id(key, Some(parent), CourseObject::container_folder_id)?;
        let folder_id = match resolved {
            Some(id) => id,
            None => scope.root_folder(tx, key).await?.id,
        };
        let input = CreateMaterial {
            folder_id,
            name: source.name.clone(),
            description: source.description.clone(),
            file_name: source.file_name.clone(),
        };
        check(key, &input)?;
        let copy = tx.insert_material(&input).await?;
        Ok(scope.register(key, copy.into()))
    }
}
