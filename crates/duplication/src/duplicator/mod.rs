//! Per-kind duplication strategies.
//!
//! Every duplicable kind has a unit struct implementing [`Duplicator`].
//! [`duplicate_object`] dispatches a loaded [`CourseObject`] to the right
//! one. A duplicator:
//!
//! 1. resolves its parent container through the [`DuplicationScope`],
//! 2. builds and validates the create input (dates shifted),
//! 3. inserts through the transaction, copying owned content,
//! 4. registers the copy (and every owned copy) before returning it.

use std::future::Future;

use courseware_core::duplication::{ObjectKey, ObjectKind};
use courseware_core::types::DbId;
use courseware_db::models::course_object::CourseObject;
use courseware_db::models::material::CreateMaterial;
use courseware_db::store::DuplicationTx;
use validator::Validate;

use crate::error::DuplicationError;
use crate::scope::DuplicationScope;

mod assessment;
mod component;
mod lesson_plan;
mod level;
mod material;
mod skill;

pub use assessment::{
    AssessmentCategoryDuplicator, AssessmentDuplicator, AssessmentTabDuplicator,
    QuestionDuplicator,
};
pub use component::{AchievementDuplicator, ForumDuplicator, SurveyDuplicator, VideoDuplicator};
pub use lesson_plan::{LessonPlanEventDuplicator, LessonPlanMilestoneDuplicator};
pub use level::LevelDuplicator;
pub use material::{MaterialDuplicator, MaterialFolderDuplicator};
pub use skill::{SkillBranchDuplicator, SkillDuplicator};

/// Copies one kind of source object into the target course.
pub trait Duplicator {
    const KIND: ObjectKind;

    type Source: Sync;

    fn duplicate<T: DuplicationTx>(
        &self,
        source: &Self::Source,
        scope: &mut DuplicationScope<'_>,
        tx: &mut T,
    ) -> impl Future<Output = Result<CourseObject, DuplicationError>> + Send;

    fn key(source_id: DbId) -> ObjectKey {
        ObjectKey::new(Self::KIND, source_id)
    }
}

/// Duplicate any loaded object with the duplicator for its kind.
pub async fn duplicate_object<T: DuplicationTx>(
    source: &CourseObject,
    scope: &mut DuplicationScope<'_>,
    tx: &mut T,
) -> Result<CourseObject, DuplicationError> {
    match source {
        CourseObject::Achievement(o) => AchievementDuplicator.duplicate(o, scope, tx).await,
        CourseObject::AssessmentCategory(o) => {
            AssessmentCategoryDuplicator.duplicate(o, scope, tx).await
        }
        CourseObject::AssessmentTab(o) => AssessmentTabDuplicator.duplicate(o, scope, tx).await,
        CourseObject::Assessment(o) => AssessmentDuplicator.duplicate(o, scope, tx).await,
        CourseObject::Question(o) => QuestionDuplicator.duplicate(o, scope, tx).await,
        CourseObject::SkillBranch(o) => SkillBranchDuplicator.duplicate(o, scope, tx).await,
        CourseObject::Skill(o) => SkillDuplicator.duplicate(o, scope, tx).await,
        CourseObject::Forum(o) => ForumDuplicator.duplicate(o, scope, tx).await,
        CourseObject::LessonPlanMilestone(o) => {
            LessonPlanMilestoneDuplicator.duplicate(o, scope, tx).await
        }
        CourseObject::LessonPlanEvent(o) => {
            LessonPlanEventDuplicator.duplicate(o, scope, tx).await
        }
        CourseObject::MaterialFolder(o) => MaterialFolderDuplicator.duplicate(o, scope, tx).await,
        CourseObject::Material(o) => MaterialDuplicator.duplicate(o, scope, tx).await,
        CourseObject::Level(o) => LevelDuplicator.duplicate(o, scope, tx).await,
        CourseObject::Survey(o) => SurveyDuplicator.duplicate(o, scope, tx).await,
        CourseObject::Video(o) => VideoDuplicator.duplicate(o, scope, tx).await,
    }
}

/// Validate a create input built from `source`.
pub(crate) fn check<V: Validate>(source: ObjectKey, input: &V) -> Result<(), DuplicationError> {
    input
        .validate()
        .map_err(|errors| DuplicationError::validation(source, &errors))
}

/// Copy every material of `from_folder` into `to_folder`, registering each.
pub(crate) async fn copy_materials<T: DuplicationTx>(
    from_folder: DbId,
    to_folder: DbId,
    scope: &mut DuplicationScope<'_>,
    tx: &mut T,
) -> Result<usize, DuplicationError> {
    let materials = tx.list_materials(from_folder).await?;
    for material in &materials {
        let key = ObjectKey::new(ObjectKind::Material, material.id);
        if scope.duplicate_of(key).is_some() {
            continue;
        }
        let input = CreateMaterial {
            folder_id: to_folder,
            name: material.name.clone(),
            description: material.description.clone(),
            file_name: material.file_name.clone(),
        };
        check(key, &input)?;
        let copy = tx.insert_material(&input).await?;
        scope.register(key, copy.into());
    }
    Ok(materials.len())
}
