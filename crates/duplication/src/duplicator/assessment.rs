//! Assessment categories, tabs, assessments and questions.
//!
//! Categories and assessments each own a materials folder. A copied
//! category gets a fresh folder under the target root folder; a copied
//! assessment gets one under the folder of the category its tab belongs to,
//! and the source folder's materials are copied into it.

use courseware_core::duplication::{ObjectKey, ObjectKind};
use courseware_core::types::DbId;
use courseware_db::models::assessment::{
    Assessment, AssessmentCategory, AssessmentTab, CreateAssessment, CreateAssessmentCategory,
    CreateAssessmentTab, CreateQuestion, Question,
};
use courseware_db::models::course_object::CourseObject;
use courseware_db::models::material::CreateMaterialFolder;
use courseware_db::store::DuplicationTx;

use super::{check, copy_materials, Duplicator};
use crate::error::DuplicationError;
use crate::scope::DuplicationScope;

pub struct AssessmentCategoryDuplicator;

impl Duplicator for AssessmentCategoryDuplicator {
    const KIND: ObjectKind = ObjectKind::AssessmentCategory;
    type Source = AssessmentCategory;

    async fn duplicate<T: DuplicationTx>(
        &self,
        source: &AssessmentCategory,
        scope: &mut DuplicationScope<'_>,
        tx: &mut T,
    ) -> Result<CourseObject, DuplicationError> {
        let key = Self::key(source.id);
        let root = scope.root_folder(tx, key).await?;

        // folder_id is replaced once the category's own folder exists.
        let mut input = CreateAssessmentCategory {
            course_id: scope.target_course_id(),
            folder_id: root.id,
            title: source.title.clone(),
            weight: source.weight,
            is_default: false,
        };
        check(key, &input)?;

        let folder = tx
            .insert_folder(&CreateMaterialFolder {
                course_id: input.course_id,
                parent_id: Some(root.id),
                name: source.title.clone(),
                description: None,
                start_at: None,
            })
            .await?;
        input.folder_id = folder.id;
        let copy = tx.insert_category(&input).await?;

        scope.register(
            ObjectKey::new(ObjectKind::MaterialFolder, source.folder_id),
            folder.into(),
        );
        Ok(scope.register(key, copy.into()))
    }
}

pub struct AssessmentTabDuplicator;

impl Duplicator for AssessmentTabDuplicator {
    const KIND: ObjectKind = ObjectKind::AssessmentTab;
    type Source = AssessmentTab;

    async fn duplicate<T: DuplicationTx>(
        &self,
        source: &AssessmentTab,
        scope: &mut DuplicationScope<'_>,
        tx: &mut T,
    ) -> Result<CourseObject, DuplicationError> {
        let key = Self::key(source.id);
        let parent = ObjectKey::new(ObjectKind::AssessmentCategory, source.category_id);
        let resolved = scope.parent_id(key, Some(parent), |dup| dup.as_category().map(|c| c.id))?;
        let category_id = match resolved {
            Some(id) => id,
            None => scope.default_category(tx, key).await?.id,
        };

        let input = CreateAssessmentTab {
            course_id: scope.target_course_id(),
            category_id,
            title: source.title.clone(),
            weight: source.weight,
            is_default: false,
        };
        check(key, &input)?;
        let copy = tx.insert_tab(&input).await?;
        Ok(scope.register(key, copy.into()))
    }
}

pub struct AssessmentDuplicator;

impl Duplicator for AssessmentDuplicator {
    const KIND: ObjectKind = ObjectKind::Assessment;
    type Source = Assessment;

    async fn duplicate<T: DuplicationTx>(
        &self,
        source: &Assessment,
        scope: &mut DuplicationScope<'_>,
        tx: &mut T,
    ) -> Result<CourseObject, DuplicationError> {
        let key = Self::key(source.id);
        let parent = ObjectKey::new(ObjectKind::AssessmentTab, source.tab_id);
        let resolved = scope.parent_id(key, Some(parent), |dup| dup.as_tab().map(|t| t.id))?;
        let tab = match resolved {
            Some(id) => tx.find_tab(id).await?.ok_or_else(|| {
                DuplicationError::unresolved(key, format!("duplicated tab #{id} is missing"))
            })?,
            None => scope.default_tab(tx, key).await?,
        };
        let category = tx.find_category(tab.category_id).await?.ok_or_else(|| {
            DuplicationError::unresolved(
                key,
                format!("category #{} of target tab is missing", tab.category_id),
            )
        })?;

        // folder_id is replaced once the assessment's own folder exists.
        let mut input = CreateAssessment {
            course_id: scope.target_course_id(),
            tab_id: tab.id,
            folder_id: category.folder_id,
            title: source.title.clone(),
            description: source.description.clone(),
            base_exp: source.base_exp,
            start_at: scope.shift_opt(source.start_at),
            end_at: scope.shift_opt(source.end_at),
            published: source.published,
        };
        check(key, &input)?;

        let folder = tx
            .insert_folder(&CreateMaterialFolder {
                course_id: input.course_id,
                parent_id: Some(category.folder_id),
                name: source.title.clone(),
                description: None,
                start_at: input.start_at,
            })
            .await?;
        input.folder_id = folder.id;
        let copy = tx.insert_assessment(&input).await?;

        for question in tx.list_questions(source.id).await? {
            copy_question(&question, copy.id, scope, tx).await?;
        }
        let materials = copy_materials(source.folder_id, folder.id, scope, tx).await?;

        tracing::debug!(
            assessment_id = copy.id,
            materials,
            "Copied assessment contents"
        );

        scope.register(
            ObjectKey::new(ObjectKind::MaterialFolder, source.folder_id),
            folder.into(),
        );
        Ok(scope.register(key, copy.into()))
    }
}

/// Questions are normally copied with their assessment. Selecting one on
/// its own only works when its assessment was duplicated in the same run.
pub struct QuestionDuplicator;

impl Duplicator for QuestionDuplicator {
    const KIND: ObjectKind = ObjectKind::Question;
    type Source = Question;

    async fn duplicate<T: DuplicationTx>(
        &self,
        source: &Question,
        scope: &mut DuplicationScope<'_>,
        tx: &mut T,
    ) -> Result<CourseObject, DuplicationError> {
        let key = Self::key(source.id);
        let parent = ObjectKey::new(ObjectKind::Assessment, source.assessment_id);
        let assessment_id = scope
            .parent_id(key, Some(parent), |dup| dup.as_assessment().map(|a| a.id))?
            .ok_or_else(|| {
                DuplicationError::unresolved(key, "questions have no default assessment")
            })?;
        copy_question(source, assessment_id, scope, tx).await
    }
}

/// Copy one question into `assessment_id` and link it to every skill that
/// already has a duplicate.
async fn copy_question<T: DuplicationTx>(
    source: &Question,
    assessment_id: DbId,
    scope: &mut DuplicationScope<'_>,
    tx: &mut T,
) -> Result<CourseObject, DuplicationError> {
    let key = QuestionDuplicator::key(source.id);
    if let Some(existing) = scope.duplicate_of(key) {
        return Ok(existing.clone());
    }

    let input = CreateQuestion {
        assessment_id,
        title: source.title.clone(),
        description: source.description.clone(),
        maximum_grade: source.maximum_grade,
        weight: source.weight,
    };
    check(key, &input)?;
    let copy = tx.insert_question(&input).await?;

    for skill_id in tx.list_question_skill_ids(source.id).await? {
        let skill = ObjectKey::new(ObjectKind::Skill, skill_id);
        if let Some(duplicate) = scope.duplicate_of(skill).map(CourseObject::id) {
            tx.link_question_skill(copy.id, duplicate).await?;
        }
    }

    Ok(scope.register(key, copy.into()))
}
