//! Skill branches and skills.
//!
//! Skills have no default branch: a skill whose branch was not duplicated in
//! the same run is copied without one. Question links are shallow and are
//! only created between duplicates of the same run; whichever side is
//! duplicated second creates the link.

use courseware_core::duplication::{ObjectKey, ObjectKind};
use courseware_db::models::course_object::CourseObject;
use courseware_db::models::skill::{CreateSkill, CreateSkillBranch, Skill, SkillBranch};
use courseware_db::store::DuplicationTx;

use super::{check, Duplicator};
use crate::error::DuplicationError;
use crate::scope::DuplicationScope;

pub struct SkillBranchDuplicator;

impl Duplicator for SkillBranchDuplicator {
    const KIND: ObjectKind = ObjectKind::SkillBranch;
    type Source = SkillBranch;

    async fn duplicate<T: DuplicationTx>(
        &self,
        source: &SkillBranch,
        scope: &mut DuplicationScope<'_>,
        tx: &mut T,
    ) -> Result<CourseObject, DuplicationError> {
        let key = Self::key(source.id);
        let input = CreateSkillBranch {
            course_id: scope.target_course_id(),
            title: source.title.clone(),
            description: source.description.clone(),
        };
        check(key, &input)?;
        let copy = tx.insert_skill_branch(&input).await?;
        Ok(scope.register(key, copy.into()))
    }
}

pub struct SkillDuplicator;

impl Duplicator for SkillDuplicator {
    const KIND: ObjectKind = ObjectKind::Skill;
    type Source = Skill;

    async fn duplicate<T: DuplicationTx>(
        &self,
        source: &Skill,
        scope: &mut DuplicationScope<'_>,
        tx: &mut T,
    ) -> Result<CourseObject, DuplicationError> {
        let key = Self::key(source.id);
        let parent = source
            .skill_branch_id
            .map(|id| ObjectKey::new(ObjectKind::SkillBranch, id));
        let skill_branch_id =
            scope.parent_id(key, parent, |dup| dup.as_skill_branch().map(|b| b.id))?;

        let input = CreateSkill {
            course_id: scope.target_course_id(),
            skill_branch_id,
            title: source.title.clone(),
            description: source.description.clone(),
        };
        check(key, &input)?;
        let copy = tx.insert_skill(&input).await?;

        for question_id in tx.list_skill_question_ids(source.id).await? {
            let question = ObjectKey::new(ObjectKind::Question, question_id);
            if let Some(duplicate) = scope.duplicate_of(question).map(CourseObject::id) {
                tx.link_question_skill(duplicate, copy.id).await?;
            }
        }

        Ok(scope.register(key, copy.into()))
    }
}
