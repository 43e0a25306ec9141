use courseware_core::duplication::ObjectKind;
use courseware_db::models::course_object::CourseObject;
use courseware_db::models::lesson_plan::{
    CreateLessonPlanEvent, CreateLessonPlanMilestone, LessonPlanEvent, LessonPlanMilestone,
};
use courseware_db::store::DuplicationTx;

use super::{check, Duplicator};
use crate::error::DuplicationError;
use crate::scope::DuplicationScope;

pub struct LessonPlanMilestoneDuplicator;

impl Duplicator for LessonPlanMilestoneDuplicator {
    const KIND: ObjectKind = ObjectKind::LessonPlanMilestone;
    type Source = LessonPlanMilestone;

    async fn duplicate<T: DuplicationTx>(
        &self,
        source: &LessonPlanMilestone,
        scope: &mut DuplicationScope<'_>,
        tx: &mut T,
    ) -> Result<CourseObject, DuplicationError> {
        let key = Self::key(source.id);
        let input = CreateLessonPlanMilestone {
            course_id: scope.target_course_id(),
            title: source.title.clone(),
            description: source.description.clone(),
            start_at: scope.shift(source.start_at),
        };
        check(key, &input)?;
        let copy = tx.insert_milestone(&input).await?;
        Ok(scope.register(key, copy.into()))
    }
}

pub struct LessonPlanEventDuplicator;

impl Duplicator for LessonPlanEventDuplicator {
    const KIND: ObjectKind = ObjectKind::LessonPlanEvent;
    type Source = LessonPlanEvent;

    async fn duplicate<T: DuplicationTx>(
        &self,
        source: &LessonPlanEvent,
        scope: &mut DuplicationScope<'_>,
        tx: &mut T,
    ) -> Result<CourseObject, DuplicationError> {
        let key = Self::key(source.id);
        let input = CreateLessonPlanEvent {
            course_id: scope.target_course_id(),
            title: source.title.clone(),
            description: source.description.clone(),
            location: source.location.clone(),
            event_type: source.event_type.clone(),
            start_at: scope.shift(source.start_at),
            end_at: scope.shift_opt(source.end_at),
        };
        check(key, &input)?;
        let copy = tx.insert_event(&input).await?;
        Ok(scope.register(key, copy.into()))
    }
}
