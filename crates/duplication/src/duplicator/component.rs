//! Standalone course components: scalar copies into the target course.

use courseware_core::duplication::ObjectKind;
use courseware_db::models::achievement::{Achievement, CreateAchievement};
use courseware_db::models::course_object::CourseObject;
use courseware_db::models::forum::{CreateForum, Forum};
use courseware_db::models::survey::{CreateSurvey, Survey};
use courseware_db::models::video::{CreateVideo, Video};
use courseware_db::store::DuplicationTx;

use super::{check, Duplicator};
use crate::error::DuplicationError;
use crate::scope::DuplicationScope;

pub struct AchievementDuplicator;

impl Duplicator for AchievementDuplicator {
    const KIND: ObjectKind = ObjectKind::Achievement;
    type Source = Achievement;

    async fn duplicate<T: DuplicationTx>(
        &self,
        source: &Achievement,
        scope: &mut DuplicationScope<'_>,
        tx: &mut T,
    ) -> Result<CourseObject, DuplicationError> {
        let key = Self::key(source.id);
        let input = CreateAchievement {
            course_id: scope.target_course_id(),
            title: source.title.clone(),
            description: source.description.clone(),
            badge_name: source.badge_name.clone(),
            weight: source.weight,
            published: source.published,
        };
        check(key, &input)?;
        let copy = tx.insert_achievement(&input).await?;
        Ok(scope.register(key, copy.into()))
    }
}

pub struct ForumDuplicator;

impl Duplicator for ForumDuplicator {
    const KIND: ObjectKind = ObjectKind::Forum;
    type Source = Forum;

    async fn duplicate<T: DuplicationTx>(
        &self,
        source: &Forum,
        scope: &mut DuplicationScope<'_>,
        tx: &mut T,
    ) -> Result<CourseObject, DuplicationError> {
        let key = Self::key(source.id);
        let input = CreateForum {
            course_id: scope.target_course_id(),
            name: source.name.clone(),
            description: source.description.clone(),
        };
        check(key, &input)?;
        let copy = tx.insert_forum(&input).await?;
        Ok(scope.register(key, copy.into()))
    }
}

pub struct SurveyDuplicator;

impl Duplicator for SurveyDuplicator {
    const KIND: ObjectKind = ObjectKind::Survey;
    type Source = Survey;

    async fn duplicate<T: DuplicationTx>(
        &self,
        source: &Survey,
        scope: &mut DuplicationScope<'_>,
        tx: &mut T,
    ) -> Result<CourseObject, DuplicationError> {
        let key = Self::key(source.id);
        let input = CreateSurvey {
            course_id: scope.target_course_id(),
            title: source.title.clone(),
            description: source.description.clone(),
            start_at: scope.shift_opt(source.start_at),
            end_at: scope.shift_opt(source.end_at),
            published: source.published,
        };
        check(key, &input)?;
        let copy = tx.insert_survey(&input).await?;
        Ok(scope.register(key, copy.into()))
    }
}

pub struct VideoDuplicator;

impl Duplicator for VideoDuplicator {
    const KIND: ObjectKind = ObjectKind::Video;
    type Source = Video;

    async fn duplicate<T: DuplicationTx>(
        &self,
        source: &Video,
        scope: &mut DuplicationScope<'_>,
        tx: &mut T,
    ) -> Result<CourseObject, DuplicationError> {
        let key = Self::key(source.id);
        let input = CreateVideo {
            course_id: scope.target_course_id(),
            title: source.title.clone(),
            description: source.description.clone(),
            url: source.url.clone(),
            start_at: scope.shift_opt(source.start_at),
            published: source.published,
        };
        check(key, &input)?;
        let copy = tx.insert_video(&input).await?;
        Ok(scope.register(key, copy.into()))
    }
}
