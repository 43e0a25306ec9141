//! Loads any duplicable object by its [`ObjectKey`].

use courseware_core::duplication::{ObjectKey, ObjectKind};
use sqlx::PgExecutor;

use crate::models::course_object::CourseObject;
use crate::repositories::{
    AchievementRepo, AssessmentCategoryRepo, AssessmentRepo, AssessmentTabRepo, ForumRepo,
    LessonPlanEventRepo, LessonPlanMilestoneRepo, LevelRepo, MaterialFolderRepo, MaterialRepo,
    QuestionRepo, SkillBranchRepo, SkillRepo, SurveyRepo, VideoRepo,
};

pub struct CourseObjectRepo;

impl CourseObjectRepo {
    /// Find one object of any kind. Returns `None` if the row does not exist.
    pub async fn find<'e>(
        executor: impl PgExecutor<'e>,
        key: ObjectKey,
    ) -> Result<Option<CourseObject>, sqlx::Error> {
        let id = key.id;
        let object = match key.kind {
            ObjectKind::Achievement => AchievementRepo::find_by_id(executor, id)
                .await?
                .map(CourseObject::from),
            ObjectKind::AssessmentCategory => AssessmentCategoryRepo::find_by_id(executor, id)
                .await?
                .map(CourseObject::from),
            ObjectKind::AssessmentTab => AssessmentTabRepo::find_by_id(executor, id)
                .await?
                .map(CourseObject::from),
            ObjectKind::Assessment => AssessmentRepo::find_by_id(executor, id)
                .await?
                .map(CourseObject::from),
            ObjectKind::Question => QuestionRepo::find_by_id(executor, id)
                .await?
                .map(CourseObject::from),
            ObjectKind::SkillBranch => SkillBranchRepo::find_by_id(executor, id)
                .await?
                .map(CourseObject::from),
            ObjectKind::Skill => SkillRepo::find_by_id(executor, id)
                .await?
                .map(CourseObject::from),
            ObjectKind::Forum => ForumRepo::find_by_id(executor, id)
                .await?
                .map(CourseObject::from),
            ObjectKind::LessonPlanMilestone => LessonPlanMilestoneRepo::find_by_id(executor, id)
                .await?
                .map(CourseObject::from),
            ObjectKind::LessonPlanEvent => LessonPlanEventRepo::find_by_id(executor, id)
                .await?
                .map(CourseObject::from),
            ObjectKind::MaterialFolder => MaterialFolderRepo::find_by_id(executor, id)
                .await?
                .map(CourseObject::from),
            ObjectKind::Material => MaterialRepo::find_by_id(executor, id)
                .await?
                .map(CourseObject::from),
            ObjectKind::Level => LevelRepo::find_by_id(executor, id)
                .await?
                .map(CourseObject::from),
            ObjectKind::Survey => SurveyRepo::find_by_id(executor, id)
                .await?
                .map(CourseObject::from),
            ObjectKind::Video => VideoRepo::find_by_id(executor, id)
                .await?
                .map(CourseObject::from),
        };
        Ok(object)
    }
}
