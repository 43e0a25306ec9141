//! PostgreSQL-backed duplication store.

use courseware_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use super::{CourseStore, DuplicationTx};
use crate::error::StoreError;
use crate::models::achievement::{Achievement, CreateAchievement};
use crate::models::assessment::{
    Assessment, AssessmentCategory, AssessmentTab, CreateAssessment, CreateAssessmentCategory,
    CreateAssessmentTab, CreateQuestion, Question,
};
use crate::models::forum::{CreateForum, Forum};
use crate::models::lesson_plan::{
    CreateLessonPlanEvent, CreateLessonPlanMilestone, LessonPlanEvent, LessonPlanMilestone,
};
use crate::models::level::{CreateLevel, Level};
use crate::models::material::{CreateMaterial, CreateMaterialFolder, Material, MaterialFolder};
use crate::models::skill::{CreateSkill, CreateSkillBranch, Skill, SkillBranch};
use crate::models::survey::{CreateSurvey, Survey};
use crate::models::video::{CreateVideo, Video};
use crate::repositories::{
    AchievementRepo, AssessmentCategoryRepo, AssessmentRepo, AssessmentTabRepo, ForumRepo,
    LessonPlanEventRepo, LessonPlanMilestoneRepo, LevelRepo, MaterialFolderRepo, MaterialRepo,
    QuestionRepo, SkillBranchRepo, SkillRepo, SurveyRepo, VideoRepo,
};

/// Store over a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgCourseStore {
    pool: PgPool,
}

impl PgCourseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl CourseStore for PgCourseStore {
    type Tx = PgDuplicationTx;

    async fn begin(&self) -> Result<PgDuplicationTx, StoreError> {
        let tx = self.pool.begin().await?;
        Ok(PgDuplicationTx { tx })
    }
}

/// An open PostgreSQL transaction. Dropping it rolls back.
pub struct PgDuplicationTx {
    tx: Transaction<'static, Postgres>,
}

impl DuplicationTx for PgDuplicationTx {
    async fn commit(self) -> Result<(), StoreError> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), StoreError> {
        self.tx.rollback().await?;
        tracing::debug!("Duplication transaction rolled back");
        Ok(())
    }

    async fn default_category(
        &mut self,
        course_id: DbId,
    ) -> Result<Option<AssessmentCategory>, StoreError> {
        Ok(AssessmentCategoryRepo::find_default(&mut *self.tx, course_id).await?)
    }

    async fn default_tab(
        &mut self,
        category_id: DbId,
    ) -> Result<Option<AssessmentTab>, StoreError> {
        Ok(AssessmentTabRepo::find_default(&mut *self.tx, category_id).await?)
    }

    async fn root_folder(&mut self, course_id: DbId) -> Result<Option<MaterialFolder>, StoreError> {
        Ok(MaterialFolderRepo::find_root(&mut *self.tx, course_id).await?)
    }

    async fn find_level_by_threshold(
        &mut self,
        course_id: DbId,
        threshold: i32,
    ) -> Result<Option<Level>, StoreError> {
        Ok(LevelRepo::find_by_threshold(&mut *self.tx, course_id, threshold).await?)
    }

    async fn find_tab(&mut self, id: DbId) -> Result<Option<AssessmentTab>, StoreError> {
        Ok(AssessmentTabRepo::find_by_id(&mut *self.tx, id).await?)
    }

    async fn find_category(&mut self, id: DbId) -> Result<Option<AssessmentCategory>, StoreError> {
        Ok(AssessmentCategoryRepo::find_by_id(&mut *self.tx, id).await?)
    }

    async fn find_assessment(&mut self, id: DbId) -> Result<Option<Assessment>, StoreError> {
        Ok(AssessmentRepo::find_by_id(&mut *self.tx, id).await?)
    }

    async fn find_folder(&mut self, id: DbId) -> Result<Option<MaterialFolder>, StoreError> {
        Ok(MaterialFolderRepo::find_by_id(&mut *self.tx, id).await?)
    }

    async fn list_questions(&mut self, assessment_id: DbId) -> Result<Vec<Question>, StoreError> {
        Ok(QuestionRepo::list_by_assessment(&mut *self.tx, assessment_id).await?)
    }

    async fn list_question_skill_ids(
        &mut self,
        question_id: DbId,
    ) -> Result<Vec<DbId>, StoreError> {
        Ok(QuestionRepo::list_skill_ids(&mut *self.tx, question_id).await?)
    }

    async fn list_skill_question_ids(&mut self, skill_id: DbId) -> Result<Vec<DbId>, StoreError> {
        Ok(QuestionRepo::list_ids_for_skill(&mut *self.tx, skill_id).await?)
    }

    async fn list_materials(&mut self, folder_id: DbId) -> Result<Vec<Material>, StoreError> {
        Ok(MaterialRepo::list_by_folder(&mut *self.tx, folder_id).await?)
    }

    async fn insert_achievement(
        &mut self,
        input: &CreateAchievement,
    ) -> Result<Achievement, StoreError> {
        Ok(AchievementRepo::create(&mut *self.tx, input).await?)
    }

    async fn insert_category(
        &mut self,
        input: &CreateAssessmentCategory,
    ) -> Result<AssessmentCategory, StoreError> {
        Ok(AssessmentCategoryRepo::create(&mut *self.tx, input).await?)
    }

    async fn insert_tab(
        &mut self,
        input: &CreateAssessmentTab,
    ) -> Result<AssessmentTab, StoreError> {
        Ok(AssessmentTabRepo::create(&mut *self.tx, input).await?)
    }

    async fn insert_assessment(
        &mut self,
        input: &CreateAssessment,
    ) -> Result<Assessment, StoreError> {
        Ok(AssessmentRepo::create(&mut *self.tx, input).await?)
    }

    async fn insert_question(&mut self, input: &CreateQuestion) -> Result<Question, StoreError> {
        Ok(QuestionRepo::create(&mut *self.tx, input).await?)
    }

    async fn insert_skill_branch(
        &mut self,
        input: &CreateSkillBranch,
    ) -> Result<SkillBranch, StoreError> {
        Ok(SkillBranchRepo::create(&mut *self.tx, input).await?)
    }

    async fn insert_skill(&mut self, input: &CreateSkill) -> Result<Skill, StoreError> {
        Ok(SkillRepo::create(&mut *self.tx, input).await?)
    }

    async fn insert_forum(&mut self, input: &CreateForum) -> Result<Forum, StoreError> {
        Ok(ForumRepo::create(&mut *self.tx, input).await?)
    }

    async fn insert_milestone(
        &mut self,
        input: &CreateLessonPlanMilestone,
    ) -> Result<LessonPlanMilestone, StoreError> {
        Ok(LessonPlanMilestoneRepo::create(&mut *self.tx, input).await?)
    }

    async fn insert_event(
        &mut self,
        input: &CreateLessonPlanEvent,
    ) -> Result<LessonPlanEvent, StoreError> {
        Ok(LessonPlanEventRepo::create(&mut *self.tx, input).await?)
    }

    async fn insert_folder(
        &mut self,
        input: &CreateMaterialFolder,
    ) -> Result<MaterialFolder, StoreError> {
        Ok(MaterialFolderRepo::create(&mut *self.tx, input).await?)
    }

    async fn insert_material(&mut self, input: &CreateMaterial) -> Result<Material, StoreError> {
        Ok(MaterialRepo::create(&mut *self.tx, input).await?)
    }

    async fn insert_level(&mut self, input: &CreateLevel) -> Result<Level, StoreError> {
        Ok(LevelRepo::create(&mut *self.tx, input).await?)
    }

    async fn insert_survey(&mut self, input: &CreateSurvey) -> Result<Survey, StoreError> {
        Ok(SurveyRepo::create(&mut *self.tx, input).await?)
    }

    async fn insert_video(&mut self, input: &CreateVideo) -> Result<Video, StoreError> {
        Ok(VideoRepo::create(&mut *self.tx, input).await?)
    }

    async fn link_question_skill(
        &mut self,
        question_id: DbId,
        skill_id: DbId,
    ) -> Result<(), StoreError> {
        Ok(QuestionRepo::add_skill(&mut *self.tx, question_id, skill_id).await?)
    }
}
