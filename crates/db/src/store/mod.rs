//! Transactional store used by course object duplication.
//!
//! A duplication run opens one [`DuplicationTx`] from a [`CourseStore`],
//! performs every read and insert through it, and then either commits or
//! rolls back. Two implementations ship with this crate:
//!
//! - [`PgCourseStore`]: PostgreSQL through the repositories in
//!   [`crate::repositories`].
//! - [`MemoryStore`]: an in-process store with the same constraints, used
//!   by tests and dry runs.

use std::future::Future;

use courseware_core::types::DbId;

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

pub mod memory;
pub mod postgres;

pub use memory::{MemoryState, MemoryStore, MemoryTx};
pub use postgres::{PgCourseStore, PgDuplicationTx};

/// Opens duplication transactions.
pub trait CourseStore: Send + Sync {
    type Tx: DuplicationTx;

    fn begin(&self) -> impl Future<Output = Result<Self::Tx, StoreError>> + Send;
}

/// One open transaction. Dropping it without committing discards its writes.
pub trait DuplicationTx: Send {
    fn commit(self) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn rollback(self) -> impl Future<Output = Result<(), StoreError>> + Send;

    // -- Default containers -------------------------------------------------

    fn default_category(
        &mut self,
        course_id: DbId,
    ) -> impl Future<Output = Result<Option<AssessmentCategory>, StoreError>> + Send;

    fn default_tab(
        &mut self,
        category_id: DbId,
    ) -> impl Future<Output = Result<Option<AssessmentTab>, StoreError>> + Send;

    fn root_folder(
        &mut self,
        course_id: DbId,
    ) -> impl Future<Output = Result<Option<MaterialFolder>, StoreError>> + Send;

    fn find_level_by_threshold(
        &mut self,
        course_id: DbId,
        threshold: i32,
    ) -> impl Future<Output = Result<Option<Level>, StoreError>> + Send;

    // -- Lookups --------------------------------------------------------------

    fn find_tab(
        &mut self,
        id: DbId,
    ) -> impl Future<Output = Result<Option<AssessmentTab>, StoreError>> + Send;

    fn find_category(
        &mut self,
        id: DbId,
    ) -> impl Future<Output = Result<Option<AssessmentCategory>, StoreError>> + Send;

    fn find_assessment(
        &mut self,
        id: DbId,
    ) -> impl Future<Output = Result<Option<Assessment>, StoreError>> + Send;

    fn find_folder(
        &mut self,
        id: DbId,
    ) -> impl Future<Output = Result<Option<MaterialFolder>, StoreError>> + Send;

    fn list_questions(
        &mut self,
        assessment_id: DbId,
    ) -> impl Future<Output = Result<Vec<Question>, StoreError>> + Send;

    /// IDs of the skills a question is tagged with.
    fn list_question_skill_ids(
        &mut self,
        question_id: DbId,
    ) -> impl Future<Output = Result<Vec<DbId>, StoreError>> + Send;

    /// IDs of the questions tagged with a skill.
    fn list_skill_question_ids(
        &mut self,
        skill_id: DbId,
    ) -> impl Future<Output = Result<Vec<DbId>, StoreError>> + Send;

    fn list_materials(
        &mut self,
        folder_id: DbId,
    ) -> impl Future<Output = Result<Vec<Material>, StoreError>> + Send;

    // -- Inserts --------------------------------------------------------------

    fn insert_achievement(
        &mut self,
        input: &CreateAchievement,
    ) -> impl Future<Output = Result<Achievement, StoreError>> + Send;

    fn insert_category(
        &mut self,
        input: &CreateAssessmentCategory,
    ) -> impl Future<Output = Result<AssessmentCategory, StoreError>> + Send;

    fn insert_tab(
        &mut self,
        input: &CreateAssessmentTab,
    ) -> impl Future<Output = Result<AssessmentTab, StoreError>> + Send;

    fn insert_assessment(
        &mut self,
        input: &CreateAssessment,
    ) -> impl Future<Output = Result<Assessment, StoreError>> + Send;

    fn insert_question(
        &mut self,
        input: &CreateQuestion,
    ) -> impl Future<Output = Result<Question, StoreError>> + Send;

    fn insert_skill_branch(
        &mut self,
        input: &CreateSkillBranch,
    ) -> impl Future<Output = Result<SkillBranch, StoreError>> + Send;

    fn insert_skill(
        &mut self,
        input: &CreateSkill,
    ) -> impl Future<Output = Result<Skill, StoreError>> + Send;

    fn insert_forum(
        &mut self,
        input: &CreateForum,
    ) -> impl Future<Output = Result<Forum, StoreError>> + Send;

    fn insert_milestone(
        &mut self,
        input: &CreateLessonPlanMilestone,
    ) -> impl Future<Output = Result<LessonPlanMilestone, StoreError>> + Send;

    fn insert_event(
        &mut self,
        input: &CreateLessonPlanEvent,
    ) -> impl Future<Output = Result<LessonPlanEvent, StoreError>> + Send;

    fn insert_folder(
        &mut self,
        input: &CreateMaterialFolder,
    ) -> impl Future<Output = Result<MaterialFolder, StoreError>> + Send;

    fn insert_material(
        &mut self,
        input: &CreateMaterial,
    ) -> impl Future<Output = Result<Material, StoreError>> + Send;

    fn insert_level(
        &mut self,
        input: &CreateLevel,
    ) -> impl Future<Output = Result<Level, StoreError>> + Send;

    fn insert_survey(
        &mut self,
        input: &CreateSurvey,
    ) -> impl Future<Output = Result<Survey, StoreError>> + Send;

    fn insert_video(
        &mut self,
        input: &CreateVideo,
    ) -> impl Future<Output = Result<Video, StoreError>> + Send;

    /// Tag a question with a skill. Linking an existing pair is a no-op.
    fn link_question_skill(
        &mut self,
        question_id: DbId,
        skill_id: DbId,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}
