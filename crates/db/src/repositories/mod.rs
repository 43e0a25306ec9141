//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept any `PgExecutor` (a pool, a connection, or a transaction)
//! as the first argument.

pub mod achievement_repo;
pub mod assessment_category_repo;
pub mod assessment_repo;
pub mod assessment_tab_repo;
pub mod course_object_repo;
pub mod course_repo;
pub mod forum_repo;
pub mod lesson_plan_event_repo;
pub mod lesson_plan_milestone_repo;
pub mod level_repo;
pub mod material_folder_repo;
pub mod material_repo;
pub mod programming_auto_grading_repo;
pub mod question_repo;
pub mod skill_branch_repo;
pub mod skill_repo;
pub mod survey_repo;
pub mod video_repo;

pub use achievement_repo::AchievementRepo;
pub use assessment_category_repo::AssessmentCategoryRepo;
pub use assessment_repo::AssessmentRepo;
pub use assessment_tab_repo::AssessmentTabRepo;
pub use course_object_repo::CourseObjectRepo;
pub use course_repo::CourseRepo;
pub use forum_repo::ForumRepo;
pub use lesson_plan_event_repo::LessonPlanEventRepo;
pub use lesson_plan_milestone_repo::LessonPlanMilestoneRepo;
pub use level_repo::LevelRepo;
pub use material_folder_repo::MaterialFolderRepo;
pub use material_repo::MaterialRepo;
pub use programming_auto_grading_repo::ProgrammingAutoGradingRepo;
pub use question_repo::QuestionRepo;
pub use skill_branch_repo::SkillBranchRepo;
pub use skill_repo::SkillRepo;
pub use survey_repo::SurveyRepo;
pub use video_repo::VideoRepo;
