#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use courseware_core::duplication::ObjectKind;
use courseware_core::types::{DbId, Timestamp};
use courseware_db::models::achievement::{Achievement, CreateAchievement};
use courseware_db::models::assessment::{
    Assessment, AssessmentCategory, AssessmentTab, CreateAssessment, CreateAssessmentCategory,
    CreateAssessmentTab, CreateQuestion, Question,
};
use courseware_db::models::course::{Course, CreateCourse};
use courseware_db::models::forum::{CreateForum, Forum};
use courseware_db::models::lesson_plan::{
    CreateLessonPlanEvent, CreateLessonPlanMilestone, LessonPlanEvent, LessonPlanMilestone,
};
use courseware_db::models::level::{CreateLevel, Level};
use courseware_db::models::material::{
    CreateMaterial, CreateMaterialFolder, Material, MaterialFolder,
};
use courseware_db::models::skill::{CreateSkill, CreateSkillBranch, Skill, SkillBranch};
use courseware_db::models::survey::{CreateSurvey, Survey};
use courseware_db::models::video::{CreateVideo, Video};
use courseware_db::store::{CourseStore, DuplicationTx, MemoryState, MemoryStore, MemoryTx};
use courseware_duplication::{DuplicationContext, ObjectDuplicationService};

/// Build a UTC timestamp at 09:00 on the given day.
pub fn ts(year: i32, month: u32, day: u32) -> Timestamp {
    Utc.with_ymd_and_hms(year, month, day, 9, 0, 0).unwrap()
}

/// Start of the source course.
pub fn source_start() -> Timestamp {
    ts(2025, 1, 6)
}

/// Start of the target course, 217 days after the source.
pub fn target_start() -> Timestamp {
    ts(2025, 8, 11)
}

/// An in-memory store holding a source and a target course, each with its
/// default containers.
pub struct Fixture {
    pub store: MemoryStore,
    pub source: Course,
    pub target: Course,
}

impl Fixture {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let source = store
            .create_course(&CreateCourse {
                title: "Data Structures 2025 Spring".to_string(),
                start_at: source_start(),
            })
            .unwrap();
        let target = store
            .create_course(&CreateCourse {
                title: "Data Structures 2025 Fall".to_string(),
                start_at: target_start(),
            })
            .unwrap();
        Self {
            store,
            source,
            target,
        }
    }

    pub fn context(&self) -> DuplicationContext {
        DuplicationContext::new(self.source.clone(), self.target.clone())
    }

    pub fn service(&self) -> ObjectDuplicationService<MemoryStore> {
        ObjectDuplicationService::new(self.store.clone())
    }

    pub fn state(&self) -> MemoryState {
        self.store.snapshot()
    }

    /// Number of `kind` objects in the target course.
    pub fn target_count(&self, kind: ObjectKind) -> usize {
        self.state().count(kind, self.target.id)
    }

    pub fn source_root(&self) -> MaterialFolder {
        self.state().root_folder(self.source.id).unwrap().clone()
    }

    pub fn target_root(&self) -> MaterialFolder {
        self.state().root_folder(self.target.id).unwrap().clone()
    }

    pub fn target_default_category(&self) -> AssessmentCategory {
        self.state().default_category(self.target.id).unwrap().clone()
    }

    pub fn target_default_tab(&self) -> AssessmentTab {
        let category = self.target_default_category();
        self.state().default_tab(category.id).unwrap().clone()
    }

    async fn begin(&self) -> MemoryTx {
        self.store.begin().await.unwrap()
    }

    // -- Seeding the source course ------------------------------------------

    /// A category with its own folder under the source root.
    pub async fn category(&self, title: &str) -> AssessmentCategory {
        let root = self.source_root();
        let mut tx = self.begin().await;
        let folder = tx
            .insert_folder(&new_folder(self.source.id, Some(root.id), title))
            .await
            .unwrap();
        let category = tx
            .insert_category(&CreateAssessmentCategory {
                course_id: self.source.id,
                folder_id: folder.id,
                title: title.to_string(),
                weight: 1,
                is_default: false,
            })
            .await
            .unwrap();
        tx.commit().await.unwrap();
        category
    }

    pub async fn tab(&self, category: &AssessmentCategory, title: &str) -> AssessmentTab {
        let mut tx = self.begin().await;
        let tab = tx
            .insert_tab(&CreateAssessmentTab {
                course_id: self.source.id,
                category_id: category.id,
                title: title.to_string(),
                weight: 1,
                is_default: false,
            })
            .await
            .unwrap();
        tx.commit().await.unwrap();
        tab
    }

    /// An assessment in `tab` with its own folder under the category folder.
    pub async fn assessment(&self, tab: &AssessmentTab, title: &str) -> Assessment {
        let category_folder = self.state().categories[&tab.category_id].folder_id;
        let mut tx = self.begin().await;
        let folder = tx
            .insert_folder(&new_folder(self.source.id, Some(category_folder), title))
            .await
            .unwrap();
        let assessment = tx
            .insert_assessment(&CreateAssessment {
                course_id: self.source.id,
                tab_id: tab.id,
                folder_id: folder.id,
                title: title.to_string(),
                description: Some(format!("{title} description")),
                base_exp: 100,
                start_at: Some(ts(2025, 1, 13)),
                end_at: Some(ts(2025, 1, 20)),
                published: true,
            })
            .await
            .unwrap();
        tx.commit().await.unwrap();
        assessment
    }

    pub async fn question(&self, assessment: &Assessment, title: &str) -> Question {
        let mut tx = self.begin().await;
        let question = tx
            .insert_question(&CreateQuestion {
                assessment_id: assessment.id,
                title: title.to_string(),
                description: None,
                maximum_grade: 10.0,
                weight: 1,
            })
            .await
            .unwrap();
        tx.commit().await.unwrap();
        question
    }

    pub async fn skill_branch(&self, title: &str) -> SkillBranch {
        let mut tx = self.begin().await;
        let branch = tx
            .insert_skill_branch(&CreateSkillBranch {
                course_id: self.source.id,
                title: title.to_string(),
                description: None,
            })
            .await
            .unwrap();
        tx.commit().await.unwrap();
        branch
    }

    pub async fn skill(&self, branch: Option<&SkillBranch>, title: &str) -> Skill {
        let mut tx = self.begin().await;
        let skill = tx
            .insert_skill(&CreateSkill {
                course_id: self.source.id,
                skill_branch_id: branch.map(|b| b.id),
                title: title.to_string(),
                description: None,
            })
            .await
            .unwrap();
        tx.commit().await.unwrap();
        skill
    }

    pub async fn link(&self, question: &Question, skill: &Skill) {
        let mut tx = self.begin().await;
        tx.link_question_skill(question.id, skill.id).await.unwrap();
        tx.commit().await.unwrap();
    }

    /// A folder under `parent`, or under the source root when `None`.
    pub async fn folder(&self, parent: Option<&MaterialFolder>, name: &str) -> MaterialFolder {
        let parent_id = match parent {
            Some(parent) => parent.id,
            None => self.source_root().id,
        };
        let mut tx = self.begin().await;
        let folder = tx
            .insert_folder(&new_folder(self.source.id, Some(parent_id), name))
            .await
            .unwrap();
        tx.commit().await.unwrap();
        folder
    }

    pub async fn material(&self, folder_id: DbId, name: &str) -> Material {
        let mut tx = self.begin().await;
        let material = tx
            .insert_material(&CreateMaterial {
                folder_id,
                name: name.to_string(),
                description: None,
                file_name: Some(format!("{name}.pdf")),
            })
            .await
            .unwrap();
        tx.commit().await.unwrap();
        material
    }

    pub async fn achievement(&self, title: &str) -> Achievement {
        let mut tx = self.begin().await;
        let achievement = tx
            .insert_achievement(&CreateAchievement {
                course_id: self.source.id,
                title: title.to_string(),
                description: Some("Finish the first problem set".to_string()),
                badge_name: Some("star.png".to_string()),
                weight: 3,
                published: true,
            })
            .await
            .unwrap();
        tx.commit().await.unwrap();
        achievement
    }

    pub async fn forum(&self, name: &str) -> Forum {
        let mut tx = self.begin().await;
        let forum = tx
            .insert_forum(&CreateForum {
                course_id: self.source.id,
                name: name.to_string(),
                description: None,
            })
            .await
            .unwrap();
        tx.commit().await.unwrap();
        forum
    }

    pub async fn milestone(&self, title: &str, start_at: Timestamp) -> LessonPlanMilestone {
        let mut tx = self.begin().await;
        let milestone = tx
            .insert_milestone(&CreateLessonPlanMilestone {
                course_id: self.source.id,
                title: title.to_string(),
                description: None,
                start_at,
            })
            .await
            .unwrap();
        tx.commit().await.unwrap();
        milestone
    }

    pub async fn event(&self, title: &str, start_at: Timestamp) -> LessonPlanEvent {
        let mut tx = self.begin().await;
        let event = tx
            .insert_event(&CreateLessonPlanEvent {
                course_id: self.source.id,
                title: title.to_string(),
                description: None,
                location: Some("LT19".to_string()),
                event_type: "Lecture".to_string(),
                start_at,
                end_at: Some(start_at + chrono::Duration::hours(2)),
            })
            .await
            .unwrap();
        tx.commit().await.unwrap();
        event
    }

    pub async fn level(&self, threshold: i32) -> Level {
        let mut tx = self.begin().await;
        let level = tx
            .insert_level(&CreateLevel {
                course_id: self.source.id,
                experience_points_threshold: threshold,
            })
            .await
            .unwrap();
        tx.commit().await.unwrap();
        level
    }

    pub async fn survey(&self, title: &str) -> Survey {
        let mut tx = self.begin().await;
        let survey = tx
            .insert_survey(&CreateSurvey {
                course_id: self.source.id,
                title: title.to_string(),
                description: None,
                start_at: Some(ts(2025, 2, 3)),
                end_at: None,
                published: false,
            })
            .await
            .unwrap();
        tx.commit().await.unwrap();
        survey
    }

    pub async fn video(&self, title: &str) -> Video {
        let mut tx = self.begin().await;
        let video = tx
            .insert_video(&CreateVideo {
                course_id: self.source.id,
                title: title.to_string(),
                description: None,
                url: "https://videos.example.org/lecture-1".to_string(),
                start_at: Some(ts(2025, 1, 8)),
                published: true,
            })
            .await
            .unwrap();
        tx.commit().await.unwrap();
        video
    }
}

fn new_folder(course_id: DbId, parent_id: Option<DbId>, name: &str) -> CreateMaterialFolder {
    CreateMaterialFolder {
        course_id,
        parent_id,
        name: name.to_string(),
        description: None,
        start_at: None,
    }
}
