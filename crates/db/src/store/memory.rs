//! In-process duplication store.
//!
//! Holds every table in ordered maps behind a mutex. A transaction works on
//! a private copy of the state and merges its new rows back on commit, so a
//! failed run leaves nothing behind. Ids come from one shared sequence and
//! each course carries a version, so transactions writing to different
//! courses commit independently. Foreign keys and the unique constraints
//! that duplication can hit are checked on insert, reporting the same
//! constraint names as the PostgreSQL schema.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use courseware_core::duplication::ObjectKind;
use courseware_core::types::DbId;

use super::{CourseStore, DuplicationTx};
use crate::error::StoreError;
use crate::models::achievement::{Achievement, CreateAchievement};
use crate::models::assessment::{
    Assessment, AssessmentCategory, AssessmentTab, CreateAssessment, CreateAssessmentCategory,
    CreateAssessmentTab, CreateQuestion, Question,
};
use crate::models::course::{
    Course, CreateCourse, DEFAULT_CATEGORY_TITLE, DEFAULT_TAB_TITLE, ROOT_FOLDER_NAME,
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

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Every table of the store. Maps are keyed and ordered by id.
#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    /// Shared by every copy of the state, like a database sequence.
    ids: Arc<AtomicI64>,
    /// Bumped each time a commit writes to the course.
    course_versions: BTreeMap<DbId, u64>,
    pub courses: BTreeMap<DbId, Course>,
    pub achievements: BTreeMap<DbId, Achievement>,
    pub categories: BTreeMap<DbId, AssessmentCategory>,
    pub tabs: BTreeMap<DbId, AssessmentTab>,
    pub assessments: BTreeMap<DbId, Assessment>,
    pub questions: BTreeMap<DbId, Question>,
    pub skill_branches: BTreeMap<DbId, SkillBranch>,
    pub skills: BTreeMap<DbId, Skill>,
    pub forums: BTreeMap<DbId, Forum>,
    pub milestones: BTreeMap<DbId, LessonPlanMilestone>,
    pub events: BTreeMap<DbId, LessonPlanEvent>,
    pub folders: BTreeMap<DbId, MaterialFolder>,
    pub materials: BTreeMap<DbId, Material>,
    pub levels: BTreeMap<DbId, Level>,
    pub surveys: BTreeMap<DbId, Survey>,
    pub videos: BTreeMap<DbId, Video>,
    /// `(question_id, skill_id)` pairs.
    pub question_skills: BTreeSet<(DbId, DbId)>,
}

impl MemoryState {
    fn next_id(&self) -> DbId {
        self.ids.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn course_version(&self, course_id: DbId) -> u64 {
        self.course_versions.get(&course_id).copied().unwrap_or_default()
    }

    fn require_course(&self, course_id: DbId) -> Result<(), StoreError> {
        if self.courses.contains_key(&course_id) {
            Ok(())
        } else {
            Err(StoreError::NotFound {
                entity: "course",
                id: course_id,
            })
        }
    }

    fn require_folder(&self, folder_id: DbId) -> Result<(), StoreError> {
        if self.folders.contains_key(&folder_id) {
            Ok(())
        } else {
            Err(StoreError::NotFound {
                entity: "material_folder",
                id: folder_id,
            })
        }
    }

    /// Number of objects of `kind` in a course. Questions and materials are
    /// counted through their assessment and folder.
    pub fn count(&self, kind: ObjectKind, course_id: DbId) -> usize {
        match kind {
            ObjectKind::Achievement => count_in(&self.achievements, course_id, |o| o.course_id),
            ObjectKind::AssessmentCategory => {
                count_in(&self.categories, course_id, |o| o.course_id)
            }
            ObjectKind::AssessmentTab => count_in(&self.tabs, course_id, |o| o.course_id),
            ObjectKind::Assessment => count_in(&self.assessments, course_id, |o| o.course_id),
            ObjectKind::Question => self
                .questions
                .values()
                .filter(|q| {
                    self.assessments
                        .get(&q.assessment_id)
                        .is_some_and(|a| a.course_id == course_id)
                })
                .count(),
            ObjectKind::SkillBranch => count_in(&self.skill_branches, course_id, |o| o.course_id),
            ObjectKind::Skill => count_in(&self.skills, course_id, |o| o.course_id),
            ObjectKind::Forum => count_in(&self.forums, course_id, |o| o.course_id),
            ObjectKind::LessonPlanMilestone => {
                count_in(&self.milestones, course_id, |o| o.course_id)
            }
            ObjectKind::LessonPlanEvent => count_in(&self.events, course_id, |o| o.course_id),
            ObjectKind::MaterialFolder => count_in(&self.folders, course_id, |o| o.course_id),
            ObjectKind::Material => self
                .materials
                .values()
                .filter(|m| {
                    self.folders
                        .get(&m.folder_id)
                        .is_some_and(|f| f.course_id == course_id)
                })
                .count(),
            ObjectKind::Level => count_in(&self.levels, course_id, |o| o.course_id),
            ObjectKind::Survey => count_in(&self.surveys, course_id, |o| o.course_id),
            ObjectKind::Video => count_in(&self.videos, course_id, |o| o.course_id),
        }
    }

    pub fn default_category(&self, course_id: DbId) -> Option<&AssessmentCategory> {
        self.categories
            .values()
            .find(|c| c.course_id == course_id && c.is_default)
    }

    pub fn default_tab(&self, category_id: DbId) -> Option<&AssessmentTab> {
        self.tabs
            .values()
            .find(|t| t.category_id == category_id && t.is_default)
    }

    pub fn root_folder(&self, course_id: DbId) -> Option<&MaterialFolder> {
        self.folders
            .values()
            .find(|f| f.course_id == course_id && f.parent_id.is_none())
    }

    pub fn tabs_of(&self, category_id: DbId) -> Vec<&AssessmentTab> {
        self.tabs
            .values()
            .filter(|t| t.category_id == category_id)
            .collect()
    }

    pub fn questions_of(&self, assessment_id: DbId) -> Vec<&Question> {
        self.questions
            .values()
            .filter(|q| q.assessment_id == assessment_id)
            .collect()
    }

    pub fn skills_of(&self, skill_branch_id: DbId) -> Vec<&Skill> {
        self.skills
            .values()
            .filter(|s| s.skill_branch_id == Some(skill_branch_id))
            .collect()
    }

    pub fn subfolders_of(&self, folder_id: DbId) -> Vec<&MaterialFolder> {
        self.folders
            .values()
            .filter(|f| f.parent_id == Some(folder_id))
            .collect()
    }

    pub fn materials_in(&self, folder_id: DbId) -> Vec<&Material> {
        self.materials
            .values()
            .filter(|m| m.folder_id == folder_id)
            .collect()
    }

    pub fn skill_ids_of_question(&self, question_id: DbId) -> Vec<DbId> {
        self.question_skills
            .iter()
            .filter(|(q, _)| *q == question_id)
            .map(|(_, s)| *s)
            .collect()
    }

    pub fn question_ids_of_skill(&self, skill_id: DbId) -> Vec<DbId> {
        self.question_skills
            .iter()
            .filter(|(_, s)| *s == skill_id)
            .map(|(q, _)| *q)
            .collect()
    }
}

impl MemoryState {
    /// Courses that own a row of `self` missing from `committed`.
    fn courses_written(&self, committed: &MemoryState) -> BTreeSet<DbId> {
        let mut courses = BTreeSet::new();
        let mut note = |course_id: Option<DbId>| courses.extend(course_id);

        added(&self.achievements, &committed.achievements, |o| note(Some(o.course_id)));
        added(&self.categories, &committed.categories, |o| note(Some(o.course_id)));
        added(&self.tabs, &committed.tabs, |o| note(Some(o.course_id)));
        added(&self.assessments, &committed.assessments, |o| note(Some(o.course_id)));
        added(&self.questions, &committed.questions, |o| {
            note(self.assessments.get(&o.assessment_id).map(|a| a.course_id))
        });
        added(&self.skill_branches, &committed.skill_branches, |o| note(Some(o.course_id)));
        added(&self.skills, &committed.skills, |o| note(Some(o.course_id)));
        added(&self.forums, &committed.forums, |o| note(Some(o.course_id)));
        added(&self.milestones, &committed.milestones, |o| note(Some(o.course_id)));
        added(&self.events, &committed.events, |o| note(Some(o.course_id)));
        added(&self.folders, &committed.folders, |o| note(Some(o.course_id)));
        added(&self.materials, &committed.materials, |o| {
            note(self.folders.get(&o.folder_id).map(|f| f.course_id))
        });
        added(&self.levels, &committed.levels, |o| note(Some(o.course_id)));
        added(&self.surveys, &committed.surveys, |o| note(Some(o.course_id)));
        added(&self.videos, &committed.videos, |o| note(Some(o.course_id)));
        for (question_id, _) in self.question_skills.difference(&committed.question_skills) {
            note(
                self.questions
                    .get(question_id)
                    .and_then(|q| self.assessments.get(&q.assessment_id))
                    .map(|a| a.course_id),
            );
        }
        courses
    }

    /// Copy the rows of `working` that `self` does not have yet.
    fn merge(&mut self, working: MemoryState) {
        merge_rows(&mut self.achievements, working.achievements);
        merge_rows(&mut self.categories, working.categories);
        merge_rows(&mut self.tabs, working.tabs);
        merge_rows(&mut self.assessments, working.assessments);
        merge_rows(&mut self.questions, working.questions);
        merge_rows(&mut self.skill_branches, working.skill_branches);
        merge_rows(&mut self.skills, working.skills);
        merge_rows(&mut self.forums, working.forums);
        merge_rows(&mut self.milestones, working.milestones);
        merge_rows(&mut self.events, working.events);
        merge_rows(&mut self.folders, working.folders);
        merge_rows(&mut self.materials, working.materials);
        merge_rows(&mut self.levels, working.levels);
        merge_rows(&mut self.surveys, working.surveys);
        merge_rows(&mut self.videos, working.videos);
        self.question_skills.extend(working.question_skills);
    }
}

fn added<T>(ours: &BTreeMap<DbId, T>, committed: &BTreeMap<DbId, T>, mut f: impl FnMut(&T)) {
    for (id, row) in ours {
        if !committed.contains_key(id) {
            f(row);
        }
    }
}

fn merge_rows<T>(into: &mut BTreeMap<DbId, T>, from: BTreeMap<DbId, T>) {
    for (id, row) in from {
        into.entry(id).or_insert(row);
    }
}

fn count_in<T>(
    table: &BTreeMap<DbId, T>,
    course_id: DbId,
    course_of: impl Fn(&T) -> DbId,
) -> usize {
    table.values().filter(|row| course_of(row) == course_id).count()
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Shared handle to an in-process store. Clones see the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the committed state.
    pub fn snapshot(&self) -> MemoryState {
        self.lock().clone()
    }

    /// Create a course with its default containers, mirroring
    /// [`CourseRepo::create`](crate::repositories::CourseRepo::create).
    pub fn create_course(&self, input: &CreateCourse) -> Result<Course, StoreError> {
        let mut state = self.lock();
        let now = Utc::now();
        let course = Course {
            id: state.next_id(),
            title: input.title.clone(),
            start_at: input.start_at,
            settings: serde_json::json!({}),
            created_at: now,
            updated_at: now,
        };
        state.courses.insert(course.id, course.clone());

        let root = insert_folder(
            &mut state,
            &CreateMaterialFolder {
                course_id: course.id,
                parent_id: None,
                name: ROOT_FOLDER_NAME.to_string(),
                description: None,
                start_at: None,
            },
        )?;
        let category_folder = insert_folder(
            &mut state,
            &CreateMaterialFolder {
                course_id: course.id,
                parent_id: Some(root.id),
                name: DEFAULT_CATEGORY_TITLE.to_string(),
                description: None,
                start_at: None,
            },
        )?;
        let category = insert_category(
            &mut state,
            &CreateAssessmentCategory {
                course_id: course.id,
                folder_id: category_folder.id,
                title: DEFAULT_CATEGORY_TITLE.to_string(),
                weight: 0,
                is_default: true,
            },
        )?;
        insert_tab(
            &mut state,
            &CreateAssessmentTab {
                course_id: course.id,
                category_id: category.id,
                title: DEFAULT_TAB_TITLE.to_string(),
                weight: 0,
                is_default: true,
            },
        )?;
        insert_level(
            &mut state,
            &CreateLevel {
                course_id: course.id,
                experience_points_threshold: 0,
            },
        )?;

        *state.course_versions.entry(course.id).or_default() += 1;
        Ok(course)
    }
}

impl CourseStore for MemoryStore {
    type Tx = MemoryTx;

    async fn begin(&self) -> Result<MemoryTx, StoreError> {
        Ok(MemoryTx {
            store: self.clone(),
            working: self.snapshot(),
        })
    }
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A private working copy of the store.
///
/// Commit fails with a conflict if another transaction wrote to one of the
/// same courses since this one began.
#[derive(Debug)]
pub struct MemoryTx {
    store: MemoryStore,
    working: MemoryState,
}

impl DuplicationTx for MemoryTx {
    async fn commit(self) -> Result<(), StoreError> {
        let mut state = self.store.lock();
        let courses = self.working.courses_written(&state);
        for &course_id in &courses {
            let base_version = self.working.course_version(course_id);
            let current_version = state.course_version(course_id);
            if base_version != current_version {
                tracing::warn!(
                    course_id,
                    base_version,
                    current_version,
                    "Course changed since the transaction began"
                );
                return Err(StoreError::Conflict(format!(
                    "concurrent commit to course #{course_id}"
                )));
            }
        }
        state.merge(self.working);
        for course_id in courses {
            *state.course_versions.entry(course_id).or_default() += 1;
        }
        Ok(())
    }

    async fn rollback(self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn default_category(
        &mut self,
        course_id: DbId,
    ) -> Result<Option<AssessmentCategory>, StoreError> {
        Ok(self.working.default_category(course_id).cloned())
    }

    async fn default_tab(
        &mut self,
        category_id: DbId,
    ) -> Result<Option<AssessmentTab>, StoreError> {
        Ok(self.working.default_tab(category_id).cloned())
    }

    async fn root_folder(&mut self, course_id: DbId) -> Result<Option<MaterialFolder>, StoreError> {
        Ok(self.working.root_folder(course_id).cloned())
    }

    async fn find_level_by_threshold(
        &mut self,
        course_id: DbId,
        threshold: i32,
    ) -> Result<Option<Level>, StoreError> {
        Ok(self
            .working
            .levels
            .values()
            .find(|l| l.course_id == course_id && l.experience_points_threshold == threshold)
            .cloned())
    }

    async fn find_tab(&mut self, id: DbId) -> Result<Option<AssessmentTab>, StoreError> {
        Ok(self.working.tabs.get(&id).cloned())
    }

    async fn find_category(&mut self, id: DbId) -> Result<Option<AssessmentCategory>, StoreError> {
        Ok(self.working.categories.get(&id).cloned())
    }

    async fn find_assessment(&mut self, id: DbId) -> Result<Option<Assessment>, StoreError> {
        Ok(self.working.assessments.get(&id).cloned())
    }

    async fn find_folder(&mut self, id: DbId) -> Result<Option<MaterialFolder>, StoreError> {
        Ok(self.working.folders.get(&id).cloned())
    }

    async fn list_questions(&mut self, assessment_id: DbId) -> Result<Vec<Question>, StoreError> {
        Ok(self
            .working
            .questions_of(assessment_id)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn list_question_skill_ids(
        &mut self,
        question_id: DbId,
    ) -> Result<Vec<DbId>, StoreError> {
        Ok(self.working.skill_ids_of_question(question_id))
    }

    async fn list_skill_question_ids(&mut self, skill_id: DbId) -> Result<Vec<DbId>, StoreError> {
        Ok(self.working.question_ids_of_skill(skill_id))
    }

    async fn list_materials(&mut self, folder_id: DbId) -> Result<Vec<Material>, StoreError> {
        Ok(self
            .working
            .materials_in(folder_id)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn insert_achievement(
        &mut self,
        input: &CreateAchievement,
    ) -> Result<Achievement, StoreError> {
        let state = &mut self.working;
        state.require_course(input.course_id)?;
        let now = Utc::now();
        let row = Achievement {
            id: state.next_id(),
            course_id: input.course_id,
            title: input.title.clone(),
            description: input.description.clone(),
            badge_name: input.badge_name.clone(),
            weight: input.weight,
            published: input.published,
            created_at: now,
            updated_at: now,
        };
        state.achievements.insert(row.id, row.clone());
        Ok(row)
    }

    async fn insert_category(
        &mut self,
        input: &CreateAssessmentCategory,
    ) -> Result<AssessmentCategory, StoreError> {
        insert_category(&mut self.working, input)
    }

    async fn insert_tab(
        &mut self,
        input: &CreateAssessmentTab,
    ) -> Result<AssessmentTab, StoreError> {
        insert_tab(&mut self.working, input)
    }

    async fn insert_assessment(
        &mut self,
        input: &CreateAssessment,
    ) -> Result<Assessment, StoreError> {
        let state = &mut self.working;
        state.require_course(input.course_id)?;
        state.require_folder(input.folder_id)?;
        if !state.tabs.contains_key(&input.tab_id) {
            return Err(StoreError::NotFound {
                entity: "assessment_tab",
                id: input.tab_id,
            });
        }
        let now = Utc::now();
        let row = Assessment {
            id: state.next_id(),
            course_id: input.course_id,
            tab_id: input.tab_id,
            folder_id: input.folder_id,
            title: input.title.clone(),
            description: input.description.clone(),
            base_exp: input.base_exp,
            start_at: input.start_at,
            end_at: input.end_at,
            published: input.published,
            created_at: now,
            updated_at: now,
        };
        state.assessments.insert(row.id, row.clone());
        Ok(row)
    }

    async fn insert_question(&mut self, input: &CreateQuestion) -> Result<Question, StoreError> {
        let state = &mut self.working;
        if !state.assessments.contains_key(&input.assessment_id) {
            return Err(StoreError::NotFound {
                entity: "assessment",
                id: input.assessment_id,
            });
        }
        let now = Utc::now();
        let row = Question {
            id: state.next_id(),
            assessment_id: input.assessment_id,
            title: input.title.clone(),
            description: input.description.clone(),
            maximum_grade: input.maximum_grade,
            weight: input.weight,
            created_at: now,
            updated_at: now,
        };
        state.questions.insert(row.id, row.clone());
        Ok(row)
    }

    async fn insert_skill_branch(
        &mut self,
        input: &CreateSkillBranch,
    ) -> Result<SkillBranch, StoreError> {
        let state = &mut self.working;
        state.require_course(input.course_id)?;
        let now = Utc::now();
        let row = SkillBranch {
            id: state.next_id(),
            course_id: input.course_id,
            title: input.title.clone(),
            description: input.description.clone(),
            created_at: now,
            updated_at: now,
        };
        state.skill_branches.insert(row.id, row.clone());
        Ok(row)
    }

    async fn insert_skill(&mut self, input: &CreateSkill) -> Result<Skill, StoreError> {
        let state = &mut self.working;
        state.require_course(input.course_id)?;
        if let Some(branch_id) = input.skill_branch_id {
            if !state.skill_branches.contains_key(&branch_id) {
                return Err(StoreError::NotFound {
                    entity: "skill_branch",
                    id: branch_id,
                });
            }
        }
        let now = Utc::now();
        let row = Skill {
            id: state.next_id(),
            course_id: input.course_id,
            skill_branch_id: input.skill_branch_id,
            title: input.title.clone(),
            description: input.description.clone(),
            created_at: now,
            updated_at: now,
        };
        state.skills.insert(row.id, row.clone());
        Ok(row)
    }

    async fn insert_forum(&mut self, input: &CreateForum) -> Result<Forum, StoreError> {
        let state = &mut self.working;
        state.require_course(input.course_id)?;
        let now = Utc::now();
        let row = Forum {
            id: state.next_id(),
            course_id: input.course_id,
            name: input.name.clone(),
            description: input.description.clone(),
            created_at: now,
            updated_at: now,
        };
        state.forums.insert(row.id, row.clone());
        Ok(row)
    }

    async fn insert_milestone(
        &mut self,
        input: &CreateLessonPlanMilestone,
    ) -> Result<LessonPlanMilestone, StoreError> {
        let state = &mut self.working;
        state.require_course(input.course_id)?;
        let now = Utc::now();
        let row = LessonPlanMilestone {
            id: state.next_id(),
            course_id: input.course_id,
            title: input.title.clone(),
            description: input.description.clone(),
            start_at: input.start_at,
            created_at: now,
            updated_at: now,
        };
        state.milestones.insert(row.id, row.clone());
        Ok(row)
    }

    async fn insert_event(
        &mut self,
        input: &CreateLessonPlanEvent,
    ) -> Result<LessonPlanEvent, StoreError> {
        let state = &mut self.working;
        state.require_course(input.course_id)?;
        let now = Utc::now();
        let row = LessonPlanEvent {
            id: state.next_id(),
            course_id: input.course_id,
            title: input.title.clone(),
            description: input.description.clone(),
            location: input.location.clone(),
            event_type: input.event_type.clone(),
            start_at: input.start_at,
            end_at: input.end_at,
            created_at: now,
            updated_at: now,
        };
        state.events.insert(row.id, row.clone());
        Ok(row)
    }

    async fn insert_folder(
        &mut self,
        input: &CreateMaterialFolder,
    ) -> Result<MaterialFolder, StoreError> {
        insert_folder(&mut self.working, input)
    }

    async fn insert_material(&mut self, input: &CreateMaterial) -> Result<Material, StoreError> {
        let state = &mut self.working;
        state.require_folder(input.folder_id)?;
        let now = Utc::now();
        let row = Material {
            id: state.next_id(),
            folder_id: input.folder_id,
            name: input.name.clone(),
            description: input.description.clone(),
            file_name: input.file_name.clone(),
            created_at: now,
            updated_at: now,
        };
        state.materials.insert(row.id, row.clone());
        Ok(row)
    }

    async fn insert_level(&mut self, input: &CreateLevel) -> Result<Level, StoreError> {
        insert_level(&mut self.working, input)
    }

    async fn insert_survey(&mut self, input: &CreateSurvey) -> Result<Survey, StoreError> {
        let state = &mut self.working;
        state.require_course(input.course_id)?;
        let now = Utc::now();
        let row = Survey {
            id: state.next_id(),
            course_id: input.course_id,
            title: input.title.clone(),
            description: input.description.clone(),
            start_at: input.start_at,
            end_at: input.end_at,
            published: input.published,
            created_at: now,
            updated_at: now,
        };
        state.surveys.insert(row.id, row.clone());
        Ok(row)
    }

    async fn insert_video(&mut self, input: &CreateVideo) -> Result<Video, StoreError> {
        let state = &mut self.working;
        state.require_course(input.course_id)?;
        let now = Utc::now();
        let row = Video {
            id: state.next_id(),
            course_id: input.course_id,
            title: input.title.clone(),
            description: input.description.clone(),
            url: input.url.clone(),
            start_at: input.start_at,
            published: input.published,
            created_at: now,
            updated_at: now,
        };
        state.videos.insert(row.id, row.clone());
        Ok(row)
    }

    async fn link_question_skill(
        &mut self,
        question_id: DbId,
        skill_id: DbId,
    ) -> Result<(), StoreError> {
        let state = &mut self.working;
        if !state.questions.contains_key(&question_id) {
            return Err(StoreError::NotFound {
                entity: "assessment_question",
                id: question_id,
            });
        }
        if !state.skills.contains_key(&skill_id) {
            return Err(StoreError::NotFound {
                entity: "skill",
                id: skill_id,
            });
        }
        state.question_skills.insert((question_id, skill_id));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Inserts shared with course creation
// ---------------------------------------------------------------------------

fn insert_folder(
    state: &mut MemoryState,
    input: &CreateMaterialFolder,
) -> Result<MaterialFolder, StoreError> {
    state.require_course(input.course_id)?;
    match input.parent_id {
        Some(parent_id) => state.require_folder(parent_id)?,
        None if state.root_folder(input.course_id).is_some() => {
            return Err(StoreError::Conflict(
                "uq_material_folders_course_root".to_string(),
            ));
        }
        None => {}
    }
    let now = Utc::now();
    let row = MaterialFolder {
        id: state.next_id(),
        course_id: input.course_id,
        parent_id: input.parent_id,
        name: input.name.clone(),
        description: input.description.clone(),
        start_at: input.start_at,
        created_at: now,
        updated_at: now,
    };
    state.folders.insert(row.id, row.clone());
    Ok(row)
}

fn insert_category(
    state: &mut MemoryState,
    input: &CreateAssessmentCategory,
) -> Result<AssessmentCategory, StoreError> {
    state.require_course(input.course_id)?;
    state.require_folder(input.folder_id)?;
    if input.is_default && state.default_category(input.course_id).is_some() {
        return Err(StoreError::Conflict(
            "uq_assessment_categories_course_default".to_string(),
        ));
    }
    let now = Utc::now();
    let row = AssessmentCategory {
        id: state.next_id(),
        course_id: input.course_id,
        folder_id: input.folder_id,
        title: input.title.clone(),
        weight: input.weight,
        is_default: input.is_default,
        created_at: now,
        updated_at: now,
    };
    state.categories.insert(row.id, row.clone());
    Ok(row)
}

fn insert_tab(
    state: &mut MemoryState,
    input: &CreateAssessmentTab,
) -> Result<AssessmentTab, StoreError> {
    state.require_course(input.course_id)?;
    if !state.categories.contains_key(&input.category_id) {
        return Err(StoreError::NotFound {
            entity: "assessment_category",
            id: input.category_id,
        });
    }
    if input.is_default && state.default_tab(input.category_id).is_some() {
        return Err(StoreError::Conflict(
            "uq_assessment_tabs_category_default".to_string(),
        ));
    }
    let now = Utc::now();
    let row = AssessmentTab {
        id: state.next_id(),
        course_id: input.course_id,
        category_id: input.category_id,
        title: input.title.clone(),
        weight: input.weight,
        is_default: input.is_default,
        created_at: now,
        updated_at: now,
    };
    state.tabs.insert(row.id, row.clone());
    Ok(row)
}

fn insert_level(state: &mut MemoryState, input: &CreateLevel) -> Result<Level, StoreError> {
    state.require_course(input.course_id)?;
    let taken = state.levels.values().any(|l| {
        l.course_id == input.course_id
            && l.experience_points_threshold == input.experience_points_threshold
    });
    if taken {
        return Err(StoreError::Conflict("uq_levels_course_threshold".to_string()));
    }
    let now = Utc::now();
    let row = Level {
        id: state.next_id(),
        course_id: input.course_id,
        experience_points_threshold: input.experience_points_threshold,
        created_at: now,
        updated_at: now,
    };
    state.levels.insert(row.id, row.clone());
    Ok(row)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn course(store: &MemoryStore, title: &str) -> Course {
        store
            .create_course(&CreateCourse {
                title: title.to_string(),
                start_at: Utc::now(),
            })
            .unwrap()
    }

    #[test]
    fn course_gets_default_containers() {
        let store = MemoryStore::new();
        let course = course(&store, "Algorithms");
        let state = store.snapshot();

        let category = state.default_category(course.id).unwrap();
        assert_eq!(category.title, DEFAULT_CATEGORY_TITLE);
        let tab = state.default_tab(category.id).unwrap();
        assert_eq!(tab.title, DEFAULT_TAB_TITLE);

        let root = state.root_folder(course.id).unwrap();
        assert_eq!(state.folders[&category.folder_id].parent_id, Some(root.id));
        assert_eq!(state.count(ObjectKind::Level, course.id), 1);
    }

    #[tokio::test]
    async fn uncommitted_writes_are_discarded() {
        let store = MemoryStore::new();
        let course = course(&store, "Compilers");

        let mut tx = store.begin().await.unwrap();
        tx.insert_forum(&forum(course.id, "General")).await.unwrap();
        drop(tx);
        assert_eq!(store.snapshot().count(ObjectKind::Forum, course.id), 0);

        let mut tx = store.begin().await.unwrap();
        tx.insert_forum(&forum(course.id, "General")).await.unwrap();
        tx.rollback().await.unwrap();
        assert_eq!(store.snapshot().count(ObjectKind::Forum, course.id), 0);
    }

    #[tokio::test]
    async fn committed_writes_are_visible() {
        let store = MemoryStore::new();
        let course = course(&store, "Networks");

        let mut tx = store.begin().await.unwrap();
        tx.insert_level(&CreateLevel {
            course_id: course.id,
            experience_points_threshold: 100,
        })
        .await
        .unwrap();
        tx.commit().await.unwrap();

        assert_eq!(store.snapshot().count(ObjectKind::Level, course.id), 2);
    }

    #[tokio::test]
    async fn duplicate_level_threshold_conflicts() {
        let store = MemoryStore::new();
        let course = course(&store, "Databases");

        let mut tx = store.begin().await.unwrap();
        let err = tx
            .insert_level(&CreateLevel {
                course_id: course.id,
                experience_points_threshold: 0,
            })
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn tab_requires_existing_category() {
        let store = MemoryStore::new();
        let course = course(&store, "Graphics");

        let mut tx = store.begin().await.unwrap();
        let result = tx
            .insert_tab(&CreateAssessmentTab {
                course_id: course.id,
                category_id: 9_999,
                title: "Labs".into(),
                weight: 0,
                is_default: false,
            })
            .await;
        assert_matches!(
            result,
            Err(StoreError::NotFound {
                entity: "assessment_category",
                id: 9_999
            })
        );
    }

    #[tokio::test]
    async fn second_root_folder_conflicts() {
        let store = MemoryStore::new();
        let course = course(&store, "Security");

        let mut tx = store.begin().await.unwrap();
        let result = tx
            .insert_folder(&CreateMaterialFolder {
                course_id: course.id,
                parent_id: None,
                name: "Another root".into(),
                description: None,
                start_at: None,
            })
            .await;
        assert_matches!(
            result,
            Err(StoreError::Conflict(name)) if name == "uq_material_folders_course_root"
        );
    }

    fn forum(course_id: DbId, name: &str) -> CreateForum {
        CreateForum {
            course_id,
            name: name.into(),
            description: None,
        }
    }

    #[tokio::test]
    async fn concurrent_commit_to_same_course_is_rejected() {
        let store = MemoryStore::new();
        let course = course(&store, "Robotics");

        let mut first = store.begin().await.unwrap();
        first.insert_forum(&forum(course.id, "General")).await.unwrap();
        let mut second = store.begin().await.unwrap();
        second
            .insert_skill_branch(&CreateSkillBranch {
                course_id: course.id,
                title: "Kinematics".into(),
                description: None,
            })
            .await
            .unwrap();
        second.commit().await.unwrap();

        assert_matches!(first.commit().await, Err(StoreError::Conflict(_)));
        let state = store.snapshot();
        assert_eq!(state.count(ObjectKind::Forum, course.id), 0);
        assert_eq!(state.count(ObjectKind::SkillBranch, course.id), 1);
    }

    #[tokio::test]
    async fn commits_to_different_courses_are_independent() {
        let store = MemoryStore::new();
        let vision = course(&store, "Vision");
        let speech = course(&store, "Speech");

        let mut first = store.begin().await.unwrap();
        let mut second = store.begin().await.unwrap();
        let a = first.insert_forum(&forum(vision.id, "Vision Q&A")).await.unwrap();
        let b = second.insert_forum(&forum(speech.id, "Speech Q&A")).await.unwrap();
        assert_ne!(a.id, b.id);

        let unrelated = course(&store, "Unrelated");
        second.commit().await.unwrap();
        first.commit().await.unwrap();

        let state = store.snapshot();
        assert_eq!(state.forums[&a.id].course_id, vision.id);
        assert_eq!(state.forums[&b.id].course_id, speech.id);
        assert!(state.courses.contains_key(&unrelated.id));
        assert!(state.root_folder(unrelated.id).is_some());
    }

    #[tokio::test]
    async fn transaction_without_writes_always_commits() {
        let store = MemoryStore::new();
        let course = course(&store, "Ethics");

        let idle = store.begin().await.unwrap();
        let mut busy = store.begin().await.unwrap();
        busy.insert_forum(&forum(course.id, "General")).await.unwrap();
        busy.commit().await.unwrap();

        idle.commit().await.unwrap();
        assert_eq!(store.snapshot().count(ObjectKind::Forum, course.id), 1);
    }

    #[tokio::test]
    async fn question_skill_links_are_idempotent() {
        let store = MemoryStore::new();
        let course = course(&store, "Statistics");
        let state = store.snapshot();
        let tab = state
            .default_tab(state.default_category(course.id).unwrap().id)
            .unwrap()
            .clone();
        let root = state.root_folder(course.id).unwrap().clone();

        let mut tx = store.begin().await.unwrap();
        let assessment = tx
            .insert_assessment(&CreateAssessment {
                course_id: course.id,
                tab_id: tab.id,
                folder_id: root.id,
                title: "Quiz".into(),
                description: None,
                base_exp: 0,
                start_at: None,
                end_at: None,
                published: false,
            })
            .await
            .unwrap();
        let question = tx
            .insert_question(&CreateQuestion {
                assessment_id: assessment.id,
                title: "Q1".into(),
                description: None,
                maximum_grade: 10.0,
                weight: 1,
            })
            .await
            .unwrap();
        let skill = tx
            .insert_skill(&CreateSkill {
                course_id: course.id,
                skill_branch_id: None,
                title: "Inference".into(),
                description: None,
            })
            .await
            .unwrap();

        tx.link_question_skill(question.id, skill.id).await.unwrap();
        tx.link_question_skill(question.id, skill.id).await.unwrap();

        assert_eq!(tx.list_question_skill_ids(question.id).await.unwrap(), vec![skill.id]);
        assert_eq!(tx.list_skill_question_ids(skill.id).await.unwrap(), vec![question.id]);
    }
}
