//! Tagged union over every duplicable course object.

use courseware_core::duplication::{ObjectKey, ObjectKind};
use courseware_core::types::DbId;
use serde::Serialize;

use super::achievement::Achievement;
use super::assessment::{Assessment, AssessmentCategory, AssessmentTab, Question};
use super::forum::Forum;
use super::lesson_plan::{LessonPlanEvent, LessonPlanMilestone};
use super::level::Level;
use super::material::{Material, MaterialFolder};
use super::skill::{Skill, SkillBranch};
use super::survey::Survey;
use super::video::Video;

macro_rules! define_course_objects {
    (
        $( $variant:ident($ty:ty) => $accessor:ident ),+ $(,)?
    ) => {
        /// One loaded course object of any duplicable kind.
        ///
        /// Variant names match [`ObjectKind`] variants one to one.
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(tag = "kind", content = "object", rename_all = "snake_case")]
        pub enum CourseObject {
            $( $variant($ty) ),+
        }

        impl CourseObject {
            pub fn kind(&self) -> ObjectKind {
                match self {
                    $( CourseObject::$variant(_) => ObjectKind::$variant ),+
                }
            }

            pub fn id(&self) -> DbId {
                match self {
                    $( CourseObject::$variant(object) => object.id ),+
                }
            }

            $(
                pub fn $accessor(&self) -> Option<&$ty> {
                    match self {
                        CourseObject::$variant(object) => Some(object),
                        _ => None,
                    }
                }
            )+
        }

        $(
            impl From<$ty> for CourseObject {
                fn from(object: $ty) -> Self {
                    CourseObject::$variant(object)
                }
            }
        )+
    };
}

define_course_objects! {
    Achievement(Achievement) => as_achievement,
    AssessmentCategory(AssessmentCategory) => as_category,
    AssessmentTab(AssessmentTab) => as_tab,
    Assessment(Assessment) => as_assessment,
    Question(Question) => as_question,
    SkillBranch(SkillBranch) => as_skill_branch,
    Skill(Skill) => as_skill,
    Forum(Forum) => as_forum,
    LessonPlanMilestone(LessonPlanMilestone) => as_milestone,
    LessonPlanEvent(LessonPlanEvent) => as_event,
    MaterialFolder(MaterialFolder) => as_folder,
    Material(Material) => as_material,
    Level(Level) => as_level,
    Survey(Survey) => as_survey,
    Video(Video) => as_video,
}

impl CourseObject {
    pub fn key(&self) -> ObjectKey {
        ObjectKey::new(self.kind(), self.id())
    }

    /// Owning course, for objects that carry one directly.
    pub fn course_id(&self) -> Option<DbId> {
        match self {
            CourseObject::Achievement(o) => Some(o.course_id),
            CourseObject::AssessmentCategory(o) => Some(o.course_id),
            CourseObject::AssessmentTab(o) => Some(o.course_id),
            CourseObject::Assessment(o) => Some(o.course_id),
            CourseObject::SkillBranch(o) => Some(o.course_id),
            CourseObject::Skill(o) => Some(o.course_id),
            CourseObject::Forum(o) => Some(o.course_id),
            CourseObject::LessonPlanMilestone(o) => Some(o.course_id),
            CourseObject::LessonPlanEvent(o) => Some(o.course_id),
            CourseObject::MaterialFolder(o) => Some(o.course_id),
            CourseObject::Level(o) => Some(o.course_id),
            CourseObject::Survey(o) => Some(o.course_id),
            CourseObject::Video(o) => Some(o.course_id),
            CourseObject::Question(_) | CourseObject::Material(_) => None,
        }
    }

    /// Human-readable label for logs.
    pub fn label(&self) -> String {
        match self {
            CourseObject::Achievement(o) => o.title.clone(),
            CourseObject::AssessmentCategory(o) => o.title.clone(),
            CourseObject::AssessmentTab(o) => o.title.clone(),
            CourseObject::Assessment(o) => o.title.clone(),
            CourseObject::Question(o) => o.title.clone(),
            CourseObject::SkillBranch(o) => o.title.clone(),
            CourseObject::Skill(o) => o.title.clone(),
            CourseObject::Forum(o) => o.name.clone(),
            CourseObject::LessonPlanMilestone(o) => o.title.clone(),
            CourseObject::LessonPlanEvent(o) => o.title.clone(),
            CourseObject::MaterialFolder(o) => o.name.clone(),
            CourseObject::Material(o) => o.name.clone(),
            CourseObject::Level(o) => format!("Level {}", o.experience_points_threshold),
            CourseObject::Survey(o) => o.title.clone(),
            CourseObject::Video(o) => o.title.clone(),
        }
    }

    /// Key of the container this object sits in, if any.
    pub fn parent_key(&self) -> Option<ObjectKey> {
        match self {
            CourseObject::AssessmentTab(o) => Some(ObjectKey::new(
                ObjectKind::AssessmentCategory,
                o.category_id,
            )),
            CourseObject::Assessment(o) => {
                Some(ObjectKey::new(ObjectKind::AssessmentTab, o.tab_id))
            }
            CourseObject::Question(o) => {
                Some(ObjectKey::new(ObjectKind::Assessment, o.assessment_id))
            }
            CourseObject::Skill(o) => o
                .skill_branch_id
                .map(|id| ObjectKey::new(ObjectKind::SkillBranch, id)),
            CourseObject::MaterialFolder(o) => o
                .parent_id
                .map(|id| ObjectKey::new(ObjectKind::MaterialFolder, id)),
            CourseObject::Material(o) => {
                Some(ObjectKey::new(ObjectKind::MaterialFolder, o.folder_id))
            }
            _ => None,
        }
    }

    /// Materials folder owned by this object (categories and assessments).
    pub fn owned_folder_id(&self) -> Option<DbId> {
        match self {
            CourseObject::AssessmentCategory(o) => Some(o.folder_id),
            CourseObject::Assessment(o) => Some(o.folder_id),
            _ => None,
        }
    }

    /// Folder that children placed "in" this object live in: the folder
    /// itself, or the folder an owner holds.
    pub fn container_folder_id(&self) -> Option<DbId> {
        match self {
            CourseObject::MaterialFolder(o) => Some(o.id),
            _ => self.owned_folder_id(),
        }
    }
}
