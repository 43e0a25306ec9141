//! Object kinds that take part in duplication.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Every kind of course object the duplication service knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Achievement,
    AssessmentCategory,
    AssessmentTab,
    Assessment,
    Question,
    SkillBranch,
    Skill,
    Forum,
    LessonPlanMilestone,
    LessonPlanEvent,
    MaterialFolder,
    Material,
    Level,
    Survey,
    Video,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 15] = [
        ObjectKind::Achievement,
        ObjectKind::AssessmentCategory,
        ObjectKind::AssessmentTab,
        ObjectKind::Assessment,
        ObjectKind::Question,
        ObjectKind::SkillBranch,
        ObjectKind::Skill,
        ObjectKind::Forum,
        ObjectKind::LessonPlanMilestone,
        ObjectKind::LessonPlanEvent,
        ObjectKind::MaterialFolder,
        ObjectKind::Material,
        ObjectKind::Level,
        ObjectKind::Survey,
        ObjectKind::Video,
    ];

    /// Stable snake_case name, as used in request files and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Achievement => "achievement",
            ObjectKind::AssessmentCategory => "assessment_category",
            ObjectKind::AssessmentTab => "assessment_tab",
            ObjectKind::Assessment => "assessment",
            ObjectKind::Question => "question",
            ObjectKind::SkillBranch => "skill_branch",
            ObjectKind::Skill => "skill",
            ObjectKind::Forum => "forum",
            ObjectKind::LessonPlanMilestone => "lesson_plan_milestone",
            ObjectKind::LessonPlanEvent => "lesson_plan_event",
            ObjectKind::MaterialFolder => "material_folder",
            ObjectKind::Material => "material",
            ObjectKind::Level => "level",
            ObjectKind::Survey => "survey",
            ObjectKind::Video => "video",
        }
    }

    /// Whether the target course provides a default container that orphans of
    /// this kind fall back to. Skill branches have none: an orphaned skill is
    /// simply left without a branch.
    pub fn has_default_container(self) -> bool {
        matches!(
            self,
            ObjectKind::AssessmentCategory | ObjectKind::AssessmentTab | ObjectKind::MaterialFolder
        )
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::UnknownKind(s.to_string()))
    }
}

/// Identity of one source object: its kind plus its primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectKey {
    pub kind: ObjectKind,
    pub id: DbId,
}

impl ObjectKey {
    pub fn new(kind: ObjectKind, id: DbId) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.id)
    }
}
