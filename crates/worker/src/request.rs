//! Duplication request files.
//!
//! ```json
//! {
//!   "source_course_id": 1,
//!   "target_course_id": 2,
//!   "selection": [
//!     {"kind": "assessment_category", "id": 10},
//!     [{"kind": "skill_branch", "id": 4}, {"kind": "skill", "id": 7}]
//!   ]
//! }
//! ```

use anyhow::{anyhow, Context};
use courseware_core::duplication::{ObjectKey, Selection};
use courseware_core::types::DbId;
use courseware_db::models::course_object::CourseObject;
use courseware_db::repositories::CourseObjectRepo;
use courseware_db::DbPool;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DuplicationRequest {
    pub source_course_id: DbId,
    pub target_course_id: DbId,
    pub selection: Selection<ObjectKey>,
}

impl DuplicationRequest {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Invalid duplication request")
    }

    /// Load every selected object, keeping the selection's shape.
    pub async fn load_objects(&self, pool: &DbPool) -> anyhow::Result<Selection<CourseObject>> {
        let keys = self.selection.leaves();
        let mut objects = Vec::with_capacity(keys.len());
        for key in keys {
            let object = CourseObjectRepo::find(pool, *key)
                .await
                .with_context(|| format!("Failed to load {key}"))?
                .ok_or_else(|| anyhow!("Selected object {key} not found"))?;
            objects.push(object);
        }
        self.selection
            .reshape(objects)
            .ok_or_else(|| anyhow!("Loaded objects do not match the selection"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courseware_core::duplication::ObjectKind;

    #[test]
    fn parses_nested_selection() {
        let request = DuplicationRequest::from_json(
            r#"{
                "source_course_id": 1,
                "target_course_id": 2,
                "selection": [
                    {"kind": "assessment_category", "id": 10},
                    [{"kind": "skill_branch", "id": 4}, {"kind": "skill", "id": 7}]
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(request.source_course_id, 1);
        assert_eq!(request.target_course_id, 2);
        assert_eq!(
            request.selection.leaves(),
            vec![
                &ObjectKey::new(ObjectKind::AssessmentCategory, 10),
                &ObjectKey::new(ObjectKind::SkillBranch, 4),
                &ObjectKey::new(ObjectKind::Skill, 7),
            ]
        );
    }

    #[test]
    fn single_object_selection() {
        let request = DuplicationRequest::from_json(
            r#"{"source_course_id": 1, "target_course_id": 2,
                "selection": {"kind": "forum", "id": 3}}"#,
        )
        .unwrap();
        assert_eq!(
            request.selection,
            Selection::One(ObjectKey::new(ObjectKind::Forum, 3))
        );
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = DuplicationRequest::from_json(
            r#"{"source_course_id": 1, "target_course_id": 2,
                "selection": {"kind": "gradebook", "id": 3}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Invalid duplication request"));
    }
}
