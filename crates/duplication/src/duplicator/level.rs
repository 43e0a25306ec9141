use courseware_core::duplication::ObjectKind;
use courseware_db::models::course_object::CourseObject;
use courseware_db::models::level::{CreateLevel, Level};
use courseware_db::store::DuplicationTx;

use super::{check, Duplicator};
use crate::error::DuplicationError;
use crate::scope::DuplicationScope;

/// Levels are unique per threshold within a course, so a level whose
/// threshold the target already has maps onto the existing level.
pub struct LevelDuplicator;

impl Duplicator for LevelDuplicator {
    const KIND: ObjectKind = ObjectKind::Level;
    type Source = Level;

    async fn duplicate<T: DuplicationTx>(
        &self,
        source: &Level,
        scope: &mut DuplicationScope<'_>,
        tx: &mut T,
    ) -> Result<CourseObject, DuplicationError> {
        let key = Self::key(source.id);
        let input = CreateLevel {
            course_id: scope.target_course_id(),
            experience_points_threshold: source.experience_points_threshold,
        };
        check(key, &input)?;

        let existing = tx
            .find_level_by_threshold(input.course_id, input.experience_points_threshold)
            .await?;
        let level = match existing {
            Some(level) => {
                tracing::debug!(
                    level_id = level.id,
                    threshold = level.experience_points_threshold,
                    "Reusing existing target level"
                );
                level
            }
            None => tx.insert_level(&input).await?,
        };
        Ok(scope.register(key, level.into()))
    }
}
