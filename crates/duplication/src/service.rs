//! Duplication orchestrator.
//!
//! [`ObjectDuplicationService`] takes a (possibly nested) selection of
//! loaded source objects and copies all of them into the target course in
//! one transaction. The result has the same shape as the selection.

use std::collections::HashMap;

use courseware_core::duplication::{ObjectKey, RunState, Selection};
use courseware_db::models::course_object::CourseObject;
use courseware_db::store::{CourseStore, DuplicationTx};

use crate::context::DuplicationContext;
use crate::duplicator::duplicate_object;
use crate::error::DuplicationError;
use crate::scope::DuplicationScope;

/// Runs duplication requests against a [`CourseStore`].
#[derive(Debug, Clone)]
pub struct ObjectDuplicationService<S> {
    store: S,
}

impl<S: CourseStore> ObjectDuplicationService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Duplicate a single object.
    pub async fn duplicate_object(
        &self,
        source: &CourseObject,
        context: &DuplicationContext,
    ) -> Result<CourseObject, DuplicationError> {
        let selection = Selection::One(source.clone());
        let duplicated = self.duplicate_objects(&selection, context).await?;
        duplicated
            .into_one()
            .ok_or_else(|| DuplicationError::unresolved(source.key(), "no duplicate returned"))
    }

    /// Duplicate every object in `selection` into the target course.
    ///
    /// Objects are processed in selection order. Selected containers are
    /// duplicated before their selected contents whatever the order, so the
    /// reference graph between the copies does not depend on it. Either
    /// every copy is committed or none is.
    pub async fn duplicate_objects(
        &self,
        selection: &Selection<CourseObject>,
        context: &DuplicationContext,
    ) -> Result<Selection<CourseObject>, DuplicationError> {
        let sources = selection.leaves();

        let mut run = Run::new();
        tracing::info!(
            source_course_id = context.source_course_id(),
            target_course_id = context.target_course_id(),
            objects = sources.len(),
            "Starting object duplication"
        );
        run.advance(RunState::Running);

        let mut tx = self.store.begin().await?;
        let mut scope = DuplicationScope::new(context, sources.iter().copied());

        let result = match check_source_course(&sources, context, &mut tx).await {
            Ok(()) => duplicate_all(&sources, &mut scope, &mut tx).await,
            Err(err) => Err(err),
        };
        match result {
            Ok(()) => {
                if let Err(e) = tx.commit().await {
                    run.advance(RunState::RolledBack);
                    tracing::error!(error = %e, "Failed to commit object duplication");
                    return Err(e.into());
                }
                run.advance(RunState::Committed);
                tracing::info!(
                    target_course_id = context.target_course_id(),
                    duplicates = scope.duplicated_count(),
                    "Object duplication committed"
                );
                collect_duplicates(selection, &scope)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Object duplication failed, rolling back");
                if let Err(e) = tx.rollback().await {
                    tracing::error!(error = %e, "Failed to roll back object duplication");
                }
                run.advance(RunState::RolledBack);
                Err(err)
            }
        }
    }
}

/// Every source object must come from the source course. Questions and
/// materials are traced through their assessment and folder.
async fn check_source_course<T: DuplicationTx>(
    sources: &[&CourseObject],
    context: &DuplicationContext,
    tx: &mut T,
) -> Result<(), DuplicationError> {
    let expected = context.source_course_id();
    for source in sources {
        let course_id = match source {
            CourseObject::Question(q) => tx
                .find_assessment(q.assessment_id)
                .await?
                .map(|a| a.course_id),
            CourseObject::Material(m) => tx.find_folder(m.folder_id).await?.map(|f| f.course_id),
            other => other.course_id(),
        };
        let message = match course_id {
            Some(course_id) if course_id == expected => continue,
            Some(course_id) => {
                format!("belongs to course #{course_id}, not source course #{expected}")
            }
            None => "has no owning course".to_string(),
        };
        return Err(DuplicationError::Validation {
            kind: source.kind(),
            source_id: source.id(),
            message,
        });
    }
    Ok(())
}

async fn duplicate_all<T: DuplicationTx>(
    sources: &[&CourseObject],
    scope: &mut DuplicationScope<'_>,
    tx: &mut T,
) -> Result<(), DuplicationError> {
    let by_key: HashMap<ObjectKey, &CourseObject> = sources
        .iter()
        .map(|source| (source.key(), *source))
        .collect();
    let parent_of = |key: ObjectKey| by_key.get(&key).and_then(|source| source.parent_key());

    for source in sources {
        let key = source.key();
        if scope.duplicate_of(key).is_some() {
            tracing::debug!(source = %key, "Already duplicated, reusing");
            continue;
        }

        for ancestor in scope.pending_ancestors(key, parent_of)? {
            if scope.duplicate_of(ancestor).is_some() {
                continue;
            }
            let Some(ancestor_source) = by_key.get(&ancestor) else {
                return Err(DuplicationError::unresolved(
                    key,
                    format!("selected ancestor {ancestor} is not loaded"),
                ));
            };
            let duplicate = duplicate_object(ancestor_source, scope, tx).await?;
            tracing::debug!(
                source = %ancestor,
                duplicate = %duplicate.key(),
                "Duplicated ancestor"
            );
        }

        // Copying an ancestor may already have copied this object.
        if scope.duplicate_of(key).is_some() {
            continue;
        }
        let duplicate = duplicate_object(source, scope, tx).await?;
        tracing::debug!(
            source = %key,
            duplicate = %duplicate.key(),
            label = %source.label(),
            "Duplicated object"
        );
    }
    Ok(())
}

/// Rebuild the selection's shape from the registered duplicates.
fn collect_duplicates(
    selection: &Selection<CourseObject>,
    scope: &DuplicationScope<'_>,
) -> Result<Selection<CourseObject>, DuplicationError> {
    selection.try_map(|source| {
        scope
            .duplicate_of(source.key())
            .cloned()
            .ok_or_else(|| DuplicationError::unresolved(source.key(), "no duplicate registered"))
    })
}

/// State of one run, logged on every transition.
struct Run {
    state: RunState,
}

impl Run {
    fn new() -> Self {
        Self {
            state: RunState::Idle,
        }
    }

    fn advance(&mut self, next: RunState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid run transition {} -> {}",
            self.state.as_str(),
            next.as_str()
        );
        tracing::debug!(from = self.state.as_str(), to = next.as_str(), "Run state changed");
        self.state = next;
    }
}
