//! Per-run duplication state.

use courseware_core::duplication::{
    DependencyResolver, ObjectKey, ObjectKind, ParentLink, ReferenceRegistry,
};
use courseware_core::types::{DbId, Timestamp};
use courseware_db::models::assessment::{AssessmentCategory, AssessmentTab};
use courseware_db::models::course_object::CourseObject;
use courseware_db::models::material::MaterialFolder;
use courseware_db::store::DuplicationTx;

use crate::context::DuplicationContext;
use crate::error::DuplicationError;

/// Target course containers, loaded on first use.
#[derive(Debug, Default)]
struct DefaultContainers {
    category: Option<AssessmentCategory>,
    tab: Option<AssessmentTab>,
    root_folder: Option<MaterialFolder>,
}

/// Everything a duplicator needs to know about the run it is part of.
///
/// Owns the [`ReferenceRegistry`] mapping source objects to their
/// duplicates and the [`DependencyResolver`] that knows what was selected.
/// Lives for exactly one run.
pub struct DuplicationScope<'a> {
    context: &'a DuplicationContext,
    registry: ReferenceRegistry<CourseObject>,
    resolver: DependencyResolver,
    defaults: DefaultContainers,
}

impl<'a> DuplicationScope<'a> {
    /// Scope for a run over `selected` objects.
    ///
    /// Materials folders owned by a selected category or assessment are
    /// addressed through their owner.
    pub fn new<'o>(
        context: &'a DuplicationContext,
        selected: impl IntoIterator<Item = &'o CourseObject>,
    ) -> Self {
        let selected: Vec<&CourseObject> = selected.into_iter().collect();
        let mut resolver = DependencyResolver::new(selected.iter().map(|object| object.key()));
        for object in &selected {
            if let Some(folder_id) = object.owned_folder_id() {
                resolver.alias(
                    ObjectKey::new(ObjectKind::MaterialFolder, folder_id),
                    object.key(),
                );
            }
        }

        Self {
            context,
            registry: ReferenceRegistry::new(),
            resolver,
            defaults: DefaultContainers::default(),
        }
    }

    pub fn context(&self) -> &DuplicationContext {
        self.context
    }

    pub fn target_course_id(&self) -> DbId {
        self.context.target_course_id()
    }

    pub fn shift(&self, at: Timestamp) -> Timestamp {
        self.context.time_shift.apply(at)
    }

    pub fn shift_opt(&self, at: Option<Timestamp>) -> Option<Timestamp> {
        self.context.time_shift.apply_opt(at)
    }

    // -- Registry -----------------------------------------------------------

    /// Record `duplicate` as the copy of `source`, returning the registered
    /// copy. An already registered source keeps its first duplicate.
    pub fn register(&mut self, source: ObjectKey, duplicate: CourseObject) -> CourseObject {
        self.registry
            .register(source.kind, source.id, duplicate)
            .clone()
    }

    pub fn duplicate_of(&self, source: ObjectKey) -> Option<&CourseObject> {
        self.registry.resolve_key(&source)
    }

    pub fn duplicated_count(&self) -> usize {
        self.registry.len()
    }

    // -- Resolution ---------------------------------------------------------

    /// Selected ancestors of `source` that have no duplicate yet, outermost
    /// first. `parent_of` maps a selected key to its parent key.
    pub fn pending_ancestors(
        &self,
        source: ObjectKey,
        parent_of: impl Fn(ObjectKey) -> Option<ObjectKey>,
    ) -> Result<Vec<ObjectKey>, DuplicationError> {
        Ok(self
            .resolver
            .pending_ancestors(source, &self.registry, parent_of)?)
    }

    /// ID of the duplicate a copy of `source` should be attached to.
    ///
    /// `Ok(None)` means the parent was not part of the run and the caller
    /// falls back to the target's default container. `extract` picks the
    /// ID out of the parent's duplicate; a parent duplicated as an
    /// unexpected kind is a resolution failure.
    pub fn parent_id(
        &self,
        source: ObjectKey,
        parent: Option<ObjectKey>,
        extract: impl Fn(&CourseObject) -> Option<DbId>,
    ) -> Result<Option<DbId>, DuplicationError> {
        match self.resolver.resolve(parent, &self.registry) {
            ParentLink::Duplicated(duplicate) => extract(duplicate).map(Some).ok_or_else(|| {
                DuplicationError::unresolved(
                    source,
                    format!("parent was duplicated as {}", duplicate.key()),
                )
            }),
            ParentLink::Requested(parent) => Err(DuplicationError::unresolved(
                source,
                format!("selected parent {parent} has not been duplicated yet"),
            )),
            ParentLink::Root | ParentLink::Default(_) => Ok(None),
        }
    }

    // -- Default containers -------------------------------------------------

    pub async fn default_category<T: DuplicationTx>(
        &mut self,
        tx: &mut T,
        requester: ObjectKey,
    ) -> Result<AssessmentCategory, DuplicationError> {
        if let Some(category) = &self.defaults.category {
            return Ok(category.clone());
        }
        let category = tx
            .default_category(self.target_course_id())
            .await?
            .ok_or_else(|| {
                DuplicationError::unresolved(requester, "target course has no default category")
            })?;
        self.defaults.category = Some(category.clone());
        Ok(category)
    }

    /// Default tab of the target's default category.
    pub async fn default_tab<T: DuplicationTx>(
        &mut self,
        tx: &mut T,
        requester: ObjectKey,
    ) -> Result<AssessmentTab, DuplicationError> {
        if let Some(tab) = &self.defaults.tab {
            return Ok(tab.clone());
        }
        let category = self.default_category(tx, requester).await?;
        let tab = tx.default_tab(category.id).await?.ok_or_else(|| {
            DuplicationError::unresolved(requester, "target default category has no default tab")
        })?;
        self.defaults.tab = Some(tab.clone());
        Ok(tab)
    }

    pub async fn root_folder<T: DuplicationTx>(
        &mut self,
        tx: &mut T,
        requester: ObjectKey,
    ) -> Result<MaterialFolder, DuplicationError> {
        if let Some(folder) = &self.defaults.root_folder {
            return Ok(folder.clone());
        }
        let folder = tx
            .root_folder(self.target_course_id())
            .await?
            .ok_or_else(|| {
                DuplicationError::unresolved(requester, "target course has no root folder")
            })?;
        self.defaults.root_folder = Some(folder.clone());
        Ok(folder)
    }
}
