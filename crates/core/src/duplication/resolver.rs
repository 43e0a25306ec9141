//! Parent container resolution.
//!
//! When an object is duplicated its parent (the tab of an assessment, the
//! category of a tab, the branch of a skill, the folder of a material) must
//! point at something in the target course. There are exactly three places
//! that parent can come from, checked in this order:
//!
//! 1. the parent was already duplicated in this run (registry hit);
//! 2. the parent is part of the same selection and still has to be
//!    duplicated, so the orchestrator duplicates it first;
//! 3. neither, so the child goes into the target course's default container
//!    for that kind, or is left without a parent if the kind has none.

use std::collections::{HashMap, HashSet};

use super::kind::{ObjectKey, ObjectKind};
use super::registry::ReferenceRegistry;

/// Outcome of resolving one parent reference.
#[derive(Debug)]
pub enum ParentLink<'r, T> {
    /// The copy gets no parent: the source had none, or its parent was not
    /// selected and the target has no default container of that kind.
    Root,
    /// The parent already has a duplicate in this run.
    Duplicated(&'r T),
    /// The parent is selected but not duplicated yet.
    Requested(ObjectKey),
    /// The parent is not selected; use the target's default container.
    Default(ObjectKind),
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("Cyclic parent chain detected at {0}")]
    Cycle(ObjectKey),
}

/// Knows which objects were explicitly selected for a run.
///
/// Some containers are addressed through their owner: the materials folder
/// of a category or assessment is never selected on its own, so a reference
/// to it is treated as a reference to the owner (see [`Self::alias`]).
#[derive(Debug, Default)]
pub struct DependencyResolver {
    requested: HashSet<ObjectKey>,
    aliases: HashMap<ObjectKey, ObjectKey>,
}

impl DependencyResolver {
    pub fn new(requested: impl IntoIterator<Item = ObjectKey>) -> Self {
        Self {
            requested: requested.into_iter().collect(),
            aliases: HashMap::new(),
        }
    }

    /// Address `key` through `owner` from now on.
    pub fn alias(&mut self, key: ObjectKey, owner: ObjectKey) {
        self.aliases.insert(key, owner);
    }

    /// The key a reference to `key` actually resolves through.
    pub fn canonical(&self, key: ObjectKey) -> ObjectKey {
        self.aliases.get(&key).copied().unwrap_or(key)
    }

    pub fn is_requested(&self, key: ObjectKey) -> bool {
        self.requested.contains(&self.canonical(key))
    }

    /// Resolve a parent reference against the registry and the selection.
    pub fn resolve<'r, T>(
        &self,
        parent: Option<ObjectKey>,
        registry: &'r ReferenceRegistry<T>,
    ) -> ParentLink<'r, T> {
        let Some(parent) = parent else {
            return ParentLink::Root;
        };
        let canonical = self.canonical(parent);

        if let Some(duplicate) = registry
            .resolve_key(&canonical)
            .or_else(|| registry.resolve_key(&parent))
        {
            return ParentLink::Duplicated(duplicate);
        }
        if self.requested.contains(&canonical) {
            return ParentLink::Requested(canonical);
        }
        if parent.kind.has_default_container() {
            ParentLink::Default(parent.kind)
        } else {
            ParentLink::Root
        }
    }

    /// Selected ancestors of `start` that still need duplicating, outermost
    /// first.
    ///
    /// `parent_of` returns the parent key of a selected object. The walk
    /// stops at the first ancestor that is already duplicated or was not
    /// selected: everything above it is irrelevant to where `start` lands.
    pub fn pending_ancestors<T>(
        &self,
        start: ObjectKey,
        registry: &ReferenceRegistry<T>,
        parent_of: impl Fn(ObjectKey) -> Option<ObjectKey>,
    ) -> Result<Vec<ObjectKey>, ResolveError> {
        let mut chain = Vec::new();
        let mut seen = HashSet::from([self.canonical(start)]);
        let mut current = start;

        while let Some(parent) = parent_of(current) {
            let parent = self.canonical(parent);
            if registry.contains(&parent) || !self.requested.contains(&parent) {
                break;
            }
            if !seen.insert(parent) {
                return Err(ResolveError::Cycle(parent));
            }
            chain.push(parent);
            current = parent;
        }

        chain.reverse();
        Ok(chain)
    }
}
