//! Reference registry for one duplication run.

use std::collections::HashMap;

use super::kind::{ObjectKey, ObjectKind};
use crate::types::DbId;

/// Maps each source object to the duplicate created for it during one run.
///
/// Lookups are valid at any point of the run: a miss only means the object
/// has not been duplicated (yet). The first duplicate registered for a key
/// wins; later registrations for the same key are ignored so every source
/// object has at most one duplicate per run.
#[derive(Debug)]
pub struct ReferenceRegistry<T> {
    entries: HashMap<ObjectKey, T>,
}

impl<T> Default for ReferenceRegistry<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T> ReferenceRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `duplicate` as the copy of `(kind, source_id)` and return the
    /// entry that is now stored for that key.
    pub fn register(&mut self, kind: ObjectKind, source_id: DbId, duplicate: T) -> &T {
        self.entries
            .entry(ObjectKey::new(kind, source_id))
            .or_insert(duplicate)
    }

    pub fn resolve(&self, kind: ObjectKind, source_id: DbId) -> Option<&T> {
        self.resolve_key(&ObjectKey::new(kind, source_id))
    }

    pub fn resolve_key(&self, key: &ObjectKey) -> Option<&T> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &ObjectKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
