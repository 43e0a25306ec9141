//! Building blocks of course object duplication.
//!
//! The duplication service copies a caller-selected subset of one course's
//! objects into another course. This module holds the storage-agnostic
//! parts of that process:
//!
//! - [`ObjectKind`] / [`ObjectKey`]: identity of a source object.
//! - [`ReferenceRegistry`]: source identity to duplicate, for one run.
//! - [`DependencyResolver`]: where a duplicate's parent container comes from.
//! - [`Selection`]: the caller's (possibly nested) ordered selection.
//! - [`RunState`]: lifecycle of one run.
//! - [`TimeShift`]: offset applied to dated objects.

pub mod kind;
pub mod registry;
pub mod resolver;
pub mod selection;
pub mod state;
pub mod time_shift;

pub use kind::{ObjectKey, ObjectKind};
pub use registry::ReferenceRegistry;
pub use resolver::{DependencyResolver, ParentLink, ResolveError};
pub use selection::Selection;
pub use state::RunState;
pub use time_shift::TimeShift;
