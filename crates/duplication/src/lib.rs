//! Course object duplication.
//!
//! Copies a selection of one course's objects into another course inside a
//! single transaction, keeping references between the copies intact no
//! matter which order the objects are selected in.
//!
//! - [`ObjectDuplicationService`]: runs a selection and commits or rolls back.
//! - [`duplicator`]: one [`Duplicator`](duplicator::Duplicator) per object kind.
//! - [`DuplicationScope`]: registry and resolver state for one run.

pub mod context;
pub mod duplicator;
pub mod error;
pub mod scope;
pub mod service;

pub use context::DuplicationContext;
pub use error::DuplicationError;
pub use scope::DuplicationScope;
pub use service::ObjectDuplicationService;
