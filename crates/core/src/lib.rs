//! Courseware domain core.
//!
//! Pure logic shared by the persistence and duplication crates: identifier
//! types, the domain error taxonomy, the building blocks of course object
//! duplication (object kinds, reference registry, dependency resolver, run
//! state), validation helpers, and per-course settings components. Nothing
//! in this crate touches the database.

pub mod auto_grading;
pub mod duplication;
pub mod error;
pub mod settings;
pub mod types;
pub mod validation;
