//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//!
//! [`course_object`] ties the duplicable entities together into one tagged
//! enum.

pub mod achievement;
pub mod assessment;
pub mod auto_grading;
pub mod course;
pub mod course_object;
pub mod forum;
pub mod lesson_plan;
pub mod level;
pub mod material;
pub mod skill;
pub mod survey;
pub mod video;
