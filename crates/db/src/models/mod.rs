//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) where the entity is editable

pub mod app_setting;
pub mod comment;
pub mod course;
pub mod course_module;
pub mod dashboard;
pub mod enrollment;
pub mod lesson;
pub mod marketing_video;
pub mod profile;
pub mod progress;
pub mod session;
