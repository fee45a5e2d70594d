//! HTTP request handlers, grouped by audience.

pub mod admin_course;
pub mod admin_dashboard;
pub mod admin_settings;
pub mod admin_student;
pub mod auth;
pub mod catalog;
pub mod course;
pub mod profile;
pub mod student;
