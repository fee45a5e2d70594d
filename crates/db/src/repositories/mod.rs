//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod app_setting_repo;
pub mod comment_repo;
pub mod course_module_repo;
pub mod course_repo;
pub mod dashboard_repo;
pub mod enrollment_repo;
pub mod lesson_repo;
pub mod marketing_video_repo;
pub mod profile_repo;
pub mod progress_repo;
pub mod session_repo;

pub use app_setting_repo::AppSettingRepo;
pub use comment_repo::CommentRepo;
pub use course_module_repo::CourseModuleRepo;
pub use course_repo::CourseRepo;
pub use dashboard_repo::DashboardRepo;
pub use enrollment_repo::EnrollmentRepo;
pub use lesson_repo::LessonRepo;
pub use marketing_video_repo::MarketingVideoRepo;
pub use profile_repo::ProfileRepo;
pub use progress_repo::ProgressRepo;
pub use session_repo::SessionRepo;
