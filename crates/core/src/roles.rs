//! Well-known role name constants.
//!
//! These must match the CHECK constraint on `profiles.role` in
//! `20250101000001_create_profiles.sql`.

/// Course administrator. Manages courses, students and settings.
pub const ROLE_MASTER: &str = "master";
pub const ROLE_STUDENT: &str = "student";

/// Roles accepted by the `profiles.role` column.
pub const VALID_ROLES: &[&str] = &[ROLE_MASTER, ROLE_STUDENT];

/// Client-side landing path for a freshly authenticated user.
///
/// Unknown roles fall back to the public landing page.
pub fn landing_path(role: &str) -> &'static str {
    match role {
        ROLE_MASTER => "/admin/dashboard",
        ROLE_STUDENT => "/dashboard",
        _ => "/",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn master_lands_on_admin_dashboard() {
        assert_eq!(landing_path(ROLE_MASTER), "/admin/dashboard");
    }

    #[test]
    fn student_lands_on_dashboard() {
        assert_eq!(landing_path(ROLE_STUDENT), "/dashboard");
    }

    #[test]
    fn unknown_role_lands_on_root() {
        assert_eq!(landing_path("guest"), "/");
    }
}
