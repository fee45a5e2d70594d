//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- The authenticated profile from a JWT Bearer token.
//! - [`auth::MaybeAuthUser`] -- Same, but anonymous requests are allowed.
//! - [`rbac::RequireMaster`] -- Requires the `master` role.
//! - [`rbac::RequireAuth`] -- Requires any authenticated profile.

pub mod auth;
pub mod rbac;
