//! Domain logic for the course platform.
//!
//! Everything in this crate is pure: no I/O, no database, no HTTP. The
//! `db` and `api` crates build on these types and functions.

pub mod drip;
pub mod error;
pub mod hashing;
pub mod outline;
pub mod progress;
pub mod roles;
pub mod signing;
pub mod types;
pub mod validation;
