//! Screen-level operations.
//!
//! Each flow resolves what the pure core needs (collaborator answers, stored
//! cooldown, the signed-in principal), invokes it, and applies the result to
//! [`crate::state::AppState`]. Errors come back as
//! [`crate::error::ClientError`], which knows its user-facing notice.

pub mod auth;
pub mod history;
pub mod scan;
pub mod teacher;

#[cfg(test)]
pub(crate) mod fakes;
