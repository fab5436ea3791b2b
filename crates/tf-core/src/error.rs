//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant where they need to surface it.

use thiserror::Error;

/// The base error type for `tf-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid device identity {0:?}: expected 12 hex digits")]
    InvalidIdentity(String),
}
