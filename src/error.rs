//! Error types for strict forest operations

use crate::forest::UserId;
use thiserror::Error;

/// Failures reported by the strict (`try_*`) forest operations.
///
/// The permissive operations never produce these; they fall back to the
/// lax behaviour instead (unknown parents become roots, duplicates overwrite).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForestError {
    #[error("user {0} not found")]
    UnknownUser(UserId),

    #[error("parent {parent} of user {id} not found")]
    UnknownParent { id: UserId, parent: UserId },

    #[error("user {0} already exists")]
    DuplicateUser(UserId),

    #[error("user {0} cannot be its own parent")]
    SelfParent(UserId),

    #[error("forest is inconsistent: {0}")]
    Inconsistent(String),
}
