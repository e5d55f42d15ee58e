//! # Access Errors

use thiserror::Error;

use crate::store::StoreError;

use super::gate::Operation;
use super::role::RoleSet;

/// Result type for access operations
pub type AccessResult<T> = Result<T, AccessError>;

/// Authorization failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The caller's role set does not cover the operation
    #[error("denied: {operation} not permitted for roles {roles}")]
    Denied {
        operation: Operation,
        roles: RoleSet,
    },

    /// Role resolution could not read session state
    #[error(transparent)]
    Store(#[from] StoreError),
}
