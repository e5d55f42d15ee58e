//! # Access Control
//!
//! Role resolution and the operation gate. Roles form a set, not a
//! hierarchy: one identity may be user, moderator, director, and actor
//! at once. The gate is consulted before any ingestion or browse call
//! reaches the engine; its `Grant` token is the only way in, so an
//! unauthorized request cannot reach the data path by construction.

pub mod errors;
pub mod gate;
pub mod role;

pub use errors::{AccessError, AccessResult};
pub use gate::{Gate, Grant, Operation};
pub use role::{resolve_roles, Role, RoleSet};
