//! The operation gate.
//!
//! Maps each operation to the roles that may invoke it and fails
//! closed: anything not explicitly granted is denied. A successful
//! check yields a `Grant`, constructible nowhere else, which the entry
//! paths require as proof of authorization.

use std::fmt;

use crate::schema::EntityType;

use super::errors::{AccessError, AccessResult};
use super::role::{Role, RoleSet};

/// An operation a caller may request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Page through all rows of one table
    Browse(EntityType),
    /// View one movie's joined detail
    ViewMovie,
    /// Run a catalog search
    Search,
    /// Post a review as a signed-in user
    CreateReview,
    /// Enter one row of one table
    SingleEntry(EntityType),
    /// Bulk-load a batch into one table
    BulkEntry(EntityType),
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Browse(e) => write!(f, "browse {}", e),
            Operation::ViewMovie => write!(f, "view movie"),
            Operation::Search => write!(f, "search"),
            Operation::CreateReview => write!(f, "create review"),
            Operation::SingleEntry(e) => write!(f, "single-entry {}", e),
            Operation::BulkEntry(e) => write!(f, "bulk-entry {}", e),
        }
    }
}

/// Roles that may invoke an operation; holding any one suffices
fn permitted_roles(operation: Operation) -> &'static [Role] {
    const EVERYONE: &[Role] = &[Role::Public, Role::User, Role::Moderator, Role::Admin];
    const SIGNED_IN: &[Role] = &[Role::User, Role::Moderator, Role::Admin];
    const STAFF: &[Role] = &[Role::Moderator, Role::Admin];
    const ADMIN_ONLY: &[Role] = &[Role::Admin];

    match operation {
        Operation::Browse(EntityType::Movie) | Operation::ViewMovie | Operation::Search => EVERYONE,
        Operation::CreateReview => SIGNED_IN,
        Operation::Browse(_) => STAFF,
        // account tables are entered by admins only
        Operation::SingleEntry(EntityType::User)
        | Operation::SingleEntry(EntityType::Password)
        | Operation::SingleEntry(EntityType::Admin) => ADMIN_ONLY,
        Operation::SingleEntry(_) => STAFF,
        Operation::BulkEntry(_) => ADMIN_ONLY,
    }
}

/// Proof that an operation was authorized for some caller.
///
/// The field is private and the only constructor is
/// [`Gate::authorize`], so entry paths taking a `Grant` cannot be
/// reached without passing the gate.
#[derive(Debug, Clone)]
pub struct Grant {
    operation: Operation,
}

impl Grant {
    pub fn operation(&self) -> Operation {
        self.operation
    }
}

/// The access-control gate
pub struct Gate;

impl Gate {
    /// Authorizes `operation` for a caller holding `roles`.
    ///
    /// Fails closed: an operation is denied unless one of the caller's
    /// roles is explicitly listed for it.
    pub fn authorize(roles: &RoleSet, operation: Operation) -> AccessResult<Grant> {
        if roles.contains_any(permitted_roles(operation)) {
            Ok(Grant { operation })
        } else {
            Err(AccessError::Denied {
                operation,
                roles: roles.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_may_browse_movies_only() {
        let public = RoleSet::public();
        assert!(Gate::authorize(&public, Operation::Browse(EntityType::Movie)).is_ok());
        assert!(Gate::authorize(&public, Operation::ViewMovie).is_ok());
        assert!(Gate::authorize(&public, Operation::Search).is_ok());
        for entity in EntityType::ALL {
            if entity != EntityType::Movie {
                assert!(Gate::authorize(&public, Operation::Browse(entity)).is_err());
            }
        }
    }

    #[test]
    fn test_user_may_review_but_not_enter() {
        let user = RoleSet::of(&[Role::User]);
        assert!(Gate::authorize(&user, Operation::CreateReview).is_ok());
        assert!(Gate::authorize(&user, Operation::SingleEntry(EntityType::Review)).is_err());
        assert!(Gate::authorize(&user, Operation::Browse(EntityType::User)).is_err());
    }

    #[test]
    fn test_moderator_entry_rights() {
        let moderator = RoleSet::of(&[Role::User, Role::Moderator]);
        for entity in [
            EntityType::Director,
            EntityType::Actor,
            EntityType::Movie,
            EntityType::Review,
            EntityType::ActedIn,
            EntityType::Poster,
        ] {
            assert!(Gate::authorize(&moderator, Operation::SingleEntry(entity)).is_ok());
        }
        for entity in [EntityType::User, EntityType::Password, EntityType::Admin] {
            assert!(Gate::authorize(&moderator, Operation::SingleEntry(entity)).is_err());
        }
        for entity in EntityType::ALL {
            assert!(Gate::authorize(&moderator, Operation::Browse(entity)).is_ok());
            assert!(Gate::authorize(&moderator, Operation::BulkEntry(entity)).is_err());
        }
    }

    #[test]
    fn test_admin_may_do_everything() {
        let admin = RoleSet::of(&[Role::User, Role::Moderator, Role::Admin]);
        for entity in EntityType::ALL {
            assert!(Gate::authorize(&admin, Operation::Browse(entity)).is_ok());
            assert!(Gate::authorize(&admin, Operation::SingleEntry(entity)).is_ok());
            assert!(Gate::authorize(&admin, Operation::BulkEntry(entity)).is_ok());
        }
    }

    #[test]
    fn test_denied_reports_operation_and_roles() {
        let public = RoleSet::public();
        let err = Gate::authorize(&public, Operation::SingleEntry(EntityType::Movie)).unwrap_err();
        match err {
            AccessError::Denied { operation, roles } => {
                assert_eq!(operation, Operation::SingleEntry(EntityType::Movie));
                assert_eq!(roles, RoleSet::public());
            }
            other => panic!("expected denial, got {:?}", other),
        }
    }
}
