//! Roles and role resolution.
//!
//! Every caller holds `Public`; the rest of the set comes from session
//! identity: a USER row grants `User`, an ADMIN row grants `Moderator`,
//! and an ADMIN row whose position is "admin" grants `Admin` as well.

use std::collections::BTreeSet;
use std::fmt;

use crate::schema::{EntityType, Key};
use crate::store::Store;

use super::errors::AccessResult;

/// Access roles, held as a set per caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Role {
    Public,
    User,
    Moderator,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Public => "public",
            Role::User => "user",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The set of roles a caller currently holds; always contains `Public`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSet {
    roles: BTreeSet<Role>,
}

impl RoleSet {
    /// An anonymous caller
    pub fn public() -> Self {
        let mut roles = BTreeSet::new();
        roles.insert(Role::Public);
        Self { roles }
    }

    /// A caller holding the given roles (plus `Public`)
    pub fn of(roles: &[Role]) -> Self {
        let mut set = Self::public();
        for &role in roles {
            set.insert(role);
        }
        set
    }

    pub fn insert(&mut self, role: Role) {
        self.roles.insert(role);
    }

    pub fn contains(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Whether any of the given roles is held
    pub fn contains_any(&self, roles: &[Role]) -> bool {
        roles.iter().any(|r| self.contains(*r))
    }
}

impl Default for RoleSet {
    fn default() -> Self {
        Self::public()
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, role) in self.roles.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", role)?;
        }
        write!(f, "}}")
    }
}

/// Resolves a caller's role set from an optional authenticated uid.
///
/// The session layer supplies the uid (or its absence); this reads the
/// committed USER and ADMIN rows once per request.
pub fn resolve_roles<S: Store>(store: &S, uid: Option<i64>) -> AccessResult<RoleSet> {
    let mut roles = RoleSet::public();
    let Some(uid) = uid else {
        return Ok(roles);
    };
    if store.exists(EntityType::User, &Key::Id(uid))? {
        roles.insert(Role::User);
    }
    if let Some(admin) = store.get(EntityType::Admin, &Key::Id(uid))? {
        roles.insert(Role::Moderator);
        if admin.get_text("position") == Some("admin") {
            roles.insert(Role::Admin);
        }
    }
    Ok(roles)
}
