//! Principal (actor identity) types.
//!
//! A [`Principal`] represents the authenticated actor a decision is
//! made about, separating "who is acting" from "what they are allowed
//! to do".
//!
//! # Design Rationale
//!
//! Principal lives in `edukit-types` (not `edukit-auth`) because:
//!
//! 1. **Consumer boundary**: route guards and UI stores hold
//!    principals without needing the engine
//! 2. **No policy dependency**: Principal is pure identity; permission
//!    logic stays in the engine layer
//!
//! Roles arrive fully resolved — expanding a role assignment into its
//! permission list is the identity collaborator's job. The engine only
//! reads the result.

use crate::{PermissionName, PrincipalId, RoleName, RoleVersion};
use serde::{Deserialize, Serialize};

/// A named bundle of permissions assignable to principals.
///
/// Permissions are owned by roles; a principal never holds a
/// permission directly. A role with an empty permission list is legal
/// and contributes nothing but its name.
///
/// # Example
///
/// ```
/// use edukit_types::Role;
///
/// let role = Role::new("TEACHER", ["course.update", "task.create"]);
/// assert_eq!(role.name.as_str(), "TEACHER");
/// assert_eq!(role.permissions.len(), 2);
///
/// let bare = Role::named("STUDENT");
/// assert!(bare.permissions.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// The role's name (e.g. `ADMIN`, `TEACHER`).
    pub name: RoleName,
    /// The permissions this role carries, as resolved by the identity
    /// collaborator.
    pub permissions: Vec<PermissionName>,
}

impl Role {
    /// Creates a role with the given name and permissions.
    #[must_use]
    pub fn new<P>(name: impl Into<RoleName>, permissions: impl IntoIterator<Item = P>) -> Self
    where
        P: Into<PermissionName>,
    {
        Self {
            name: name.into(),
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a role with no permissions.
    #[must_use]
    pub fn named(name: impl Into<RoleName>) -> Self {
        Self {
            name: name.into(),
            permissions: Vec::new(),
        }
    }
}

impl From<&str> for Role {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

/// The authenticated actor a decision is made about.
///
/// # Invariants
///
/// - A principal reaching the engine is already authenticated;
///   unauthenticated requests are rejected upstream.
/// - An authenticated principal normally holds at least one role. An
///   empty role set is still *legal*: it resolves to an empty
///   permission set and every permission-gated action uniformly
///   denies. Empty roles are never an error.
///
/// # Example
///
/// ```
/// use edukit_types::{Principal, Role, RoleName};
///
/// let p = Principal::new("teacher-42", vec![Role::named("TEACHER")]);
/// assert!(p.has_role(&RoleName::new("TEACHER")));
/// assert!(!p.has_role_named("ADMIN"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Identity issued by the identity collaborator.
    pub id: PrincipalId,
    /// Assigned roles, each fully resolved with its permissions.
    pub roles: Vec<Role>,
    /// Version stamp of the role set; bumped on any role change.
    pub role_version: RoleVersion,
}

impl Principal {
    /// Creates a principal with version stamp zero.
    ///
    /// Hosts that track role changes should use
    /// [`with_version`](Self::with_version) so the permission cache
    /// can detect staleness.
    #[must_use]
    pub fn new(id: impl Into<PrincipalId>, roles: Vec<Role>) -> Self {
        Self {
            id: id.into(),
            roles,
            role_version: RoleVersion::default(),
        }
    }

    /// Creates a principal carrying an explicit role-set version.
    #[must_use]
    pub fn with_version(
        id: impl Into<PrincipalId>,
        roles: Vec<Role>,
        role_version: RoleVersion,
    ) -> Self {
        Self {
            id: id.into(),
            roles,
            role_version,
        }
    }

    /// Returns `true` if any assigned role has the given name.
    #[must_use]
    pub fn has_role(&self, name: &RoleName) -> bool {
        self.roles.iter().any(|r| &r.name == name)
    }

    /// Convenience form of [`has_role`](Self::has_role) for literals.
    #[must_use]
    pub fn has_role_named(&self, name: &str) -> bool {
        self.roles.iter().any(|r| r.name.as_str() == name)
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.id, self.role_version)
    }
}
