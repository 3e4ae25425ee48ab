//! Name types for roles, permissions and actions.
//!
//! Roles, permissions and action identifiers are opaque names owned by
//! configuration and the identity collaborator. Newtyping them keeps
//! the three namespaces from being confused at call sites — an
//! `ActionId` can never be passed where a `PermissionName` is
//! expected, which is exactly the drift the scattered string
//! comparisons this engine replaces suffered from.

use serde::{Deserialize, Serialize};

/// The canonical administrator role name.
///
/// The single role name the engine itself interprets: principals
/// holding it satisfy `AdminOnly` ownership scope and the admin arm of
/// `OwnerOrAdmin`. Every other role name is opaque.
pub const ADMIN_ROLE: &str = "ADMIN";

/// Name of a role assignable to principals (e.g. `ADMIN`, `TEACHER`).
///
/// # Example
///
/// ```
/// use edukit_types::RoleName;
///
/// assert!(RoleName::new("ADMIN").is_admin());
/// assert!(!RoleName::new("TEACHER").is_admin());
/// // Case-sensitive, like every name in the model.
/// assert!(!RoleName::new("admin").is_admin());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleName(String);

impl RoleName {
    /// Creates a role name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the raw name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this is the canonical [`ADMIN_ROLE`].
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.0 == ADMIN_ROLE
    }
}

impl std::fmt::Display for RoleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RoleName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Name of an atomic permission (e.g. `course.resource.create`).
///
/// Permissions are owned by roles; they are never assigned to
/// principals directly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionName(String);

impl PermissionName {
    /// Creates a permission name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the raw name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PermissionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PermissionName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Identifier of a guarded operation (e.g. `course.resource.create`).
///
/// Actions are the keys of the access-rule table. An action with no
/// registered rule is denied for everyone — fail closed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(String);

impl ActionId {
    /// Creates an action id.
    #[must_use]
    pub fn new(action: impl Into<String>) -> Self {
        Self(action.into())
    }

    /// Returns the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ActionId {
    fn from(action: &str) -> Self {
        Self::new(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_detection_is_exact() {
        assert!(RoleName::new("ADMIN").is_admin());
        assert!(!RoleName::new("Admin").is_admin());
        assert!(!RoleName::new("ADMINISTRATOR").is_admin());
        assert!(!RoleName::new("").is_admin());
    }

    #[test]
    fn names_are_distinct_namespaces() {
        // Same raw string, different types: usable as separate map keys.
        let perm = PermissionName::new("course.resource.create");
        let action = ActionId::new("course.resource.create");
        assert_eq!(perm.as_str(), action.as_str());
    }

    #[test]
    fn display_is_raw() {
        assert_eq!(RoleName::new("TEACHER").to_string(), "TEACHER");
        assert_eq!(ActionId::new("task.delete").to_string(), "task.delete");
    }

    #[test]
    fn serde_transparent() {
        let action = ActionId::new("course.update");
        let json = serde_json::to_string(&action).expect("serialize");
        assert_eq!(json, "\"course.update\"");
        let parsed: ActionId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, action);
    }
}
