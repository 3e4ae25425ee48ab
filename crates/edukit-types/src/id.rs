//! Identifier types for edukit.
//!
//! All identifiers are opaque string keys issued by the external
//! identity and data collaborators. The engine never parses or mints
//! them; it only compares them.

use serde::{Deserialize, Serialize};

/// Identifier for a principal (the authenticated actor).
///
/// Issued by the identity collaborator (e.g. `"teacher-42"`). The
/// engine compares principal ids against resource owner ids for
/// ownership-scoped rules, nothing more.
///
/// # Example
///
/// ```
/// use edukit_types::PrincipalId;
///
/// let id = PrincipalId::new("teacher-42");
/// assert_eq!(id.as_str(), "teacher-42");
/// assert_eq!(id.to_string(), "principal:teacher-42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(String);

impl PrincipalId {
    /// Creates a principal id from an externally issued key.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "principal:{}", self.0)
    }
}

impl From<&str> for PrincipalId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier for an access-controlled resource.
///
/// Issued by the data layer (e.g. `"c1"` for a course row). Resource
/// ids are only meaningful together with a
/// [`ResourceKind`](crate::ResourceKind); see
/// [`ResourceRef`](crate::ResourceRef).
///
/// # Example
///
/// ```
/// use edukit_types::ResourceId;
///
/// let id = ResourceId::new("c1");
/// assert_eq!(id.as_str(), "c1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// Creates a resource id from an externally issued key.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Monotonic version stamp for a principal's role set.
///
/// The identity collaborator bumps this whenever a principal's role
/// assignments change. The permission-set cache compares the stamp on
/// every read, so a role change invalidates cached resolutions without
/// explicit eviction calls — a stale entry can only cost a redundant
/// recomputation, never a wrong Allow.
///
/// # Example
///
/// ```
/// use edukit_types::RoleVersion;
///
/// let v1 = RoleVersion::new(1);
/// let v2 = v1.bumped();
/// assert!(v2 > v1);
/// assert_eq!(v2.value(), 2);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RoleVersion(u64);

impl RoleVersion {
    /// Creates a version stamp with the given counter value.
    #[must_use]
    pub fn new(version: u64) -> Self {
        Self(version)
    }

    /// Returns the raw counter value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    /// Returns the next version stamp.
    #[must_use]
    pub fn bumped(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for RoleVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn principal_id_equality() {
        assert_eq!(PrincipalId::new("teacher-42"), PrincipalId::new("teacher-42"));
        assert_ne!(PrincipalId::new("teacher-42"), PrincipalId::new("teacher-99"));
    }

    #[test]
    fn principal_id_display() {
        let id = PrincipalId::new("u1");
        assert_eq!(format!("{id}"), "principal:u1");
    }

    #[test]
    fn resource_id_display_is_raw() {
        let id = ResourceId::new("c1");
        assert_eq!(format!("{id}"), "c1");
    }

    #[test]
    fn role_version_ordering() {
        let v1 = RoleVersion::new(1);
        let v5 = RoleVersion::new(5);
        assert!(v1 < v5);
        assert_eq!(v1.bumped().value(), 2);
    }

    #[test]
    fn serde_transparent() {
        let id = PrincipalId::new("teacher-42");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"teacher-42\"");

        let parsed: PrincipalId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, id);

        let v = RoleVersion::new(7);
        assert_eq!(serde_json::to_string(&v).expect("serialize"), "7");
    }
}
