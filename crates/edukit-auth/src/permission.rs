//! Permission-set resolution and caching.
//!
//! [`PermissionSet::resolve`] flattens a principal's assigned roles
//! into deduplicated sets of permission names and role names — a pure
//! function of principal data, no I/O. [`PermissionCache`] memoizes
//! resolutions per principal, keyed by the role-set version stamp, so
//! a role change invalidates the cache without explicit eviction.
//!
//! # Commutativity
//!
//! Resolution is a set union: role ordering never changes the result,
//! and duplicate permissions across roles collapse.

use edukit_types::{PermissionName, Principal, PrincipalId, RoleName, RoleVersion};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// The flattened view of what a principal's roles grant.
///
/// Derived, never stored: the identity collaborator owns role and
/// permission data, the engine only folds it.
///
/// # Example
///
/// ```
/// use edukit_auth::PermissionSet;
/// use edukit_types::{Principal, Role};
///
/// let p = Principal::new(
///     "u1",
///     vec![
///         Role::new("TEACHER", ["course.update", "task.create"]),
///         Role::new("GRADER", ["task.create"]), // duplicate collapses
///     ],
/// );
/// let set = PermissionSet::resolve(&p);
/// assert_eq!(set.permissions.len(), 2);
/// assert!(set.contains(&"course.update".into()));
/// assert!(set.has_role(&"GRADER".into()));
/// assert!(!set.is_admin());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    /// Union of permissions across all assigned roles.
    pub permissions: HashSet<PermissionName>,
    /// Names of all assigned roles.
    pub roles: HashSet<RoleName>,
}

impl PermissionSet {
    /// Flattens a principal's roles into a deduplicated set.
    ///
    /// An empty role list yields an empty set — never an error.
    /// Downstream permission checks then uniformly deny.
    #[must_use]
    pub fn resolve(principal: &Principal) -> Self {
        let mut permissions = HashSet::new();
        let mut roles = HashSet::new();
        for role in &principal.roles {
            roles.insert(role.name.clone());
            permissions.extend(role.permissions.iter().cloned());
        }
        Self { permissions, roles }
    }

    /// Returns `true` if the set grants the given permission.
    #[must_use]
    pub fn contains(&self, permission: &PermissionName) -> bool {
        self.permissions.contains(permission)
    }

    /// Returns `true` if the given role name is present.
    #[must_use]
    pub fn has_role(&self, role: &RoleName) -> bool {
        self.roles.contains(role)
    }

    /// Returns `true` if the canonical ADMIN role is present.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(RoleName::is_admin)
    }

    /// Returns `true` if no role grants any permission.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty() && self.roles.is_empty()
    }
}

/// Read-mostly memoization of [`PermissionSet::resolve`].
///
/// Entries are keyed by principal id and stamped with the principal's
/// [`RoleVersion`]. The stamp is compared on every read, so:
///
/// - a role change (version bump) makes the stale entry invisible and
///   triggers recomputation on the next resolve;
/// - a stale entry can only cost a redundant recomputation, never a
///   wrong Allow.
///
/// Safe for concurrent use across requests; resolved sets are shared
/// as `Arc` so readers never copy the sets.
///
/// # Example
///
/// ```
/// use edukit_auth::PermissionCache;
/// use edukit_types::{Principal, Role, RoleVersion};
///
/// let cache = PermissionCache::new();
/// let p = Principal::with_version(
///     "u1",
///     vec![Role::new("TEACHER", ["course.update"])],
///     RoleVersion::new(1),
/// );
///
/// let first = cache.resolve(&p);
/// assert!(first.contains(&"course.update".into()));
///
/// // Role revoked upstream: version bumps, cache entry goes stale.
/// let revoked = Principal::with_version("u1", vec![], RoleVersion::new(2));
/// let second = cache.resolve(&revoked);
/// assert!(!second.contains(&"course.update".into()));
/// ```
#[derive(Debug, Default)]
pub struct PermissionCache {
    entries: RwLock<HashMap<PrincipalId, (RoleVersion, Arc<PermissionSet>)>>,
}

impl PermissionCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the principal's permission set, reusing a cached
    /// resolution when its version stamp matches.
    pub fn resolve(&self, principal: &Principal) -> Arc<PermissionSet> {
        {
            let entries = self.entries.read();
            if let Some((version, set)) = entries.get(&principal.id) {
                if *version == principal.role_version {
                    return Arc::clone(set);
                }
            }
        }

        let set = Arc::new(PermissionSet::resolve(principal));
        let mut entries = self.entries.write();
        entries.insert(
            principal.id.clone(),
            (principal.role_version, Arc::clone(&set)),
        );
        set
    }

    /// Drops the cached resolution for a principal (e.g. on logout).
    pub fn invalidate(&self, principal: &PrincipalId) {
        self.entries.write().remove(principal);
    }

    /// Returns the number of cached resolutions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if no resolutions are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
