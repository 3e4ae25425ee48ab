//! The allow/deny decision and its reason taxonomy.
//!
//! A [`Decision`] is produced fresh per request and discarded with it;
//! decisions are never cached or persisted, because ownership and role
//! facts can change between requests and a stale Allow is a security
//! defect.
//!
//! # Reasons are for logs, not responses
//!
//! [`DenyReason`] codes exist for logging and tests. Hosts must not
//! echo them in response bodies — revealing *which* rule failed aids
//! enumeration attacks. Server mode answers with a generic
//! forbidden/not-found equivalent; client mode simply omits the
//! affordance.

use crate::category::CategoryError;
use serde::{Deserialize, Serialize};

/// Why a decision denied.
///
/// All variants are denials carried as data, not exceptions; only
/// infrastructure faults and caller programming errors surface as
/// [`AuthError`](crate::AuthError).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// No authenticated principal. Handled upstream of the engine;
    /// listed for taxonomy completeness.
    Unauthenticated,
    /// No access rule registered for the action — a configuration
    /// gap, failed closed.
    UnknownAction,
    /// The principal's roles do not grant the required permission.
    MissingPermission,
    /// The action is admin-only and the principal is not ADMIN.
    NotAdmin,
    /// The principal neither owns the resource nor is ADMIN.
    NotOwner,
    /// The claimed resource nesting did not validate (missing resource
    /// or parent mismatch, collapsed to one external reason).
    InvalidHierarchy,
    /// The category mutation would create a cycle.
    CategoryCycle,
    /// The category name collides with a sibling.
    CategoryNameConflict,
    /// The category chain exceeds the configured depth bound.
    CategoryTooDeep,
}

impl DenyReason {
    /// Returns the stable snake_case code used in logs and tests.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::UnknownAction => "unknown_action",
            Self::MissingPermission => "missing_permission",
            Self::NotAdmin => "not_admin",
            Self::NotOwner => "not_owner",
            Self::InvalidHierarchy => "invalid_hierarchy",
            Self::CategoryCycle => "category_cycle",
            Self::CategoryNameConflict => "category_name_conflict",
            Self::CategoryTooDeep => "category_too_deep",
        }
    }
}

impl std::fmt::Display for DenyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&CategoryError> for DenyReason {
    /// Maps a structural category violation onto the decision channel.
    ///
    /// Missing participants map to [`DenyReason::InvalidHierarchy`] —
    /// externally they are the same "the claimed structure is not
    /// real" denial as a broken chain.
    fn from(err: &CategoryError) -> Self {
        match err {
            CategoryError::Cycle { .. } => Self::CategoryCycle,
            CategoryError::NameConflict { .. } => Self::CategoryNameConflict,
            CategoryError::TooDeep { .. } => Self::CategoryTooDeep,
            CategoryError::UnknownParent { .. } | CategoryError::UnknownNode { .. } => {
                Self::InvalidHierarchy
            }
        }
    }
}

/// The outcome of one authorization request.
///
/// # Example
///
/// ```
/// use edukit_auth::{Decision, DenyReason};
///
/// let ok = Decision::allow();
/// assert!(ok.is_allowed());
/// assert!(ok.reason().is_none());
///
/// let no = Decision::deny(DenyReason::NotOwner);
/// assert!(!no.is_allowed());
/// assert_eq!(no.reason(), Some(DenyReason::NotOwner));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    allowed: bool,
    reason: Option<DenyReason>,
}

impl Decision {
    /// An allowing decision.
    #[must_use]
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    /// A denying decision with the given reason.
    #[must_use]
    pub fn deny(reason: DenyReason) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }

    /// Returns `true` if the operation may proceed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    /// Returns the deny reason, or `None` when allowed.
    #[must_use]
    pub fn reason(&self) -> Option<DenyReason> {
        self.reason
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.reason {
            None => write!(f, "allow"),
            Some(reason) => write!(f, "deny({reason})"),
        }
    }
}
