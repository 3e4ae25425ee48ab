//! Declarative access-rule configuration.
//!
//! One [`RuleSet`] maps each guarded action to the permission and
//! ownership policy that govern it. The table replaces inline role
//! comparisons scattered across route handlers — every endpoint that
//! enforces "owner or admin" now reads the same rule instead of
//! re-spelling it.
//!
//! Rules are configuration, not runtime state: built once at startup
//! (programmatically or from TOML) and immutable afterwards. Reload
//! means re-deploy or an explicit admin-triggered refresh, outside
//! this crate.
//!
//! # TOML format
//!
//! ```toml
//! [rules."course.resource.create"]
//! permission = "course.resource.create"
//! scope = "owner_or_admin"
//!
//! [rules."category.create"]
//! permission = "category.manage"
//! scope = "admin_only"
//!
//! [rules."course.list"]
//! scope = "none"
//! ```

use edukit_types::{ActionId, PermissionName};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Error from rule-set configuration loading.
#[derive(Debug, Error)]
pub enum RuleConfigError {
    /// The TOML document did not parse into a rule table.
    #[error("invalid rule configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// The ownership dimension of an access rule.
///
/// Orthogonal to the required permission: a rule may demand a
/// permission, an ownership relation, both, or neither.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipScope {
    /// No ownership restriction.
    #[default]
    None,
    /// The resource's owner or any ADMIN may act.
    ///
    /// Evaluating this scope requires owner facts; deciding without
    /// them is a programming error, not a verdict.
    OwnerOrAdmin,
    /// Only ADMIN principals may act.
    AdminOnly,
}

impl OwnershipScope {
    /// Returns the stable snake_case name used in config and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::OwnerOrAdmin => "owner_or_admin",
            Self::AdminOnly => "admin_only",
        }
    }
}

impl std::fmt::Display for OwnershipScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The permission and ownership policy governing one action.
///
/// # Example
///
/// ```
/// use edukit_auth::{AccessRule, OwnershipScope};
///
/// // Permission plus ownership.
/// let rule = AccessRule::new(OwnershipScope::OwnerOrAdmin)
///     .requiring("course.resource.create");
/// assert!(rule.required_permission.is_some());
///
/// // Ownership only.
/// let rule = AccessRule::new(OwnershipScope::AdminOnly);
/// assert!(rule.required_permission.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRule {
    /// Permission the principal's roles must grant, if any.
    #[serde(default, rename = "permission", skip_serializing_if = "Option::is_none")]
    pub required_permission: Option<PermissionName>,
    /// Ownership policy for the action.
    #[serde(default)]
    pub scope: OwnershipScope,
}

impl AccessRule {
    /// Creates a rule with the given ownership scope and no required
    /// permission.
    #[must_use]
    pub fn new(scope: OwnershipScope) -> Self {
        Self {
            required_permission: None,
            scope,
        }
    }

    /// Adds a required permission.
    #[must_use]
    pub fn requiring(mut self, permission: impl Into<PermissionName>) -> Self {
        self.required_permission = Some(permission.into());
        self
    }
}

/// The immutable action → rule table.
///
/// An action absent from the table denies everyone — fail closed.
///
/// # Example
///
/// ```
/// use edukit_auth::{AccessRule, OwnershipScope, RuleSet};
///
/// let rules = RuleSet::new()
///     .with_rule("task.delete", AccessRule::new(OwnershipScope::AdminOnly))
///     .with_rule(
///         "task.update",
///         AccessRule::new(OwnershipScope::OwnerOrAdmin).requiring("task.update"),
///     );
///
/// assert_eq!(rules.len(), 2);
/// assert!(rules.get(&"task.delete".into()).is_some());
/// assert!(rules.get(&"task.archive".into()).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    rules: HashMap<ActionId, AccessRule>,
}

impl RuleSet {
    /// Creates an empty rule set (which denies every action).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule, builder style.
    #[must_use]
    pub fn with_rule(mut self, action: impl Into<ActionId>, rule: AccessRule) -> Self {
        self.rules.insert(action.into(), rule);
        self
    }

    /// Parses a rule set from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`RuleConfigError::Parse`] on malformed TOML or an
    /// unknown scope name.
    pub fn from_toml_str(doc: &str) -> Result<Self, RuleConfigError> {
        Ok(toml::from_str(doc)?)
    }

    /// Returns the rule for an action, if one is registered.
    #[must_use]
    pub fn get(&self, action: &ActionId) -> Option<&AccessRule> {
        self.rules.get(action)
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates the registered actions.
    pub fn actions(&self) -> impl Iterator<Item = &ActionId> {
        self.rules.keys()
    }
}
