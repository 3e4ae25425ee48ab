//! Policy decision point.
//!
//! [`PolicyDecisionPoint::decide`] is the single function every route
//! guard and UI check funnels through. It composes the rule table,
//! the permission resolver and the ownership facts into one
//! deny-by-default verdict.
//!
//! # Evaluation order
//!
//! ```text
//! 1. hierarchy verdict   Broken?          → Deny invalid_hierarchy
//! 2. rule lookup         unregistered?    → Deny unknown_action
//! 3. permission          not granted?     → Deny missing_permission
//! 4. ownership scope     none / admin_only / owner_or_admin
//! ```
//!
//! The hierarchy verdict is consumed, not computed: the caller runs
//! [`validate_chain`](crate::validate_chain) (server gate does this)
//! and hands the outcome in as [`HierarchyStatus`], keeping the PDP a
//! pure function of its inputs. A broken chain denies unconditionally,
//! before permission or ownership can allow anything.
//!
//! # Determinism
//!
//! Given identical inputs, `decide` returns the identical decision —
//! no hidden state is read or written apart from the permission-set
//! memoization, whose version stamp makes it transparent. This is
//! what makes the engine unit-testable without a running server.

use crate::decision::{Decision, DenyReason};
use crate::lookup::LookupError;
use crate::permission::PermissionCache;
use crate::rule::{OwnershipScope, RuleSet};
use edukit_types::{ActionId, Principal, PrincipalId};
use thiserror::Error;

/// Engine-level error: infrastructure fault or caller programming
/// error. Never an ordinary authorization denial.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The data layer failed mid-decision; report as 5xx, not
    /// forbidden.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// An `owner_or_admin` rule was evaluated without owner facts.
    ///
    /// The call site forgot to supply the resource's owner — a
    /// programming error that must surface loudly instead of silently
    /// allowing or denying.
    #[error("action '{action}' has owner_or_admin scope but no owner facts were supplied")]
    MissingOwnerFacts {
        /// The action whose rule needed owner facts.
        action: ActionId,
    },
}

/// Outcome of hierarchy validation, as consumed by the PDP.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HierarchyStatus {
    /// The action targets no nested resource; nothing to verify.
    #[default]
    NotNested,
    /// The claimed chain was validated and holds.
    Verified,
    /// The claimed chain was validated and is broken.
    Broken,
}

/// Decision-time facts accompanying one request.
///
/// # Example
///
/// ```
/// use edukit_auth::{DecisionContext, HierarchyStatus};
///
/// let ctx = DecisionContext::new()
///     .with_owner("teacher-42")
///     .with_hierarchy(HierarchyStatus::Verified);
/// assert_eq!(ctx.hierarchy, HierarchyStatus::Verified);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecisionContext {
    /// The governed resource's owner, if the data layer records one.
    pub owner_id: Option<PrincipalId>,
    /// Hierarchy validation outcome for the claimed chain.
    pub hierarchy: HierarchyStatus,
}

impl DecisionContext {
    /// Context for an action with no resource facts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Supplies the governing resource's owner.
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<PrincipalId>) -> Self {
        self.owner_id = Some(owner.into());
        self
    }

    /// Supplies the hierarchy validation outcome.
    #[must_use]
    pub fn with_hierarchy(mut self, status: HierarchyStatus) -> Self {
        self.hierarchy = status;
        self
    }
}

/// The central decision function plus its two collaborators: the
/// immutable rule table and the permission-set cache.
///
/// Stateless per decision; safe for unlimited concurrent use.
/// Decisions are never cached — only permission-set resolution is,
/// under a role-version stamp.
///
/// # Example
///
/// ```
/// use edukit_auth::{
///     AccessRule, DecisionContext, DenyReason, OwnershipScope, PolicyDecisionPoint, RuleSet,
/// };
/// use edukit_types::{Principal, Role};
///
/// let rules = RuleSet::new().with_rule(
///     "task.update",
///     AccessRule::new(OwnershipScope::OwnerOrAdmin).requiring("task.update"),
/// );
/// let pdp = PolicyDecisionPoint::new(rules);
///
/// let owner = Principal::new("u1", vec![Role::new("TEACHER", ["task.update"])]);
/// let ctx = DecisionContext::new().with_owner("u1");
/// let decision = pdp.decide(&owner, &"task.update".into(), &ctx).unwrap();
/// assert!(decision.is_allowed());
///
/// let stranger = Principal::new("u2", vec![Role::new("TEACHER", ["task.update"])]);
/// let decision = pdp.decide(&stranger, &"task.update".into(), &ctx).unwrap();
/// assert_eq!(decision.reason(), Some(DenyReason::NotOwner));
/// ```
#[derive(Debug)]
pub struct PolicyDecisionPoint {
    rules: RuleSet,
    cache: PermissionCache,
}

impl PolicyDecisionPoint {
    /// Creates a decision point over an immutable rule table.
    #[must_use]
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            cache: PermissionCache::new(),
        }
    }

    /// Returns the rule table.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Returns the permission-set cache (e.g. to invalidate on
    /// logout).
    #[must_use]
    pub fn permission_cache(&self) -> &PermissionCache {
        &self.cache
    }

    /// Decides whether `principal` may perform `action` given the
    /// supplied decision-time facts.
    ///
    /// # Errors
    ///
    /// [`AuthError::MissingOwnerFacts`] when the action's rule has
    /// `owner_or_admin` scope and `ctx.owner_id` is `None`. Ordinary
    /// denials are returned as an `Ok` [`Decision`], never as errors.
    pub fn decide(
        &self,
        principal: &Principal,
        action: &ActionId,
        ctx: &DecisionContext,
    ) -> Result<Decision, AuthError> {
        // A broken chain denies before anything else can allow.
        if ctx.hierarchy == HierarchyStatus::Broken {
            return Ok(Decision::deny(DenyReason::InvalidHierarchy));
        }

        let Some(rule) = self.rules.get(action) else {
            // Unregistered action: configuration gap, fail closed.
            return Ok(Decision::deny(DenyReason::UnknownAction));
        };

        let resolved = self.cache.resolve(principal);

        if let Some(required) = &rule.required_permission {
            if !resolved.contains(required) {
                return Ok(Decision::deny(DenyReason::MissingPermission));
            }
        }

        match rule.scope {
            OwnershipScope::None => Ok(Decision::allow()),
            OwnershipScope::AdminOnly => {
                if resolved.is_admin() {
                    Ok(Decision::allow())
                } else {
                    Ok(Decision::deny(DenyReason::NotAdmin))
                }
            }
            OwnershipScope::OwnerOrAdmin => {
                // Owner facts are required even when the admin arm
                // would win: deciding without them is a call-site bug.
                let owner = ctx
                    .owner_id
                    .as_ref()
                    .ok_or_else(|| AuthError::MissingOwnerFacts {
                        action: action.clone(),
                    })?;
                if resolved.is_admin() || owner == &principal.id {
                    Ok(Decision::allow())
                } else {
                    Ok(Decision::deny(DenyReason::NotOwner))
                }
            }
        }
    }
}
