//! Gate adapters: the two consumers of the decision point.
//!
//! Both modes answer the same question — "may this principal perform
//! this action here?" — but with very different authority:
//!
//! | Mode | Type | Authority | Lookups |
//! |------|------|-----------|---------|
//! | Server | [`ServerGate`] | Authoritative; on Deny the operation must not run | Validates the chain, fetches owner facts |
//! | Client | [`AdvisoryGate`] | Advisory; a Deny only hides a UI affordance | None; caller-known facts only |
//!
//! The advisory gate exists so the UI renders from the *same* policy
//! the server enforces, instead of a second hand-maintained rule set
//! that drifts. Its answer is never the gate for the operation itself:
//! client-side role data may be stale, so the server gate re-evaluates
//! on every actual invocation.
//!
//! # Audit logging
//!
//! The server gate logs every decision: allowed at `debug`, denied at
//! `warn`, with the reason code. Reason codes stay in the logs — the
//! host's response body should say a generic "forbidden"/"not found"
//! so denials do not enumerate the rule table for an attacker.

use crate::category::{CategoryArena, CategoryTreeGuard};
use crate::decision::{Decision, DenyReason};
use crate::hierarchy::{validate_chain, HierarchyError};
use crate::lookup::ResourceLookup;
use crate::policy::{AuthError, DecisionContext, HierarchyStatus, PolicyDecisionPoint};
use edukit_types::{ActionId, Principal, PrincipalId, ResourceId, ResourceRef};
use std::sync::Arc;
use tracing::{debug, warn};

/// The resource a guarded operation targets, as claimed by the caller.
///
/// `chain` is ordered outermost to innermost (e.g. course → plan →
/// resource); the innermost element is the resource being operated on.
/// `owned_by` names the chain member whose `owner_id` governs
/// ownership-scoped rules — for course-scoped actions that is the
/// outermost course even when the operation touches a deeply nested
/// resource.
///
/// # Example
///
/// ```
/// use edukit_auth::ResourceTarget;
/// use edukit_types::{ResourceKind, ResourceRef};
///
/// let course = ResourceRef::new(ResourceKind::Course, "c1");
/// let plan = ResourceRef::new(ResourceKind::TeachingPlan, "p1");
/// let target = ResourceTarget::nested([course.clone(), plan]).owned_by_outermost();
/// assert_eq!(target.owned_by.as_ref(), Some(&course));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTarget {
    /// Claimed ancestor chain, outermost to innermost.
    pub chain: Vec<ResourceRef>,
    /// Which chain member's owner governs ownership scope, if any.
    pub owned_by: Option<ResourceRef>,
}

impl ResourceTarget {
    /// Targets a single un-nested resource.
    #[must_use]
    pub fn single(resource: ResourceRef) -> Self {
        Self {
            chain: vec![resource],
            owned_by: None,
        }
    }

    /// Targets a nested resource with its claimed ancestor chain.
    #[must_use]
    pub fn nested(chain: impl IntoIterator<Item = ResourceRef>) -> Self {
        Self {
            chain: chain.into_iter().collect(),
            owned_by: None,
        }
    }

    /// Declares an explicit governing resource for ownership scope.
    #[must_use]
    pub fn governed_by(mut self, resource: ResourceRef) -> Self {
        self.owned_by = Some(resource);
        self
    }

    /// Ownership is governed by the innermost (targeted) resource.
    #[must_use]
    pub fn owned_by_target(mut self) -> Self {
        self.owned_by = self.chain.last().cloned();
        self
    }

    /// Ownership is governed by the outermost container.
    #[must_use]
    pub fn owned_by_outermost(mut self) -> Self {
        self.owned_by = self.chain.first().cloned();
        self
    }
}

/// A category mutation to be structurally validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryOp {
    /// Insert a new category named `name` under `parent_id`.
    Insert {
        /// The candidate name.
        name: String,
        /// The claimed parent, or `None` for root.
        parent_id: Option<ResourceId>,
    },
    /// Move `node_id` under `new_parent_id`.
    Reparent {
        /// The node being moved.
        node_id: ResourceId,
        /// The destination parent, or `None` for root.
        new_parent_id: Option<ResourceId>,
    },
}

/// The authoritative, server-side gate.
///
/// Invoked before a guarded mutation executes. On Deny the operation
/// must not run; on an `Err` the host should fail the request as an
/// infrastructure error, never as "forbidden".
pub struct ServerGate {
    pdp: Arc<PolicyDecisionPoint>,
    lookup: Arc<dyn ResourceLookup>,
}

impl ServerGate {
    /// Creates a gate over the shared decision point and data-layer
    /// lookup.
    #[must_use]
    pub fn new(pdp: Arc<PolicyDecisionPoint>, lookup: Arc<dyn ResourceLookup>) -> Self {
        Self { pdp, lookup }
    }

    /// Authorizes `action` by `principal` against the claimed target.
    ///
    /// Validates the claimed chain (when one is claimed), reads the
    /// governing resource's owner facts fresh from the data layer, and
    /// delegates to the decision point.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Lookup`] if the data layer fails — a 5xx-class
    ///   condition, not a denial
    /// - [`AuthError::MissingOwnerFacts`] if the action's rule needs
    ///   owner facts but the target declares no governing resource
    pub fn authorize(
        &self,
        principal: &Principal,
        action: &ActionId,
        target: Option<&ResourceTarget>,
    ) -> Result<Decision, AuthError> {
        let mut ctx = DecisionContext::new();

        if let Some(target) = target {
            ctx.hierarchy = self.verify_chain(principal, action, target)?;
            if ctx.hierarchy != HierarchyStatus::Broken {
                if let Some(governing) = &target.owned_by {
                    match self.lookup.facts(governing)? {
                        Some(facts) => ctx.owner_id = facts.owner_id,
                        // A governing resource that does not exist
                        // breaks the claim like a missing chain member.
                        None => ctx.hierarchy = HierarchyStatus::Broken,
                    }
                }
            }
        }

        let decision = self.pdp.decide(principal, action, &ctx)?;
        self.log(principal, action, &decision);
        Ok(decision)
    }

    /// Authorizes a category mutation: policy decision first, then the
    /// structural guard, surfacing guard violations on the same
    /// decision channel.
    ///
    /// # Errors
    ///
    /// Same as [`authorize`](Self::authorize); category rules normally
    /// carry `admin_only` or plain permission scope, so owner facts
    /// are not consulted here.
    pub fn authorize_category(
        &self,
        principal: &Principal,
        action: &ActionId,
        guard: &CategoryTreeGuard,
        arena: &CategoryArena,
        op: &CategoryOp,
    ) -> Result<Decision, AuthError> {
        let decision = self.pdp.decide(principal, action, &DecisionContext::new())?;
        if !decision.is_allowed() {
            self.log(principal, action, &decision);
            return Ok(decision);
        }

        let structural = match op {
            CategoryOp::Insert { name, parent_id } => {
                guard.check_insert(arena, name, parent_id.as_ref())
            }
            CategoryOp::Reparent {
                node_id,
                new_parent_id,
            } => guard.check_reparent(arena, node_id, new_parent_id.as_ref()),
        };

        let decision = match structural {
            Ok(()) => Decision::allow(),
            Err(err) => Decision::deny(DenyReason::from(&err)),
        };
        self.log(principal, action, &decision);
        Ok(decision)
    }

    /// Runs chain validation for a claimed target.
    ///
    /// Chains shorter than two links carry no containment claim.
    fn verify_chain(
        &self,
        principal: &Principal,
        action: &ActionId,
        target: &ResourceTarget,
    ) -> Result<HierarchyStatus, AuthError> {
        if target.chain.len() < 2 {
            return Ok(HierarchyStatus::NotNested);
        }
        match validate_chain(&target.chain, self.lookup.as_ref()) {
            Ok(()) => Ok(HierarchyStatus::Verified),
            Err(HierarchyError::Lookup(err)) => Err(AuthError::Lookup(err)),
            Err(err) => {
                warn!(
                    principal = %principal.id,
                    action = %action,
                    error = %err,
                    "hierarchy validation failed"
                );
                Ok(HierarchyStatus::Broken)
            }
        }
    }

    fn log(&self, principal: &Principal, action: &ActionId, decision: &Decision) {
        match decision.reason() {
            None => debug!(principal = %principal.id, action = %action, "authorized"),
            Some(reason) => warn!(
                principal = %principal.id,
                action = %action,
                reason = %reason,
                "denied"
            ),
        }
    }
}

impl std::fmt::Debug for ServerGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerGate")
            .field("rules", &self.pdp.rules().len())
            .finish_non_exhaustive()
    }
}

/// The advisory, client-side gate.
///
/// Decides whether to *render* an affordance (a button, a row action)
/// from facts the client already holds. Performs no lookups and never
/// fails: anything short of a clean Allow — including stale or missing
/// facts — hides the affordance. The server gate remains the sole
/// authority when the operation is actually invoked.
///
/// # Example
///
/// ```
/// use edukit_auth::{AccessRule, AdvisoryGate, OwnershipScope, PolicyDecisionPoint, RuleSet};
/// use edukit_types::{Principal, Role};
/// use std::sync::Arc;
///
/// let rules = RuleSet::new().with_rule(
///     "task.update",
///     AccessRule::new(OwnershipScope::OwnerOrAdmin).requiring("task.update"),
/// );
/// let gate = AdvisoryGate::new(Arc::new(PolicyDecisionPoint::new(rules)));
///
/// let owner = Principal::new("u1", vec![Role::new("TEACHER", ["task.update"])]);
/// assert!(gate.can(&owner, &"task.update".into(), Some(&"u1".into())));
/// assert!(!gate.can(&owner, &"task.update".into(), Some(&"u2".into())));
/// // Facts the client does not have: hide rather than guess.
/// assert!(!gate.can(&owner, &"task.update".into(), None));
/// ```
#[derive(Debug, Clone)]
pub struct AdvisoryGate {
    pdp: Arc<PolicyDecisionPoint>,
}

impl AdvisoryGate {
    /// Creates an advisory gate over the shared decision point.
    #[must_use]
    pub fn new(pdp: Arc<PolicyDecisionPoint>) -> Self {
        Self { pdp }
    }

    /// Returns `true` if the affordance for `action` should be shown.
    ///
    /// `owner_id` is the resource owner as the client knows it, if
    /// relevant and known. Never authoritative.
    #[must_use]
    pub fn can(
        &self,
        principal: &Principal,
        action: &ActionId,
        owner_id: Option<&PrincipalId>,
    ) -> bool {
        let mut ctx = DecisionContext::new();
        ctx.owner_id = owner_id.cloned();

        match self.pdp.decide(principal, action, &ctx) {
            Ok(decision) => decision.is_allowed(),
            Err(err) => {
                debug!(
                    principal = %principal.id,
                    action = %action,
                    error = %err,
                    "advisory check fell back to hide"
                );
                false
            }
        }
    }
}
