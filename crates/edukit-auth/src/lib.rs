//! Authorization and resource-scoping engine for edukit.
//!
//! This crate decides, for an authenticated principal and a requested
//! action on a (possibly nested) resource, whether the operation is
//! permitted. It composes three independent concerns into one
//! deny-by-default decision:
//!
//! ```text
//! Decision = Rule(WHAT) ∩ Ownership(WHOSE) ∩ Hierarchy(WHERE)
//! ```
//!
//! | Concern | Type | Controls |
//! |---------|------|----------|
//! | [`RuleSet`] + [`PermissionSet`] | Config + derived set | What actions a principal's roles permit |
//! | [`OwnershipScope`] | Enum per rule | Whether authorship or admin status restricts the action |
//! | [`validate_chain`] + [`CategoryTreeGuard`] | Functions | Whether the claimed resource nesting is real |
//!
//! # Data Flow
//!
//! ```text
//! request (principal, action, claimed chain)
//!        │
//!        ▼
//! ┌─────────────┐   chain ok?   ┌──────────────────┐
//! │ ServerGate  │ ────────────► │ validate_chain   │
//! └─────┬───────┘               └──────────────────┘
//!       │ owner facts via ResourceLookup
//!       ▼
//! ┌─────────────────────┐       ┌──────────────────┐
//! │ PolicyDecisionPoint │ ────► │ PermissionCache  │
//! └─────┬───────────────┘       └──────────────────┘
//!       ▼
//!    Decision { allowed, reason } ── allow → proceed / deny → reject
//! ```
//!
//! The UI consumes the same policy through [`AdvisoryGate`], which
//! only hides affordances and is never authoritative — the server
//! gate re-evaluates when the operation is actually invoked.
//!
//! # Design Principles
//!
//! - **Deny by default** — an action with no registered rule denies
//!   everyone, ADMIN included.
//! - **Denials are data, faults are errors** — [`Decision`] carries a
//!   [`DenyReason`]; only infrastructure failures and caller
//!   programming errors surface as [`AuthError`]. A broken backing
//!   store is a 5xx, never a false "forbidden".
//! - **Fresh facts per decision** — ownership and parent facts are
//!   read through [`ResourceLookup`] at decision time and never
//!   cached; only permission-set resolution is cached, guarded by a
//!   role-version stamp.
//!
//! # Example
//!
//! ```
//! use edukit_auth::testing::MemoryLookup;
//! use edukit_auth::{
//!     AccessRule, AdvisoryGate, OwnershipScope, PolicyDecisionPoint, ResourceTarget, RuleSet,
//!     ServerGate,
//! };
//! use edukit_types::{Principal, ResourceFacts, ResourceKind, ResourceRef, Role};
//! use std::sync::Arc;
//!
//! let rules = RuleSet::new().with_rule(
//!     "course.resource.create",
//!     AccessRule::new(OwnershipScope::OwnerOrAdmin)
//!         .requiring("course.resource.create"),
//! );
//! let pdp = Arc::new(PolicyDecisionPoint::new(rules));
//!
//! let course = ResourceRef::new(ResourceKind::Course, "c1");
//! let lookup = Arc::new(
//!     MemoryLookup::new().with(course.clone(), ResourceFacts::new().owned_by("teacher-42")),
//! );
//!
//! let gate = ServerGate::new(Arc::clone(&pdp), lookup);
//! let teacher = Principal::new(
//!     "teacher-42",
//!     vec![Role::new("TEACHER", ["course.resource.create"])],
//! );
//!
//! let target = ResourceTarget::single(course).owned_by_target();
//! let decision = gate
//!     .authorize(&teacher, &"course.resource.create".into(), Some(&target))
//!     .unwrap();
//! assert!(decision.is_allowed());
//!
//! // Advisory mode for UI gating, same policy, caller-known facts only.
//! let ui = AdvisoryGate::new(pdp);
//! assert!(ui.can(&teacher, &"course.resource.create".into(), Some(&"teacher-42".into())));
//! ```

pub mod category;
pub mod decision;
pub mod gate;
pub mod hierarchy;
pub mod lookup;
pub mod permission;
pub mod policy;
pub mod rule;
pub mod testing;

pub use category::{CategoryArena, CategoryError, CategoryNode, CategoryTreeGuard};
pub use decision::{Decision, DenyReason};
pub use gate::{AdvisoryGate, CategoryOp, ResourceTarget, ServerGate};
pub use hierarchy::{validate_chain, HierarchyError};
pub use lookup::{LookupError, ResourceLookup};
pub use permission::{PermissionCache, PermissionSet};
pub use policy::{AuthError, DecisionContext, HierarchyStatus, PolicyDecisionPoint};
pub use rule::{AccessRule, OwnershipScope, RuleConfigError, RuleSet};

// Re-export the model types consumers always need alongside the engine.
pub use edukit_types::{
    ActionId, PermissionName, Principal, PrincipalId, ResourceFacts, ResourceId, ResourceKind,
    ResourceRef, Role, RoleName, RoleVersion, ADMIN_ROLE,
};
