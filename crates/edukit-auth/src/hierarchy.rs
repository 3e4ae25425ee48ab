//! Hierarchy chain validation.
//!
//! Nested routes claim an ancestor chain for the resource they touch
//! (`/courses/c1/plans/p1/resources/r1` claims
//! `Course c1 ◄ TeachingPlan p1 ◄ TeachingPlanResource r1`).
//! [`validate_chain`] confirms each resource's *actual* parent
//! reference matches the claimed chain before any parent-scoped
//! authorization runs.
//!
//! Without this check a caller could nest a resource they are
//! authorized to touch under an unrelated parent id and ride that
//! parent's ownership check — the "path confusion" bypass.
//!
//! # Failure modes
//!
//! [`HierarchyError::NotFound`] and [`HierarchyError::Mismatch`] both
//! collapse to the single external deny reason
//! [`DenyReason::InvalidHierarchy`](crate::DenyReason::InvalidHierarchy);
//! they stay distinct here for logs and tests.
//! [`HierarchyError::Lookup`] is an infrastructure fault and must not
//! be treated as a denial.

use crate::lookup::{LookupError, ResourceLookup};
use edukit_types::ResourceRef;
use thiserror::Error;

/// Errors from hierarchy chain validation.
#[derive(Debug, Error)]
pub enum HierarchyError {
    /// A resource in the claimed chain does not exist.
    #[error("resource not found in claimed chain: {resource}")]
    NotFound {
        /// The missing resource.
        resource: ResourceRef,
    },

    /// A resource's actual parent disagrees with the claimed chain.
    #[error("hierarchy mismatch: {child} claims parent {claimed_parent}, actual {}",
        actual_parent.as_ref().map_or_else(|| "(none)".to_string(), ToString::to_string))]
    Mismatch {
        /// The inner resource whose parent was checked.
        child: ResourceRef,
        /// The parent the caller claimed.
        claimed_parent: ResourceRef,
        /// The parent the data layer reports, if any.
        actual_parent: Option<ResourceRef>,
    },

    /// The data layer failed; not a security verdict.
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl HierarchyError {
    /// Returns `true` if this is a security denial rather than an
    /// infrastructure fault.
    ///
    /// Only a *successful* lookup that contradicts the request denies;
    /// a failed lookup propagates so the host can answer 5xx.
    #[must_use]
    pub fn is_denial(&self) -> bool {
        !matches!(self, Self::Lookup(_))
    }
}

/// Validates a claimed ancestor chain against actual parent facts.
///
/// `chain` is ordered outermost to innermost, e.g.
/// `[Course c1, TeachingPlan p1, TeachingPlanResource r1]`. The walk
/// runs innermost to outermost and fails fast at the first missing
/// resource or parent mismatch. Chains of length 0 or 1 validate
/// trivially — there is nothing to cross-check.
///
/// # Errors
///
/// - [`HierarchyError::NotFound`] if any inner resource is absent
/// - [`HierarchyError::Mismatch`] if a reported parent disagrees with
///   the claimed outer resource
/// - [`HierarchyError::Lookup`] if the data layer fails
///
/// # Example
///
/// ```
/// use edukit_auth::testing::MemoryLookup;
/// use edukit_auth::validate_chain;
/// use edukit_types::{ResourceFacts, ResourceKind, ResourceRef};
///
/// let course = ResourceRef::new(ResourceKind::Course, "c1");
/// let plan = ResourceRef::new(ResourceKind::TeachingPlan, "p1");
/// let lookup = MemoryLookup::new()
///     .with(course.clone(), ResourceFacts::new())
///     .with(plan.clone(), ResourceFacts::new().contained_in(course.clone()));
///
/// assert!(validate_chain(&[course, plan], &lookup).is_ok());
/// ```
pub fn validate_chain(
    chain: &[ResourceRef],
    lookup: &dyn ResourceLookup,
) -> Result<(), HierarchyError> {
    // Innermost first: the deepest link is the one the request is
    // actually about, so its integrity fails fastest.
    for pair in chain.windows(2).rev() {
        let (outer, inner) = (&pair[0], &pair[1]);
        let facts = lookup
            .facts(inner)?
            .ok_or_else(|| HierarchyError::NotFound {
                resource: inner.clone(),
            })?;
        if facts.parent.as_ref() != Some(outer) {
            return Err(HierarchyError::Mismatch {
                child: inner.clone(),
                claimed_parent: outer.clone(),
                actual_parent: facts.parent,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingLookup, MemoryLookup};
    use edukit_types::{ResourceFacts, ResourceKind};

    fn course(id: &str) -> ResourceRef {
        ResourceRef::new(ResourceKind::Course, id)
    }

    fn plan(id: &str) -> ResourceRef {
        ResourceRef::new(ResourceKind::TeachingPlan, id)
    }

    fn plan_resource(id: &str) -> ResourceRef {
        ResourceRef::new(ResourceKind::TeachingPlanResource, id)
    }

    /// c1 ◄ p1 ◄ r1, all parent links consistent.
    fn seeded_lookup() -> MemoryLookup {
        MemoryLookup::new()
            .with(course("c1"), ResourceFacts::new().owned_by("teacher-42"))
            .with(plan("p1"), ResourceFacts::new().contained_in(course("c1")))
            .with(
                plan_resource("r1"),
                ResourceFacts::new().contained_in(plan("p1")),
            )
            .with(course("c2"), ResourceFacts::new().owned_by("teacher-99"))
    }

    #[test]
    fn valid_three_level_chain() {
        let lookup = seeded_lookup();
        let chain = [course("c1"), plan("p1"), plan_resource("r1")];
        assert!(validate_chain(&chain, &lookup).is_ok());
    }

    #[test]
    fn empty_and_single_chains_validate_trivially() {
        let lookup = seeded_lookup();
        assert!(validate_chain(&[], &lookup).is_ok());
        assert!(validate_chain(&[course("c1")], &lookup).is_ok());
        // Even a nonexistent lone resource: nothing to cross-check.
        assert!(validate_chain(&[course("ghost")], &lookup).is_ok());
    }

    #[test]
    fn mutated_outer_link_is_mismatch() {
        let lookup = seeded_lookup();
        // r1 really belongs to p1 under c1, caller claims c2.
        let chain = [course("c2"), plan("p1"), plan_resource("r1")];
        let err = validate_chain(&chain, &lookup).unwrap_err();
        assert!(matches!(err, HierarchyError::Mismatch { .. }), "got: {err}");
        assert!(err.is_denial());
    }

    #[test]
    fn mutated_middle_link_is_mismatch() {
        let lookup = seeded_lookup()
            .with(plan("p2"), ResourceFacts::new().contained_in(course("c2")));
        let chain = [course("c1"), plan("p2"), plan_resource("r1")];
        let err = validate_chain(&chain, &lookup).unwrap_err();
        // Fails at the innermost pair first: r1's parent is p1, not p2.
        match err {
            HierarchyError::Mismatch { child, claimed_parent, .. } => {
                assert_eq!(child, plan_resource("r1"));
                assert_eq!(claimed_parent, plan("p2"));
            }
            other => panic!("expected Mismatch, got: {other}"),
        }
    }

    #[test]
    fn missing_inner_resource_is_not_found() {
        let lookup = seeded_lookup();
        let chain = [course("c1"), plan("ghost")];
        let err = validate_chain(&chain, &lookup).unwrap_err();
        assert!(matches!(err, HierarchyError::NotFound { .. }), "got: {err}");
        assert!(err.is_denial());
    }

    #[test]
    fn parentless_inner_resource_is_mismatch() {
        let lookup = seeded_lookup().with(plan("orphan"), ResourceFacts::new());
        let chain = [course("c1"), plan("orphan")];
        let err = validate_chain(&chain, &lookup).unwrap_err();
        match err {
            HierarchyError::Mismatch { actual_parent, .. } => assert!(actual_parent.is_none()),
            other => panic!("expected Mismatch, got: {other}"),
        }
    }

    #[test]
    fn lookup_fault_propagates_as_non_denial() {
        let lookup = FailingLookup::new("store down");
        let chain = [course("c1"), plan("p1")];
        let err = validate_chain(&chain, &lookup).unwrap_err();
        assert!(matches!(err, HierarchyError::Lookup(_)), "got: {err}");
        assert!(!err.is_denial());
    }

    #[test]
    fn mismatch_display_names_both_parents() {
        let lookup = seeded_lookup();
        let chain = [course("c2"), plan("p1")];
        let msg = validate_chain(&chain, &lookup).unwrap_err().to_string();
        assert!(msg.contains("teaching_plan:p1"), "got: {msg}");
        assert!(msg.contains("course:c2"), "got: {msg}");
        assert!(msg.contains("course:c1"), "got: {msg}");
    }
}
