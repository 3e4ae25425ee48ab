//! Resource lookup collaborator seam.
//!
//! The engine never persists entities; it reads owner/parent facts
//! through [`ResourceLookup`] at decision time. The host implements
//! this trait against its data layer.
//!
//! # Architecture
//!
//! ```text
//! ResourceLookup trait (edukit-auth)   ← seam definition
//!          │
//!          ├── host data-layer impl    ← production
//!          └── MemoryLookup (testing)  ← in-memory, for tests/docs
//! ```
//!
//! # Not-found vs failure
//!
//! A missing resource is a *successful* lookup returning `None` — a
//! fact the validators turn into a Deny. [`LookupError`] is reserved
//! for infrastructure failure (backing store unreachable) and is
//! propagated to the caller so it can be reported as a 5xx-class
//! failure rather than a false "forbidden". Lookups are never retried
//! inside the engine; retrying a security check invites TOCTOU bugs.

use edukit_types::{ResourceFacts, ResourceRef};
use thiserror::Error;

/// Infrastructure failure while consulting the data layer.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The backing store could not be reached or answered abnormally.
    #[error("resource lookup failed: {context}")]
    Backend {
        /// What the data layer reported.
        context: String,
    },
}

impl LookupError {
    /// Creates a backend failure with the given context.
    #[must_use]
    pub fn backend(context: impl Into<String>) -> Self {
        Self::Backend {
            context: context.into(),
        }
    }
}

/// Read-only access to decision-time resource facts.
///
/// Implementations must be cheap to call repeatedly: the engine reads
/// facts fresh per decision and imposes no caching of its own. Calls
/// inherit whatever timeout the host request pipeline applies.
///
/// # Implementors
///
/// - The host's data layer (production)
/// - [`MemoryLookup`](crate::testing::MemoryLookup) (tests, examples)
pub trait ResourceLookup: Send + Sync + std::fmt::Debug {
    /// Returns the facts for a resource, or `None` if it does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] only for infrastructure failure, never
    /// for a missing resource.
    fn facts(&self, resource: &ResourceRef) -> Result<Option<ResourceFacts>, LookupError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingLookup, MemoryLookup};
    use edukit_types::ResourceKind;
    use std::sync::Arc;

    #[test]
    fn missing_resource_is_ok_none() {
        let lookup = MemoryLookup::new();
        let course = ResourceRef::new(ResourceKind::Course, "c1");
        assert!(lookup.facts(&course).expect("lookup ok").is_none());
    }

    #[test]
    fn present_resource_returns_facts() {
        let course = ResourceRef::new(ResourceKind::Course, "c1");
        let lookup = MemoryLookup::new().with(course.clone(), ResourceFacts::new().owned_by("u1"));
        let facts = lookup.facts(&course).expect("lookup ok").expect("present");
        assert!(facts.owner_id.is_some());
    }

    #[test]
    fn backend_failure_is_err_not_none() {
        let lookup = FailingLookup::new("connection refused");
        let course = ResourceRef::new(ResourceKind::Course, "c1");
        let err = lookup.facts(&course).unwrap_err();
        assert!(err.to_string().contains("connection refused"), "got: {err}");
    }

    #[test]
    fn trait_object_arc_dyn() {
        let lookup: Arc<dyn ResourceLookup> = Arc::new(MemoryLookup::new());
        let task = ResourceRef::new(ResourceKind::Task, "t1");
        assert!(lookup.facts(&task).expect("lookup ok").is_none());
    }
}
