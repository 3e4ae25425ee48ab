//! In-memory collaborators for tests and examples.
//!
//! Production hosts implement [`ResourceLookup`] against their data
//! layer; these implementations let the engine be exercised without
//! one. They are part of the public API so downstream crates can use
//! them in their own tests.

use crate::lookup::{LookupError, ResourceLookup};
use edukit_types::{ResourceFacts, ResourceRef};
use std::collections::HashMap;

/// A [`ResourceLookup`] backed by a plain map.
///
/// # Example
///
/// ```
/// use edukit_auth::testing::MemoryLookup;
/// use edukit_auth::ResourceLookup;
/// use edukit_types::{ResourceFacts, ResourceKind, ResourceRef};
///
/// let course = ResourceRef::new(ResourceKind::Course, "c1");
/// let lookup = MemoryLookup::new()
///     .with(course.clone(), ResourceFacts::new().owned_by("teacher-42"));
///
/// let facts = lookup.facts(&course).unwrap().unwrap();
/// assert_eq!(facts.owner_id, Some("teacher-42".into()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryLookup {
    resources: HashMap<ResourceRef, ResourceFacts>,
}

impl MemoryLookup {
    /// Creates an empty lookup (every resource is absent).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resource with its facts, builder style.
    #[must_use]
    pub fn with(mut self, resource: ResourceRef, facts: ResourceFacts) -> Self {
        self.insert(resource, facts);
        self
    }

    /// Adds a resource with its facts.
    pub fn insert(&mut self, resource: ResourceRef, facts: ResourceFacts) {
        self.resources.insert(resource, facts);
    }

    /// Removes a resource.
    pub fn remove(&mut self, resource: &ResourceRef) {
        self.resources.remove(resource);
    }
}

impl ResourceLookup for MemoryLookup {
    fn facts(&self, resource: &ResourceRef) -> Result<Option<ResourceFacts>, LookupError> {
        Ok(self.resources.get(resource).cloned())
    }
}

/// A [`ResourceLookup`] whose every call fails, for exercising
/// infrastructure-fault paths.
#[derive(Debug, Clone)]
pub struct FailingLookup {
    context: String,
}

impl FailingLookup {
    /// Creates a lookup that fails with the given context message.
    #[must_use]
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
        }
    }
}

impl ResourceLookup for FailingLookup {
    fn facts(&self, _resource: &ResourceRef) -> Result<Option<ResourceFacts>, LookupError> {
        Err(LookupError::backend(self.context.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edukit_types::ResourceKind;

    #[test]
    fn insert_and_remove() {
        let course = ResourceRef::new(ResourceKind::Course, "c1");
        let mut lookup = MemoryLookup::new();
        lookup.insert(course.clone(), ResourceFacts::new());
        assert!(lookup.facts(&course).unwrap().is_some());

        lookup.remove(&course);
        assert!(lookup.facts(&course).unwrap().is_none());
    }

    #[test]
    fn failing_lookup_always_errs() {
        let lookup = FailingLookup::new("boom");
        let r = ResourceRef::new(ResourceKind::Task, "t1");
        assert!(lookup.facts(&r).is_err());
        assert!(lookup.facts(&r).is_err()); // no one-shot behavior
    }
}
