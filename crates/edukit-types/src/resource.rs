//! Resource references and decision-time facts.
//!
//! Every entity subject to access control is addressed by a
//! [`ResourceRef`] (kind + id). What the data layer knows about a
//! resource at decision time — its owner and its immediate container —
//! travels as [`ResourceFacts`].
//!
//! # Nesting
//!
//! Parent references form chains:
//!
//! ```text
//! Course ◄── TeachingPlan ◄── TeachingPlanResource
//! Category ◄── Category ◄── Category          (self-referential)
//! ```
//!
//! Facts are read fresh per decision and never cached across requests;
//! ownership can change between requests and a stale Allow is a
//! security defect.

use crate::{PrincipalId, ResourceId};
use serde::{Deserialize, Serialize};

/// The kind of an access-controlled entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// A course.
    Course,
    /// A teaching plan belonging to a course.
    TeachingPlan,
    /// A resource (document, attachment) belonging to a teaching plan.
    TeachingPlanResource,
    /// A task belonging to a course.
    Task,
    /// A self-referential category node.
    Category,
}

impl ResourceKind {
    /// Returns the stable snake_case name used in logs and config.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Course => "course",
            Self::TeachingPlan => "teaching_plan",
            Self::TeachingPlanResource => "teaching_plan_resource",
            Self::Task => "task",
            Self::Category => "category",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A typed reference to one access-controlled resource.
///
/// # Example
///
/// ```
/// use edukit_types::{ResourceKind, ResourceRef};
///
/// let plan = ResourceRef::new(ResourceKind::TeachingPlan, "p1");
/// assert_eq!(plan.to_string(), "teaching_plan:p1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRef {
    /// What kind of entity is referenced.
    pub kind: ResourceKind,
    /// The entity's id within that kind.
    pub id: ResourceId,
}

impl ResourceRef {
    /// Creates a reference to the given resource.
    #[must_use]
    pub fn new(kind: ResourceKind, id: impl Into<ResourceId>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl std::fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// What the data layer reports about one resource at decision time.
///
/// Both fields are optional: top-level resources have no parent, and
/// not every entity records an author.
///
/// # Example
///
/// ```
/// use edukit_types::{ResourceFacts, ResourceKind, ResourceRef};
///
/// let facts = ResourceFacts::new()
///     .owned_by("teacher-42")
///     .contained_in(ResourceRef::new(ResourceKind::Course, "c1"));
/// assert!(facts.owner_id.is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceFacts {
    /// The principal considered the resource's author, if any.
    pub owner_id: Option<PrincipalId>,
    /// The immediate containing resource, if any.
    pub parent: Option<ResourceRef>,
}

impl ResourceFacts {
    /// Creates empty facts (no owner, no parent).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the owning principal.
    #[must_use]
    pub fn owned_by(mut self, owner: impl Into<PrincipalId>) -> Self {
        self.owner_id = Some(owner.into());
        self
    }

    /// Sets the immediate container.
    #[must_use]
    pub fn contained_in(mut self, parent: ResourceRef) -> Self {
        self.parent = Some(parent);
        self
    }
}
