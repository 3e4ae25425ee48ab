//! Category tree structural guard.
//!
//! Categories are self-referential: a category's parent is another
//! category. The guard maintains the tree invariants before any
//! mutation is applied:
//!
//! 1. **No cycles** — no category is its own ancestor
//! 2. **Sibling uniqueness** — `name` is unique among nodes sharing a
//!    parent (the root group, `parent_id == None`, counts as one
//!    sibling group)
//! 3. **Parent existence** — a claimed parent must exist
//!
//! Depth is unbounded by design; traversal cost is bounded by a
//! configurable maximum depth (default 64) surfaced as
//! [`CategoryError::TooDeep`]. Name comparison is case-sensitive:
//! `"Math"` and `"math"` are distinct siblings.
//!
//! The tree is modeled as an explicit arena ([`CategoryArena`],
//! id → node), which makes cycle detection a single linear walk up
//! the ancestor chain instead of ad hoc recursive queries.

use edukit_types::ResourceId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Default bound on ancestor-chain traversal.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Errors from category tree validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CategoryError {
    /// The claimed parent category does not exist.
    #[error("parent category not found: {id}")]
    UnknownParent {
        /// The missing parent id.
        id: ResourceId,
    },

    /// The category being moved does not exist.
    #[error("category not found: {id}")]
    UnknownNode {
        /// The missing node id.
        id: ResourceId,
    },

    /// A sibling under the same parent already carries this name.
    #[error("category name already used by a sibling: '{name}'")]
    NameConflict {
        /// The conflicting name.
        name: String,
    },

    /// The mutation would make a category its own ancestor.
    #[error("reparenting {node} under {new_parent} would create a cycle")]
    Cycle {
        /// The node being reparented.
        node: ResourceId,
        /// The requested new parent.
        new_parent: ResourceId,
    },

    /// Traversal exceeded the configured depth bound.
    #[error("category chain deeper than the configured bound of {max}")]
    TooDeep {
        /// The configured bound that was exceeded.
        max: usize,
    },
}

/// A node of the self-referential category tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    /// The category's id.
    pub id: ResourceId,
    /// Display name, unique among siblings (case-sensitive).
    pub name: String,
    /// Parent category, or `None` for a root category.
    pub parent_id: Option<ResourceId>,
}

impl CategoryNode {
    /// Creates a node.
    #[must_use]
    pub fn new(
        id: impl Into<ResourceId>,
        name: impl Into<String>,
        parent_id: Option<ResourceId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id,
        }
    }
}

/// Arena-style id → node view of the category tree.
///
/// Read-only from the guard's perspective; the host populates it from
/// its data layer for the scope of one validation. Lookups are O(1),
/// so ancestor-chain traversal is linear in depth.
///
/// # Example
///
/// ```
/// use edukit_auth::{CategoryArena, CategoryNode};
///
/// let arena = CategoryArena::new()
///     .with(CategoryNode::new("a", "Science", None))
///     .with(CategoryNode::new("b", "Physics", Some("a".into())));
///
/// assert_eq!(arena.children_of(Some(&"a".into())).count(), 1);
/// assert_eq!(arena.children_of(None).count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CategoryArena {
    nodes: HashMap<ResourceId, CategoryNode>,
}

impl CategoryArena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node, builder style.
    #[must_use]
    pub fn with(mut self, node: CategoryNode) -> Self {
        self.insert(node);
        self
    }

    /// Adds a node, replacing any node with the same id.
    pub fn insert(&mut self, node: CategoryNode) {
        self.nodes.insert(node.id.clone(), node);
    }

    /// Returns the node with the given id.
    #[must_use]
    pub fn get(&self, id: &ResourceId) -> Option<&CategoryNode> {
        self.nodes.get(id)
    }

    /// Iterates the sibling group under the given parent.
    ///
    /// `None` selects the root group.
    pub fn children_of<'a>(
        &'a self,
        parent: Option<&'a ResourceId>,
    ) -> impl Iterator<Item = &'a CategoryNode> {
        self.nodes
            .values()
            .filter(move |n| n.parent_id.as_ref() == parent)
    }

    /// Walks parent links from `start` to the root.
    ///
    /// Returns the ancestor ids starting with `start` itself. Bounded
    /// by `max_depth`; a chain longer than the bound (including one
    /// lengthened by pre-existing corruption into a cycle) yields
    /// [`CategoryError::TooDeep`] rather than looping forever.
    ///
    /// # Errors
    ///
    /// [`CategoryError::UnknownNode`] if a parent link dangles,
    /// [`CategoryError::TooDeep`] if the bound is exceeded.
    pub fn ancestor_chain(
        &self,
        start: &ResourceId,
        max_depth: usize,
    ) -> Result<Vec<ResourceId>, CategoryError> {
        let mut chain = Vec::new();
        let mut current = Some(start.clone());
        while let Some(id) = current {
            if chain.len() >= max_depth {
                return Err(CategoryError::TooDeep { max: max_depth });
            }
            let node = self
                .nodes
                .get(&id)
                .ok_or(CategoryError::UnknownNode { id })?;
            chain.push(node.id.clone());
            current = node.parent_id.clone();
        }
        Ok(chain)
    }
}

/// Structural invariant checks for category mutations.
///
/// Stateless apart from its depth bound; the tree itself is passed in
/// as a [`CategoryArena`] per validation.
///
/// # Example
///
/// ```
/// use edukit_auth::{CategoryArena, CategoryError, CategoryNode, CategoryTreeGuard};
///
/// let arena = CategoryArena::new().with(CategoryNode::new("a", "Math", None));
/// let guard = CategoryTreeGuard::new();
///
/// // Sibling conflict in the root group.
/// let err = guard.check_insert(&arena, "Math", None).unwrap_err();
/// assert_eq!(err, CategoryError::NameConflict { name: "Math".into() });
///
/// // Same name under a different parent is fine.
/// assert!(guard.check_insert(&arena, "Math", Some(&"a".into())).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CategoryTreeGuard {
    max_depth: usize,
}

impl Default for CategoryTreeGuard {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CategoryTreeGuard {
    /// Creates a guard with the default depth bound.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a guard with a custom depth bound.
    #[must_use]
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Returns the configured depth bound.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Checks that a new category may be inserted.
    ///
    /// # Errors
    ///
    /// - [`CategoryError::UnknownParent`] if `parent_id` names a
    ///   nonexistent category
    /// - [`CategoryError::NameConflict`] if a sibling already carries
    ///   `name` (case-sensitive; the root group counts as one sibling
    ///   group)
    /// - [`CategoryError::TooDeep`] if the insertion point already
    ///   sits at the depth bound
    pub fn check_insert(
        &self,
        arena: &CategoryArena,
        name: &str,
        parent_id: Option<&ResourceId>,
    ) -> Result<(), CategoryError> {
        if let Some(parent) = parent_id {
            if arena.get(parent).is_none() {
                return Err(CategoryError::UnknownParent { id: parent.clone() });
            }
            // The new node sits one level below its parent's chain.
            let parent_chain = arena.ancestor_chain(parent, self.max_depth)?;
            if parent_chain.len() >= self.max_depth {
                return Err(CategoryError::TooDeep {
                    max: self.max_depth,
                });
            }
        }
        self.check_sibling_name(arena, name, parent_id, None)
    }

    /// Checks that a category may be moved under a new parent.
    ///
    /// Reparenting to the root (`new_parent_id == None`) is always
    /// cycle-free; only sibling uniqueness applies there.
    ///
    /// # Errors
    ///
    /// - [`CategoryError::UnknownNode`] / [`CategoryError::UnknownParent`]
    ///   for missing participants
    /// - [`CategoryError::Cycle`] if `node_id` appears in the new
    ///   parent's ancestor chain (self-parenting included)
    /// - [`CategoryError::NameConflict`] if the destination sibling
    ///   group already uses the node's name
    /// - [`CategoryError::TooDeep`] if the destination exceeds the
    ///   depth bound
    pub fn check_reparent(
        &self,
        arena: &CategoryArena,
        node_id: &ResourceId,
        new_parent_id: Option<&ResourceId>,
    ) -> Result<(), CategoryError> {
        let node = arena.get(node_id).ok_or_else(|| CategoryError::UnknownNode {
            id: node_id.clone(),
        })?;

        if let Some(new_parent) = new_parent_id {
            if arena.get(new_parent).is_none() {
                return Err(CategoryError::UnknownParent {
                    id: new_parent.clone(),
                });
            }
            let chain = arena.ancestor_chain(new_parent, self.max_depth)?;
            if chain.contains(node_id) {
                return Err(CategoryError::Cycle {
                    node: node_id.clone(),
                    new_parent: new_parent.clone(),
                });
            }
            if chain.len() >= self.max_depth {
                return Err(CategoryError::TooDeep {
                    max: self.max_depth,
                });
            }
        }

        self.check_sibling_name(arena, &node.name, new_parent_id, Some(node_id))
    }

    /// Sibling-uniqueness rule shared by insert and reparent.
    ///
    /// `exclude` skips the node being moved so a no-op reparent does
    /// not conflict with itself.
    fn check_sibling_name(
        &self,
        arena: &CategoryArena,
        name: &str,
        parent_id: Option<&ResourceId>,
        exclude: Option<&ResourceId>,
    ) -> Result<(), CategoryError> {
        let conflict = arena
            .children_of(parent_id)
            .filter(|sibling| Some(&sibling.id) != exclude)
            .any(|sibling| sibling.name == name);
        if conflict {
            return Err(CategoryError::NameConflict {
                name: name.to_string(),
            });
        }
        Ok(())
    }
}
