//! Core types for the edukit authorization engine.
//!
//! This crate provides the identity and resource model shared by the
//! authorization engine (`edukit-auth`) and its consumers (route
//! guards, UI gating code, the data layer).
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Stable Model Layer                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  edukit-types : ids, Principal, Role, ResourceRef  ◄── HERE │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Engine Layer                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  edukit-auth  : PermissionSet, hierarchy, rules, PDP, gates │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Host Layer                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  route handlers, UI stores, data-layer lookup impls         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Identity only, no policy** — this crate says *who* is acting
//!   and *what* a resource is; whether an action is allowed lives in
//!   `edukit-auth`.
//! - **Opaque external keys** — identifiers, role names, permission
//!   names and action ids are newtyped strings minted by the external
//!   identity and data collaborators. The engine never interprets
//!   their contents (the one exception: the canonical [`ADMIN_ROLE`]
//!   name).
//! - **Value types** — everything is `Clone + Eq + Hash` and serde
//!   serializable, so facts can cross process boundaries and tests
//!   can compare them directly.
//!
//! # Example
//!
//! ```
//! use edukit_types::{Principal, Role, ResourceKind, ResourceRef};
//!
//! let teacher = Principal::new(
//!     "teacher-42",
//!     vec![Role::new("TEACHER", ["course.resource.create"])],
//! );
//! assert!(teacher.has_role_named("TEACHER"));
//!
//! let course = ResourceRef::new(ResourceKind::Course, "c1");
//! assert_eq!(course.to_string(), "course:c1");
//! ```

pub mod id;
pub mod name;
pub mod principal;
pub mod resource;

pub use id::{PrincipalId, ResourceId, RoleVersion};
pub use name::{ActionId, PermissionName, RoleName, ADMIN_ROLE};
pub use principal::{Principal, Role};
pub use resource::{ResourceFacts, ResourceKind, ResourceRef};
