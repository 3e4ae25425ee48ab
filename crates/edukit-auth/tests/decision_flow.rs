//! End-to-end decision flows through the server and advisory gates.
//!
//! These tests wire the full stack — rule table, permission cache,
//! hierarchy validation, ownership facts — the way a route guard
//! would, using the in-memory lookup.

use edukit_auth::testing::{FailingLookup, MemoryLookup};
use edukit_auth::{
    AdvisoryGate, AuthError, CategoryArena, CategoryNode, CategoryOp, CategoryTreeGuard,
    DenyReason, PolicyDecisionPoint, ResourceTarget, RuleSet, ServerGate,
};
use edukit_types::{Principal, ResourceFacts, ResourceKind, ResourceRef, Role, RoleVersion};
use std::sync::Arc;

fn course(id: &str) -> ResourceRef {
    ResourceRef::new(ResourceKind::Course, id)
}

fn plan(id: &str) -> ResourceRef {
    ResourceRef::new(ResourceKind::TeachingPlan, id)
}

fn plan_resource(id: &str) -> ResourceRef {
    ResourceRef::new(ResourceKind::TeachingPlanResource, id)
}

/// The rule table a small education host would load at startup.
fn rules() -> RuleSet {
    RuleSet::from_toml_str(
        r#"
        [rules."course.resource.create"]
        permission = "course.resource.create"
        scope = "owner_or_admin"

        [rules."course.list"]
        scope = "none"

        [rules."category.create"]
        permission = "category.manage"
        scope = "admin_only"
    "#,
    )
    .expect("rule table parses")
}

/// Course c1 (owned by teacher-42) ◄ plan p1 ◄ resource r1.
fn lookup() -> Arc<MemoryLookup> {
    Arc::new(
        MemoryLookup::new()
            .with(course("c1"), ResourceFacts::new().owned_by("teacher-42"))
            .with(plan("p1"), ResourceFacts::new().contained_in(course("c1")))
            .with(
                plan_resource("r1"),
                ResourceFacts::new().contained_in(plan("p1")),
            ),
    )
}

fn gate() -> ServerGate {
    ServerGate::new(Arc::new(PolicyDecisionPoint::new(rules())), lookup())
}

fn teacher(id: &str) -> Principal {
    Principal::new(
        id,
        vec![Role::new("TEACHER", ["course.resource.create"])],
    )
}

fn nested_target() -> ResourceTarget {
    ResourceTarget::nested([course("c1"), plan("p1"), plan_resource("r1")]).owned_by_outermost()
}

#[test]
fn owning_teacher_creates_resource_in_own_course() {
    let decision = gate()
        .authorize(
            &teacher("teacher-42"),
            &"course.resource.create".into(),
            Some(&nested_target()),
        )
        .expect("no infrastructure fault");
    assert!(decision.is_allowed());
    assert!(decision.reason().is_none());
}

#[test]
fn other_teacher_denied_not_owner() {
    let decision = gate()
        .authorize(
            &teacher("teacher-99"),
            &"course.resource.create".into(),
            Some(&nested_target()),
        )
        .expect("no infrastructure fault");
    assert_eq!(decision.reason(), Some(DenyReason::NotOwner));
}

#[test]
fn admin_creates_resource_in_foreign_course() {
    let admin = Principal::new(
        "admin-1",
        vec![Role::new("ADMIN", ["course.resource.create"])],
    );
    let decision = gate()
        .authorize(&admin, &"course.resource.create".into(), Some(&nested_target()))
        .expect("no infrastructure fault");
    assert!(decision.is_allowed());
}

#[test]
fn renested_resource_denied_invalid_hierarchy() {
    // teacher-99 owns c2 and nests teacher-42's r1 under it to ride
    // their own ownership check. The chain claim breaks first.
    let lookup = Arc::new(
        MemoryLookup::new()
            .with(course("c1"), ResourceFacts::new().owned_by("teacher-42"))
            .with(course("c2"), ResourceFacts::new().owned_by("teacher-99"))
            .with(plan("p1"), ResourceFacts::new().contained_in(course("c1")))
            .with(
                plan_resource("r1"),
                ResourceFacts::new().contained_in(plan("p1")),
            ),
    );
    let gate = ServerGate::new(Arc::new(PolicyDecisionPoint::new(rules())), lookup);
    let confused =
        ResourceTarget::nested([course("c2"), plan("p1"), plan_resource("r1")]).owned_by_outermost();
    let decision = gate
        .authorize(
            &teacher("teacher-99"),
            &"course.resource.create".into(),
            Some(&confused),
        )
        .expect("no infrastructure fault");
    assert_eq!(decision.reason(), Some(DenyReason::InvalidHierarchy));
}

#[test]
fn unknown_action_fails_closed_for_admin() {
    let admin = Principal::new("admin-1", vec![Role::named("ADMIN")]);
    let decision = gate()
        .authorize(&admin, &"course.archive".into(), None)
        .expect("no infrastructure fault");
    assert_eq!(decision.reason(), Some(DenyReason::UnknownAction));
}

#[test]
fn open_action_allows_permissionless_principal() {
    let student = Principal::new("s1", vec![Role::named("STUDENT")]);
    let decision = gate()
        .authorize(&student, &"course.list".into(), None)
        .expect("no infrastructure fault");
    assert!(decision.is_allowed());
}

#[test]
fn store_outage_is_an_error_not_forbidden() {
    let gate = ServerGate::new(
        Arc::new(PolicyDecisionPoint::new(rules())),
        Arc::new(FailingLookup::new("backing store unavailable")),
    );
    let err = gate
        .authorize(
            &teacher("teacher-42"),
            &"course.resource.create".into(),
            Some(&nested_target()),
        )
        .unwrap_err();
    assert!(matches!(err, AuthError::Lookup(_)), "got: {err}");
}

#[test]
fn authorization_is_idempotent_across_calls() {
    let gate = gate();
    let p = teacher("teacher-99");
    let action = "course.resource.create".into();
    let first = gate
        .authorize(&p, &action, Some(&nested_target()))
        .expect("ok");
    let second = gate
        .authorize(&p, &action, Some(&nested_target()))
        .expect("ok");
    assert_eq!(first, second);
}

#[test]
fn role_revocation_takes_effect_via_version_stamp() {
    let pdp = Arc::new(PolicyDecisionPoint::new(rules()));
    let gate = ServerGate::new(Arc::clone(&pdp), lookup());
    let action = "course.resource.create".into();

    let before = Principal::with_version(
        "teacher-42",
        vec![Role::new("TEACHER", ["course.resource.create"])],
        RoleVersion::new(1),
    );
    assert!(gate
        .authorize(&before, &action, Some(&nested_target()))
        .expect("ok")
        .is_allowed());

    // Identity system revokes the role and bumps the version; the
    // cached permission set must not linger.
    let after = Principal::with_version("teacher-42", vec![], RoleVersion::new(2));
    let decision = gate
        .authorize(&after, &action, Some(&nested_target()))
        .expect("ok");
    assert_eq!(decision.reason(), Some(DenyReason::MissingPermission));
}

#[test]
fn category_mutation_full_flow() {
    let gate = gate();
    let guard = CategoryTreeGuard::new();
    let arena = CategoryArena::new()
        .with(CategoryNode::new("root-sci", "Science", None))
        .with(CategoryNode::new("math", "Math", Some("root-sci".into())));
    let admin = Principal::new("admin-1", vec![Role::new("ADMIN", ["category.manage"])]);
    let action = "category.create".into();

    // New unique sibling: allowed.
    let op = CategoryOp::Insert {
        name: "Arts".into(),
        parent_id: None,
    };
    assert!(gate
        .authorize_category(&admin, &action, &guard, &arena, &op)
        .expect("ok")
        .is_allowed());

    // Duplicate "Math" under the same parent: structural deny.
    let op = CategoryOp::Insert {
        name: "Math".into(),
        parent_id: Some("root-sci".into()),
    };
    let decision = gate
        .authorize_category(&admin, &action, &guard, &arena, &op)
        .expect("ok");
    assert_eq!(decision.reason(), Some(DenyReason::CategoryNameConflict));

    // "Math" under a different parent: allowed.
    let op = CategoryOp::Insert {
        name: "Math".into(),
        parent_id: None,
    };
    assert!(gate
        .authorize_category(&admin, &action, &guard, &arena, &op)
        .expect("ok")
        .is_allowed());

    // Non-admin blocked by policy before structure is examined.
    let op = CategoryOp::Insert {
        name: "Blocked".into(),
        parent_id: None,
    };
    let decision = gate
        .authorize_category(&teacher("teacher-42"), &action, &guard, &arena, &op)
        .expect("ok");
    assert_eq!(decision.reason(), Some(DenyReason::MissingPermission));
}

#[test]
fn advisory_and_server_gates_share_one_policy() {
    let pdp = Arc::new(PolicyDecisionPoint::new(rules()));
    let server = ServerGate::new(Arc::clone(&pdp), lookup());
    let advisory = AdvisoryGate::new(pdp);
    let action = "course.resource.create".into();

    let owner = teacher("teacher-42");
    let stranger = teacher("teacher-99");

    // UI shows the button only for the owner...
    assert!(advisory.can(&owner, &action, Some(&"teacher-42".into())));
    assert!(!advisory.can(&stranger, &action, Some(&"teacher-42".into())));

    // ...and the server agrees when the operation actually runs.
    assert!(server
        .authorize(&owner, &action, Some(&nested_target()))
        .expect("ok")
        .is_allowed());
    assert!(!server
        .authorize(&stranger, &action, Some(&nested_target()))
        .expect("ok")
        .is_allowed());
}
