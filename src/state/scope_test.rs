use super::*;

#[test]
fn begin_sets_pending_state() {
    let scope = ViewScope::new("idle");
    assert!(scope.begin("pending").is_some());
    assert_eq!(scope.snapshot(), "pending");
}

#[test]
fn resolve_applies_latest_ticket() {
    let scope = ViewScope::new("idle");
    let ticket = scope.begin("pending").unwrap();
    assert!(scope.resolve(ticket, "done"));
    assert_eq!(scope.snapshot(), "done");
}

#[test]
fn resolve_discards_superseded_ticket() {
    let scope = ViewScope::new("idle");
    let first = scope.begin("pending-1").unwrap();
    let second = scope.begin("pending-2").unwrap();
    assert_ne!(first, second);

    assert!(scope.resolve(second, "second"));
    assert!(!scope.resolve(first, "first"));
    assert_eq!(scope.snapshot(), "second");
}

#[test]
fn resolve_after_teardown_is_discarded() {
    let scope = ViewScope::new("idle");
    let ticket = scope.begin("pending").unwrap();
    scope.teardown();

    assert!(scope.is_torn_down());
    assert!(!scope.resolve(ticket, "late"));
    assert_eq!(scope.snapshot(), "pending");
}

#[test]
fn begin_after_teardown_is_refused() {
    let scope = ViewScope::new("idle");
    scope.teardown();
    assert!(scope.begin("pending").is_none());
    assert_eq!(scope.snapshot(), "idle");
}

#[test]
fn started_scope_resolves_its_first_ticket() {
    let (scope, ticket) = ViewScope::started("pending");
    assert_eq!(scope.snapshot(), "pending");
    assert!(!scope.is_torn_down());
    assert!(scope.resolve(ticket, "done"));
    assert_eq!(scope.snapshot(), "done");
}

#[test]
fn started_ticket_is_superseded_by_next_begin() {
    let (scope, first) = ViewScope::started("pending-1");
    let second = scope.begin("pending-2").unwrap();
    assert_ne!(first, second);
    assert!(!scope.resolve(first, "stale"));
    assert_eq!(scope.snapshot(), "pending-2");
}
