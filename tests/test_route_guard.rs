//! Tests for the dashboard route guard

use infrasee::auth::{AccessDecision, AuthState, Role, RouteAccess, RouteGuard};

fn admin() -> AuthState {
    AuthState::signed_in(Some(Role::Admin))
}

fn moderator() -> AuthState {
    AuthState::signed_in(Some(Role::Moderator))
}

#[test]
fn test_public_routes_open_to_everyone() {
    let guard = RouteGuard::dashboard();
    for path in ["/login", "/reset-password", "/unauthorized"] {
        assert_eq!(
            guard.check(path, &AuthState::anonymous()),
            AccessDecision::Allow,
            "{} should be public",
            path
        );
    }
}

#[test]
fn test_dashboard_requires_sign_in() {
    let guard = RouteGuard::dashboard();
    assert_eq!(
        guard.check("/", &AuthState::anonymous()),
        AccessDecision::Unauthorized
    );
    assert_eq!(
        guard.check("/", &AuthState::signed_in(None)),
        AccessDecision::Allow
    );
    assert_eq!(
        guard.check("/data?status=open", &AuthState::signed_in(None)),
        AccessDecision::Allow
    );
}

#[test]
fn test_admin_area() {
    let guard = RouteGuard::dashboard();
    assert_eq!(guard.check("/admin/users", &admin()), AccessDecision::Allow);
    assert_eq!(
        guard.check("/admin/users", &moderator()),
        AccessDecision::Unauthorized
    );
    assert_eq!(
        guard.check("/admin", &AuthState::signed_in(None)),
        AccessDecision::Unauthorized
    );
}

#[test]
fn test_moderator_area_allows_admins() {
    let guard = RouteGuard::dashboard();
    assert_eq!(
        guard.check("/moderator/queue", &moderator()),
        AccessDecision::Allow
    );
    assert_eq!(guard.check("/moderator/queue", &admin()), AccessDecision::Allow);
    assert_eq!(
        guard.check("/moderator/queue", &AuthState::anonymous()),
        AccessDecision::Unauthorized
    );
}

#[test]
fn test_unknown_paths_are_not_found() {
    let guard = RouteGuard::dashboard();
    assert_eq!(guard.check("/nope", &admin()), AccessDecision::NotFound);
    assert_eq!(
        guard.check("/administrator", &admin()),
        AccessDecision::NotFound,
        "prefix routes only match whole path segments"
    );
}

#[test]
fn test_resolve_returns_route() {
    let guard = RouteGuard::dashboard();
    let route = guard.resolve("/admin/settings/").unwrap();
    assert_eq!(route.pattern, "/admin/*");
    assert_eq!(route.access, RouteAccess::Role(Role::Admin));
    assert!(guard.resolve("/missing").is_none());
}
