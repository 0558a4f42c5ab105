//! Route guards for the admin and moderator areas

mod guard;

pub use guard::{normalize_path, AccessDecision, AuthState, Role, Route, RouteAccess, RouteGuard};
