//! Role-gated dashboard routes
//!
//! The guard only reflects an auth flag the client already holds; real
//! enforcement happens at the identity provider.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Dashboard roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Moderator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Moderator => "moderator",
        }
    }

    /// Admins can open everything a moderator can
    pub fn satisfies(&self, required: Role) -> bool {
        matches!(
            (self, required),
            (Role::Admin, _) | (Role::Moderator, Role::Moderator)
        )
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the client believes about the signed-in user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthState {
    pub authenticated: bool,
    pub role: Option<Role>,
}

impl AuthState {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(role: Option<Role>) -> Self {
        Self {
            authenticated: true,
            role,
        }
    }
}

/// Who may open a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    Authenticated,
    Role(Role),
}

impl fmt::Display for RouteAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteAccess::Public => write!(f, "public"),
            RouteAccess::Authenticated => write!(f, "signed in"),
            RouteAccess::Role(role) => write!(f, "{} only", role),
        }
    }
}

/// A dashboard route. `pattern` is an exact path or a prefix ending in `/*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub pattern: &'static str,
    pub title: &'static str,
    pub access: RouteAccess,
}

impl Route {
    pub const fn new(pattern: &'static str, title: &'static str, access: RouteAccess) -> Self {
        Self {
            pattern,
            title,
            access,
        }
    }

    /// Check whether a normalized path falls under this route
    pub fn matches(&self, path: &str) -> bool {
        match self.pattern.strip_suffix("/*") {
            Some(prefix) => {
                path == prefix
                    || path
                        .strip_prefix(prefix)
                        .is_some_and(|rest| rest.starts_with('/'))
            }
            None => path == self.pattern,
        }
    }

    fn allows(&self, auth: &AuthState) -> bool {
        match self.access {
            RouteAccess::Public => true,
            RouteAccess::Authenticated => auth.authenticated,
            RouteAccess::Role(required) => {
                auth.authenticated && auth.role.is_some_and(|role| role.satisfies(required))
            }
        }
    }
}

/// Outcome of a guard check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    /// Render the 401 page
    Unauthorized,
    /// Render the 404 page
    NotFound,
}

impl AccessDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessDecision::Allow => "allow",
            AccessDecision::Unauthorized => "unauthorized",
            AccessDecision::NotFound => "not found",
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }

    /// HTTP status the dashboard renders for this decision
    pub fn status(&self) -> u16 {
        match self {
            AccessDecision::Allow => 200,
            AccessDecision::Unauthorized => 401,
            AccessDecision::NotFound => 404,
        }
    }
}

impl fmt::Display for AccessDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Strip query/fragment and trailing slashes; empty becomes `/`
pub fn normalize_path(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// Ordered route table; the first matching route decides
#[derive(Debug, Clone)]
pub struct RouteGuard {
    routes: Vec<Route>,
}

impl RouteGuard {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// The InfraSee dashboard route table
    pub fn dashboard() -> Self {
        Self::new(vec![
            Route::new("/", "Dashboard", RouteAccess::Authenticated),
            Route::new("/data", "Data table", RouteAccess::Authenticated),
            Route::new("/admin/*", "Administration", RouteAccess::Role(Role::Admin)),
            Route::new(
                "/moderator/*",
                "Moderation",
                RouteAccess::Role(Role::Moderator),
            ),
            Route::new("/login", "Sign in", RouteAccess::Public),
            Route::new("/reset-password", "Password reset", RouteAccess::Public),
            Route::new("/unauthorized", "Unauthorized", RouteAccess::Public),
        ])
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Find the route a path belongs to
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        let path = normalize_path(path);
        self.routes.iter().find(|route| route.matches(path))
    }

    /// Decide whether `auth` may open `path`
    pub fn check(&self, path: &str, auth: &AuthState) -> AccessDecision {
        let decision = match self.resolve(path) {
            None => AccessDecision::NotFound,
            Some(route) if route.allows(auth) => AccessDecision::Allow,
            Some(_) => AccessDecision::Unauthorized,
        };
        debug!(path, %decision, "route guard");
        decision
    }
}
