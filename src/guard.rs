//! Routes and the route guard
//!
//! The client has three screens. Only the movie list needs a session; the
//! guard decides on every navigation, with no memory of earlier decisions.

use std::fmt;

use crate::session::SessionContext;

/// A screen of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Login form
    Login,
    /// Registration form
    Register,
    /// Movie catalog
    Movies,
}

impl Route {
    /// Resolves a path to a route.
    ///
    /// The empty path redirects to [`Route::Movies`]. Leading and trailing
    /// slashes are ignored. Unknown paths resolve to `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use moviedesk::guard::Route;
    ///
    /// assert_eq!(Route::resolve("/"), Some(Route::Movies));
    /// assert_eq!(Route::resolve("/login"), Some(Route::Login));
    /// assert_eq!(Route::resolve("admin"), None);
    /// ```
    pub fn resolve(path: &str) -> Option<Self> {
        match path.trim().trim_matches('/') {
            "" | "movies" => Some(Self::Movies),
            "login" => Some(Self::Login),
            "register" => Some(Self::Register),
            _ => None,
        }
    }

    /// Whether navigating here requires a live session.
    pub fn is_protected(self) -> bool {
        matches!(self, Self::Movies)
    }

    /// Canonical path of the route.
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Movies => "/movies",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Result of a navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Render the requested route
    Allow(Route),
    /// Navigation denied; render this route instead
    Redirect(Route),
}

/// Gatekeeper for protected routes.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    session: SessionContext,
}

impl RouteGuard {
    /// Creates a guard consulting `session`.
    pub fn new(session: SessionContext) -> Self {
        Self { session }
    }

    /// Decides whether `route` may be rendered.
    ///
    /// Protected routes require [`SessionContext::is_logged_in`]; otherwise
    /// the navigation is redirected to the login screen. The requested route
    /// is not remembered.
    pub fn check(&self, route: Route) -> Navigation {
        if !route.is_protected() || self.session.is_logged_in() {
            return Navigation::Allow(route);
        }
        tracing::info!(route = %route, "Not logged in, redirecting to login");
        Navigation::Redirect(Route::Login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{LoginResponse, MemorySessionStore};
    use crate::test_utils::{expired_jwt, valid_jwt};
    use std::sync::Arc;

    fn guard_with_token(token: Option<String>) -> (RouteGuard, SessionContext) {
        let ctx = SessionContext::new(Arc::new(MemorySessionStore::new()));
        if let Some(token) = token {
            ctx.begin(&LoginResponse {
                token: Some(token),
                role: None,
            })
            .unwrap();
        }
        (RouteGuard::new(ctx.clone()), ctx)
    }

    #[test]
    fn test_resolve_paths() {
        assert_eq!(Route::resolve(""), Some(Route::Movies));
        assert_eq!(Route::resolve("movies/"), Some(Route::Movies));
        assert_eq!(Route::resolve("/register"), Some(Route::Register));
        assert_eq!(Route::resolve("/nowhere"), None);
    }

    #[test]
    fn test_only_movies_is_protected() {
        assert!(Route::Movies.is_protected());
        assert!(!Route::Login.is_protected());
        assert!(!Route::Register.is_protected());
    }

    #[test]
    fn test_no_token_redirects_to_login() {
        let (guard, _) = guard_with_token(None);
        assert_eq!(guard.check(Route::Movies), Navigation::Redirect(Route::Login));
    }

    #[test]
    fn test_expired_token_redirects_to_login() {
        let (guard, _) = guard_with_token(Some(expired_jwt()));
        assert_eq!(guard.check(Route::Movies), Navigation::Redirect(Route::Login));
    }

    #[test]
    fn test_valid_token_allows_movies() {
        let (guard, _) = guard_with_token(Some(valid_jwt()));
        assert_eq!(guard.check(Route::Movies), Navigation::Allow(Route::Movies));
    }

    #[test]
    fn test_public_routes_always_allowed() {
        let (guard, _) = guard_with_token(None);
        assert_eq!(guard.check(Route::Login), Navigation::Allow(Route::Login));
        assert_eq!(
            guard.check(Route::Register),
            Navigation::Allow(Route::Register)
        );
    }

    #[test]
    fn test_decision_is_not_cached() {
        let (guard, ctx) = guard_with_token(Some(valid_jwt()));
        assert_eq!(guard.check(Route::Movies), Navigation::Allow(Route::Movies));
        ctx.logout().unwrap();
        assert_eq!(guard.check(Route::Movies), Navigation::Redirect(Route::Login));
    }
}
