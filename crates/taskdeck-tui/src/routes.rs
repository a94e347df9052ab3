//! Route guard layer.
//!
//! Navigation is a plain enum value in state; the guard is a pure,
//! synchronous function evaluated after every reducer step. A redirect
//! replaces the current route outright, so there is nothing for a
//! back-navigation to return to.

use taskdeck_core::session::Session;

/// Screens of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Login/registration form. Public-only.
    Auth,
    /// Task list. Protected.
    Home,
    /// Assigned-by-me / assigned-to-me summary. Protected.
    Dashboard,
    /// Task assignment. Protected.
    Assign,
}

/// Guard policy attached to each route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardPolicy {
    /// Requires an authenticated session; otherwise redirect to Auth.
    Protected,
    /// Requires an anonymous session; otherwise redirect to Home.
    PublicOnly,
}

impl Route {
    pub fn policy(self) -> GuardPolicy {
        match self {
            Route::Auth => GuardPolicy::PublicOnly,
            Route::Home | Route::Dashboard | Route::Assign => GuardPolicy::Protected,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Auth => "Sign in",
            Route::Home => "Tasks",
            Route::Dashboard => "Dashboard",
            Route::Assign => "Assign",
        }
    }
}

/// Resolves the effective route for the current session.
pub fn resolve(requested: Route, session: &Session) -> Route {
    match requested.policy() {
        GuardPolicy::Protected if !session.is_authenticated() => Route::Auth,
        GuardPolicy::PublicOnly if session.is_authenticated() => Route::Home,
        _ => requested,
    }
}
