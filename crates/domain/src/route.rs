//! Route access policy.
//!
//! Two path spaces are classified here: API paths, which decide whether the
//! request pipeline attaches and polices credentials, and client pages,
//! which decide what a guard does for the current session.

use serde::{Deserialize, Serialize};

use crate::auth::Session;

/// API prefixes reachable without credentials.
pub const DEFAULT_PUBLIC_API_PREFIXES: &[&str] = &["/lost", "/events", "/health", "/auth/login"];
/// API prefix reserved for administrators.
pub const DEFAULT_ADMIN_API_PREFIX: &str = "/admin";
/// Pages that never redirect to login.
pub const DEFAULT_PUBLIC_PAGES: &[&str] = &["/login", "/objetos-perdidos", "/calendario"];
/// Page prefix reserved for administrators.
pub const DEFAULT_ADMIN_PAGE_PREFIX: &str = "/admin";
/// Where anonymous users are sent.
pub const DEFAULT_LOGIN_PAGE: &str = "/login";

/// Access class of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteAccess {
    /// Reachable anonymously
    Public,
    /// Requires a session
    Protected,
    /// Requires an administrator session
    AdminOnly,
}

/// Outcome of guarding a page for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the page.
    Allow,
    /// Session is still loading; show a placeholder.
    Pending,
    /// Send the user to the login page.
    RedirectToLogin,
    /// Logged in, but not allowed here.
    Forbidden,
}

/// Static path classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePolicy {
    /// API path prefixes that are public
    pub public_api_prefixes: Vec<String>,
    /// API path prefix reserved for admins
    pub admin_api_prefix: String,
    /// Pages that are public (exact match)
    pub public_pages: Vec<String>,
    /// Page prefix reserved for admins
    pub admin_page_prefix: String,
    /// Login page
    pub login_page: String,
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self {
            public_api_prefixes: DEFAULT_PUBLIC_API_PREFIXES
                .iter()
                .map(ToString::to_string)
                .collect(),
            admin_api_prefix: DEFAULT_ADMIN_API_PREFIX.to_string(),
            public_pages: DEFAULT_PUBLIC_PAGES.iter().map(ToString::to_string).collect(),
            admin_page_prefix: DEFAULT_ADMIN_PAGE_PREFIX.to_string(),
            login_page: DEFAULT_LOGIN_PAGE.to_string(),
        }
    }
}

impl RoutePolicy {
    /// Returns true if the API path starts with a public prefix.
    #[must_use]
    pub fn is_public_api(&self, path: &str) -> bool {
        self.public_api_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    /// Classifies an API path.
    #[must_use]
    pub fn classify_api(&self, path: &str) -> RouteAccess {
        if self.is_public_api(path) {
            RouteAccess::Public
        } else if path.starts_with(&self.admin_api_prefix) {
            RouteAccess::AdminOnly
        } else {
            RouteAccess::Protected
        }
    }

    /// Returns true if the page never requires a session.
    #[must_use]
    pub fn is_public_page(&self, page: &str) -> bool {
        self.public_pages.iter().any(|p| p == page)
    }

    /// Classifies a client page.
    #[must_use]
    pub fn classify_page(&self, page: &str) -> RouteAccess {
        if self.is_public_page(page) {
            RouteAccess::Public
        } else if page.starts_with(&self.admin_page_prefix) {
            RouteAccess::AdminOnly
        } else {
            RouteAccess::Protected
        }
    }

    /// Decides what to do when `session` visits `page`.
    #[must_use]
    pub fn guard_page(&self, page: &str, session: &Session) -> GuardDecision {
        let access = self.classify_page(page);
        if access == RouteAccess::Public {
            return GuardDecision::Allow;
        }
        if session.is_loading() {
            return GuardDecision::Pending;
        }
        if !session.is_authenticated() {
            return GuardDecision::RedirectToLogin;
        }
        if access == RouteAccess::AdminOnly && !session.is_admin() {
            return GuardDecision::Forbidden;
        }
        GuardDecision::Allow
    }
}
