use std::sync::Arc;

use serde::Serialize;

use super::auth::AuthSession;
use super::route::RouteSession;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "to", rename_all = "lowercase")]
pub enum GuardOutcome {
    Proceed,
    Redirect(String),
}

/// Runs before every navigation
pub struct NavigationGuard {
    auth: Arc<AuthSession>,
    route: Arc<RouteSession>,
}

impl NavigationGuard {
    pub fn new(auth: Arc<AuthSession>, route: Arc<RouteSession>) -> Self {
        Self { auth, route }
    }

    pub async fn before_each(&self, full_path: &str) -> GuardOutcome {
        let to_login = path_of(full_path) == LOGIN_PATH;

        if !self.auth.is_login() {
            if to_login {
                return GuardOutcome::Proceed;
            }
            tracing::debug!("anonymous visit to {}, redirecting to login", full_path);
            return GuardOutcome::Redirect(login_redirect(full_path));
        }

        if to_login {
            return GuardOutcome::Redirect(HOME_PATH.to_string());
        }

        if !self.route.is_initialized() {
            if let Err(e) = self.route.init_auth_route().await {
                tracing::warn!("route initialisation failed for {}: {}", full_path, e);
                return GuardOutcome::Redirect(login_redirect(full_path));
            }
        }

        GuardOutcome::Proceed
    }
}

/// `/login?redirect=<full_path>`
pub fn login_redirect(full_path: &str) -> String {
    format!("{}?redirect={}", LOGIN_PATH, full_path)
}

fn path_of(full_path: &str) -> &str {
    full_path.split(['?', '#']).next().unwrap_or(full_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_redirect_keeps_target() {
        assert_eq!(login_redirect("/member"), "/login?redirect=/member");
        assert_eq!(login_redirect("/"), "/login?redirect=/");
    }

    #[test]
    fn test_path_of_strips_query() {
        assert_eq!(path_of("/login?redirect=%2F"), "/login");
        assert_eq!(path_of("/login#top"), "/login");
        assert_eq!(path_of("/"), "/");
    }
}
