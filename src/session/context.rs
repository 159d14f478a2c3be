use std::sync::Arc;

use serde::Serialize;

use super::auth::AuthSession;
use super::guard::{GuardOutcome, NavigationGuard, LOGIN_PATH};
use super::route::RouteSession;
use super::storage::Storage;
use crate::api::AdminApi;
use crate::config::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Anonymous,
    Authenticating,
    AuthenticatedUninitialized,
    RoutesReady,
}

/// One per process: the two stores and the guard that drives them
pub struct AppContext {
    pub config: AppConfig,
    pub auth: Arc<AuthSession>,
    pub route: Arc<RouteSession>,
    pub guard: NavigationGuard,
}

impl AppContext {
    pub fn new(config: AppConfig, storage: Arc<dyn Storage>, api: Arc<dyn AdminApi>) -> Self {
        let auth = Arc::new(AuthSession::new(api, storage));
        let route = Arc::new(RouteSession::new(Arc::clone(&auth), config.router.clone()));
        let guard = NavigationGuard::new(Arc::clone(&auth), Arc::clone(&route));
        Self {
            config,
            auth,
            route,
            guard,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        if self.auth.is_authenticating() {
            SessionPhase::Authenticating
        } else if !self.auth.is_login() {
            SessionPhase::Anonymous
        } else if self.route.is_initialized() {
            SessionPhase::RoutesReady
        } else {
            SessionPhase::AuthenticatedUninitialized
        }
    }

    pub async fn navigate(&self, full_path: &str) -> GuardOutcome {
        let outcome = self.guard.before_each(full_path).await;
        tracing::debug!("navigate {} -> {:?}", full_path, outcome);
        outcome
    }

    /// Clear both stores; the caller lands on the login page
    pub fn logout(&self) -> GuardOutcome {
        self.auth.reset();
        self.route.reset();
        GuardOutcome::Redirect(LOGIN_PATH.to_string())
    }
}
