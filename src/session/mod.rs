// Client session: persisted credentials, derived routes and the navigation guard

pub mod auth;
pub mod context;
pub mod guard;
pub mod route;
pub mod storage;

pub use auth::{AuthSession, AuthState};
pub use context::{AppContext, SessionPhase};
pub use guard::{login_redirect, GuardOutcome, NavigationGuard, HOME_PATH, LOGIN_PATH};
pub use route::{RouteSession, RouteState};
pub use storage::{FileStorage, MemoryStorage, Storage};
