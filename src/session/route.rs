use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use futures::future::{BoxFuture, FutureExt, Shared};
use serde::Serialize;

use super::auth::AuthSession;
use crate::config::RouterConfig;
use crate::error::SessionError;
use crate::router::{build_auth_routes, AuthRoute, MenuItem, PermissionSet, RouteViews, VueRoute};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteState {
    pub is_init_auth_route: bool,
    pub menus: Vec<MenuItem>,
    pub cache_routes: Vec<String>,
    pub routes: Vec<VueRoute>,
    pub auth_routes: Vec<AuthRoute>,
}

type InitFuture = Shared<BoxFuture<'static, Result<(), SessionError>>>;

/// In-flight initialisation, tagged with the generation that started it
type InitSlot = Option<(u64, InitFuture)>;

/// Owns everything derived from the permission group: menu, compiled routes
/// and cached component names.
pub struct RouteSession {
    auth: Arc<AuthSession>,
    config: RouterConfig,
    state: RwLock<RouteState>,
    in_flight: Mutex<InitSlot>,
    init_runs: AtomicUsize,
    /// Bumped on every reset, only while holding the state write lock
    generation: AtomicU64,
}

impl RouteSession {
    pub fn new(auth: Arc<AuthSession>, config: RouterConfig) -> Self {
        Self {
            auth,
            config,
            state: RwLock::new(RouteState::default()),
            in_flight: Mutex::new(None),
            init_runs: AtomicUsize::new(0),
            generation: AtomicU64::new(0),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, RouteState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RouteState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_initialized(&self) -> bool {
        self.read().is_init_auth_route
    }

    pub fn menus(&self) -> Vec<MenuItem> {
        self.read().menus.clone()
    }

    pub fn cache_routes(&self) -> Vec<String> {
        self.read().cache_routes.clone()
    }

    pub fn routes(&self) -> Vec<VueRoute> {
        self.read().routes.clone()
    }

    pub fn snapshot(&self) -> RouteState {
        self.read().clone()
    }

    /// How many times the fetch-and-build pipeline has actually run
    pub fn init_runs(&self) -> usize {
        self.init_runs.load(Ordering::SeqCst)
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Run the route pipeline once for this session. Concurrent callers
    /// join the initialisation already in flight and share its result. An
    /// initialisation started before the last reset is never joined.
    pub async fn init_auth_route(self: &Arc<Self>) -> Result<(), SessionError> {
        let generation = self.generation();
        let pending = {
            let mut slot = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
            match slot.as_ref() {
                Some((started, pending)) if *started == generation => {
                    tracing::debug!("joining in-flight route initialisation");
                    pending.clone()
                }
                _ => {
                    let this = Arc::clone(self);
                    let pending = async move {
                        let result = this.run_init(generation).await;
                        let mut slot = this.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
                        if matches!(slot.as_ref(), Some((started, _)) if *started == generation) {
                            slot.take();
                        }
                        result
                    }
                    .boxed()
                    .shared();
                    *slot = Some((generation, pending.clone()));
                    pending
                }
            }
        };
        pending.await
    }

    async fn run_init(&self, generation: u64) -> Result<(), SessionError> {
        if self.is_initialized() {
            return Ok(());
        }
        if !self.auth.is_login() {
            return Err(SessionError::NotAuthenticated);
        }
        self.init_runs.fetch_add(1, Ordering::SeqCst);

        match self.auth.after_login().await {
            Ok(group) => {
                let granted = PermissionSet::from(group.permission);
                let routes = build_auth_routes(group.menus, &granted);
                self.commit(generation, routes)?;
                tracing::info!("auth routes initialised");
                Ok(())
            }
            Err(SessionError::Superseded) => Err(SessionError::Superseded),
            Err(e) if self.generation() != generation => {
                tracing::debug!("stale route initialisation failed: {}", e);
                Err(SessionError::Superseded)
            }
            Err(e) => {
                tracing::warn!("route initialisation failed, resetting session: {}", e);
                self.auth.reset();
                self.reset();
                Err(e)
            }
        }
    }

    /// Store the derived views and mark the session initialised, unless a
    /// reset happened since `generation` was read.
    fn commit(&self, generation: u64, auth_routes: Vec<AuthRoute>) -> Result<(), SessionError> {
        let views = self.derive_views(&auth_routes);
        let mut state = self.write();
        if self.generation() != generation {
            tracing::debug!("session reset during route initialisation, discarding");
            return Err(SessionError::Superseded);
        }
        store_views(&mut state, views, auth_routes);
        state.is_init_auth_route = true;
        Ok(())
    }

    /// Derive menu, compiled routes and cache names from a filtered tree
    pub fn handle_auth_route(&self, auth_routes: Vec<AuthRoute>) {
        let views = self.derive_views(&auth_routes);
        store_views(&mut self.write(), views, auth_routes);
    }

    fn derive_views(&self, auth_routes: &[AuthRoute]) -> RouteViews {
        let views = RouteViews::derive(auth_routes, &self.config.cache_name_prefix);
        if self.config.debug_logging {
            tracing::debug!(
                "derived {} menu entries, {} route records, cache: {:?}",
                views.menus.len(),
                views.routes.len(),
                views.cache_routes
            );
        }
        views
    }

    pub fn add_cache_route(&self, name: &str) {
        let mut state = self.write();
        if !state.cache_routes.iter().any(|n| n == name) {
            state.cache_routes.push(name.to_string());
        }
    }

    pub fn remove_cache_route(&self, name: &str) {
        let mut state = self.write();
        if let Some(index) = state.cache_routes.iter().position(|n| n == name) {
            state.cache_routes.remove(index);
        }
    }

    /// Back to the initial state. Any initialisation still in flight is
    /// detached and its result discarded.
    pub fn reset(&self) {
        {
            let mut state = self.write();
            self.generation.fetch_add(1, Ordering::SeqCst);
            *state = RouteState::default();
        }
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

fn store_views(state: &mut RouteState, views: RouteViews, auth_routes: Vec<AuthRoute>) {
    state.menus = views.menus;
    state.routes = views.routes;
    state.cache_routes = views.cache_routes;
    state.auth_routes = auth_routes;
}
