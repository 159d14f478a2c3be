// Permission-driven route pipeline:
// records -> transform -> sort -> filter -> (menu | compile -> cache)

pub mod cache;
pub mod compile;
pub mod filter;
pub mod icons;
pub mod menu;
pub mod permission;
pub mod sort;
pub mod transform;
pub mod types;

pub use cache::{get_cache_routes, CACHE_NAME_PREFIX};
pub use compile::compile_routes;
pub use filter::{filter_routes, FilterOutcome};
pub use menu::transform_auth_routes_to_menu;
pub use permission::{PermissionError, PermissionGate, PermissionSet};
pub use sort::sort_routes;
pub use transform::{ensure_home_route, transform_api_routes};
pub use types::*;

use serde::Serialize;

/// Transform, sort and filter the backend records for one user
pub fn build_auth_routes(mut records: Vec<RawRouteRecord>, granted: &PermissionSet) -> Vec<AuthRoute> {
    ensure_home_route(&mut records);
    let mut routes = transform_api_routes(&records);
    sort_routes(&mut routes);
    let routes = filter_routes(&routes, granted);
    tracing::debug!(
        "built {} top-level auth routes from {} records ({} permissions granted)",
        routes.len(),
        records.len(),
        granted.len()
    );
    routes
}

/// Everything the application derives from the filtered route tree
#[derive(Debug, Clone, Default, Serialize)]
pub struct RouteViews {
    pub menus: Vec<MenuItem>,
    pub routes: Vec<VueRoute>,
    #[serde(rename = "cacheRoutes")]
    pub cache_routes: Vec<String>,
}

impl RouteViews {
    pub fn derive(auth_routes: &[AuthRoute], cache_prefix: &str) -> Self {
        let menus = transform_auth_routes_to_menu(auth_routes);
        let routes = compile_routes(auth_routes);
        let cache_routes = get_cache_routes(&routes, cache_prefix);
        Self {
            menus,
            routes,
            cache_routes,
        }
    }
}
