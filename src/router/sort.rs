use super::types::AuthRoute;

/// Order siblings by ascending `meta.order` at every level. The sort is
/// stable, so equal orders keep their source order.
pub fn sort_routes(routes: &mut [AuthRoute]) {
    routes.sort_by_key(|route| route.meta.order);
    for route in routes.iter_mut() {
        sort_routes(&mut route.children);
    }
}
