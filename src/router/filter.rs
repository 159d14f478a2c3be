use super::permission::PermissionSet;
use super::types::AuthRoute;

/// Result of checking one node against the granted permissions
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    /// The node passes; its children are already filtered
    Keep(AuthRoute),
    /// The node fails; its surviving children take its place at its level
    Drop(Vec<AuthRoute>),
}

impl FilterOutcome {
    pub fn into_routes(self) -> Vec<AuthRoute> {
        match self {
            FilterOutcome::Keep(route) => vec![route],
            FilterOutcome::Drop(survivors) => survivors,
        }
    }
}

/// Filter one node. Children are filtered independently of the node's own
/// result.
pub fn filter_route(route: &AuthRoute, granted: &PermissionSet) -> FilterOutcome {
    let children = filter_routes(&route.children, granted);
    if granted.satisfies(&route.meta.permissions) {
        FilterOutcome::Keep(route.with_children(children))
    } else {
        if !children.is_empty() {
            tracing::debug!(
                "route '{}' denied, promoting {} surviving children",
                route.name,
                children.len()
            );
        }
        FilterOutcome::Drop(children)
    }
}

/// Filter a sibling list, splicing promoted children in place of dropped nodes
pub fn filter_routes(routes: &[AuthRoute], granted: &PermissionSet) -> Vec<AuthRoute> {
    routes
        .iter()
        .flat_map(|route| filter_route(route, granted).into_routes())
        .collect()
}
