use super::types::{AuthRoute, RouteComponent, VueRoute};

/// Compile the filtered, sorted tree into navigable route records.
/// `multi` directories are flattened: their compiled children become
/// siblings of the directory record, which is itself kept without children.
pub fn compile_routes(routes: &[AuthRoute]) -> Vec<VueRoute> {
    routes.iter().flat_map(compile_route).collect()
}

/// Compile one node into one or more sibling records
pub fn compile_route(item: &AuthRoute) -> Vec<VueRoute> {
    let mut result = Vec::new();

    let mut route = VueRoute {
        name: item.name.clone(),
        path: item
            .meta
            .dynamic_path
            .clone()
            .unwrap_or_else(|| item.path.clone()),
        redirect: None,
        component: item.component,
        meta: item.meta.clone(),
        children: None,
    };

    if item.meta.single_layout && item.has_children() {
        tracing::error!("single-layout route '{}' should not have children", item.name);
    }

    if item.has_children() {
        let children = compile_routes(&item.children);

        let redirect = match children.iter().find(|child| !child.meta.multi) {
            Some(child) => child.path.clone(),
            None => {
                tracing::error!("multi-level route '{}' has no valid child path", item.name);
                "/".to_string()
            }
        };

        if item.component == RouteComponent::Multi {
            result.extend(children);
        } else {
            route.children = Some(children);
        }
        route.redirect = Some(redirect);
    }

    result.push(route);
    result
}
