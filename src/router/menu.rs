use super::types::{AuthRoute, MenuItem};

/// Project the route tree into the display menu. Hidden nodes are skipped;
/// `multi` directories stay nested so the menu mirrors the logical layout.
pub fn transform_auth_routes_to_menu(routes: &[AuthRoute]) -> Vec<MenuItem> {
    routes
        .iter()
        .filter(|route| !route.meta.hide)
        .map(|route| {
            let children = transform_auth_routes_to_menu(&route.children);
            let (children, to) = if children.is_empty() {
                (None, Some(route.path.clone()))
            } else {
                (Some(children), None)
            };
            MenuItem {
                key: route.name.clone(),
                label: route.meta.title.clone(),
                icon: route.meta.icon.clone(),
                i18n_title: route.meta.i18n_title.clone(),
                to,
                children,
            }
        })
        .collect()
}
