use std::collections::HashSet;

use super::icons;
use super::types::{AuthRoute, RawRouteRecord, RouteComponent, RouteKind, RouteMeta};
use crate::utils::{is_url, unique_slash};

/// Id given to the home entry synthesised when the backend sends none
pub const HOME_RECORD_ID: i64 = 888;

/// Convert the flat backend records into the annotated route tree.
///
/// Permission leaves (`ty = 2`) never become nodes; their `perms` are folded
/// into the `meta.permissions` of the menu they hang off. Directories with no
/// navigable children are omitted, as are records of an unknown type together
/// with everything under them. Source order is preserved; sorting is a
/// separate pass.
pub fn transform_api_routes(records: &[RawRouteRecord]) -> Vec<AuthRoute> {
    for record in records.iter().filter(|r| !r.ty.is_known()) {
        tracing::warn!("skipping record {} with unknown type {}", record.id, u8::from(record.ty));
    }
    transform_level(records, None, &[])
}

fn transform_level(
    records: &[RawRouteRecord],
    parent: Option<&RawRouteRecord>,
    ancestor_paths: &[String],
) -> Vec<AuthRoute> {
    let parent_id = parent.map(|p| p.id).unwrap_or(0);
    let prefix = ancestor_paths
        .iter()
        .rev()
        .find(|p| !is_url(p))
        .map(String::as_str)
        .unwrap_or("");

    records
        .iter()
        .filter(|item| matches!(item.ty, RouteKind::Directory | RouteKind::Menu) && item.parent_id() == parent_id)
        .filter_map(|item| {
            let path = full_path(&item.router, prefix);
            let name = route_name(&path);
            let icon = match item.icon.as_deref() {
                Some(icon) if !icon.is_empty() => icon.to_string(),
                _ => icons::default_icon(&name).to_string(),
            };

            let mut route = AuthRoute {
                name,
                path,
                component: RouteComponent::Page,
                meta: RouteMeta {
                    requires_auth: true,
                    order: item.sort,
                    title: item.name.clone(),
                    permissions: Vec::new(),
                    icon,
                    hide: item.is_show != 1,
                    keep_alive: item.keepalive == 1,
                    ..Default::default()
                },
                children: Vec::new(),
            };

            match item.ty {
                RouteKind::Directory => {
                    let mut paths = ancestor_paths.to_vec();
                    paths.push(route.path.clone());
                    let children = transform_level(records, Some(item), &paths);
                    if children.is_empty() {
                        tracing::debug!("omitting empty directory '{}' ({})", item.name, route.path);
                        return None;
                    }
                    route.component = if parent_id != 0 {
                        RouteComponent::Multi
                    } else {
                        RouteComponent::Basic
                    };
                    route.children = children;
                }
                RouteKind::Menu => {
                    route.meta.permissions = collect_permissions(records, item.id);
                }
                RouteKind::Permission | RouteKind::Other(_) => return None,
            }

            Some(route)
        })
        .collect()
}

/// Union of the `perms` of every permission leaf under `menu_id`
fn collect_permissions(records: &[RawRouteRecord], menu_id: i64) -> Vec<String> {
    records
        .iter()
        .filter(|r| r.ty == RouteKind::Permission && r.parent_id() == menu_id)
        .filter_map(|r| r.perms.as_deref())
        .flat_map(|perms| perms.split(','))
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Root-relative path of a record under the ancestor path `prefix`.
///
/// Absolute URLs pass through. Otherwise the prefix is prepended unless the
/// router already starts with it, separators are collapsed and repeated
/// segments dropped (keeping the first).
///
/// The prefix test is a plain string prefix, not a segment match: `/member-level`
/// under `/member` stays `/member-level`. Backends rely on this to give a page
/// a sibling-looking path while nesting it under a directory.
pub fn full_path(router: &str, prefix: &str) -> String {
    if is_url(router) {
        return router.to_string();
    }

    let rooted = if router.starts_with('/') {
        router.to_string()
    } else {
        format!("/{}", router)
    };
    let joined = if router.starts_with(prefix) {
        rooted
    } else {
        format!("{}{}", prefix, rooted)
    };

    let collapsed = unique_slash(&joined);
    let mut seen = HashSet::new();
    let path = collapsed
        .split('/')
        .filter(|segment| seen.insert(*segment))
        .collect::<Vec<_>>()
        .join("/");

    if path.is_empty() {
        "/".to_string()
    } else {
        path
    }
}

/// Stable route identifier: leading `/` stripped, dynamic suffix removed,
/// separators joined with `_`.
pub fn route_name(path: &str) -> String {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let without_params = trimmed.split("/:").next().unwrap_or("");
    without_params.split('/').collect::<Vec<_>>().join("_")
}

/// Append a home page record when no record routes to `/`
pub fn ensure_home_route(records: &mut Vec<RawRouteRecord>) -> bool {
    if records.iter().any(|r| r.router == "/") {
        return false;
    }
    tracing::debug!("permission group has no root entry, adding a home page");
    records.push(RawRouteRecord::new(HOME_RECORD_ID, 0, RouteKind::Menu, "首页", "/").with_perms(""));
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, pid: i64, ty: RouteKind, name: &str, router: &str) -> RawRouteRecord {
        RawRouteRecord::new(id, pid, ty, name, router)
    }

    #[test]
    fn test_full_path_prefixes_ancestor() {
        assert_eq!(full_path("/a", "/p"), "/p/a");
        assert_eq!(full_path("//a", "/p"), "/p/a");
        assert_eq!(full_path("a", "/p"), "/p/a");
        assert_eq!(full_path("/p/a", "/p"), "/p/a");
        assert_eq!(full_path("p/a", "/p"), "/p/a");
    }

    #[test]
    fn test_full_path_edge_cases() {
        assert_eq!(full_path("/", ""), "/");
        assert_eq!(full_path("", ""), "/");
        assert_eq!(full_path("dir/", ""), "/dir");
        assert_eq!(full_path("https://docs.example.com/guide", "/p"), "https://docs.example.com/guide");
    }

    #[test]
    fn test_full_path_prefix_is_a_string_prefix() {
        assert_eq!(full_path("/member-level", "/member"), "/member-level");
        assert_eq!(full_path("member-level", "/member"), "/member/member-level");
        assert_eq!(full_path("/members", "/member"), "/members");
        assert_eq!(full_path("/level", "/member"), "/member/level");
    }

    #[test]
    fn test_route_name() {
        assert_eq!(route_name("/dir/page"), "dir_page");
        assert_eq!(route_name("/user/detail/:id"), "user_detail");
        assert_eq!(route_name("/"), "");
        assert_eq!(route_name("/user-list"), "user-list");
    }

    #[test]
    fn test_permission_leaves_fold_into_menu() {
        let records = vec![
            record(1, 0, RouteKind::Menu, "Members", "member"),
            record(2, 1, RouteKind::Permission, "View", "").with_perms("member-list"),
            record(3, 1, RouteKind::Permission, "Edit", "").with_perms("member-edit,member-battery-edit"),
        ];
        let routes = transform_api_routes(&records);
        assert_eq!(routes.len(), 1);
        assert_eq!(
            routes[0].meta.permissions,
            vec!["member-list", "member-edit", "member-battery-edit"]
        );
        assert!(routes[0].children.is_empty());
    }

    #[test]
    fn test_directory_component_by_depth() {
        let records = vec![
            record(1, 0, RouteKind::Directory, "System", "system"),
            record(2, 1, RouteKind::Directory, "Rbac", "rbac"),
            record(3, 2, RouteKind::Menu, "Menus", "menu"),
        ];
        let routes = transform_api_routes(&records);
        assert_eq!(routes[0].component, RouteComponent::Basic);
        let nested = &routes[0].children[0];
        assert_eq!(nested.component, RouteComponent::Multi);
        assert_eq!(nested.path, "/system/rbac");
        assert_eq!(nested.children[0].path, "/system/rbac/menu");
        assert_eq!(nested.children[0].name, "system_rbac_menu");
    }

    #[test]
    fn test_empty_directory_omitted() {
        let records = vec![
            record(1, 0, RouteKind::Directory, "Empty", "empty"),
            record(2, 1, RouteKind::Permission, "Marker", "").with_perms("x"),
            record(3, 0, RouteKind::Menu, "Page", "page"),
        ];
        let routes = transform_api_routes(&records);
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].name, "page");
    }

    #[test]
    fn test_meta_flags_and_icon_defaults() {
        let records = vec![
            record(1, 0, RouteKind::Menu, "Home", "/"),
            record(2, 0, RouteKind::Menu, "Hidden", "hidden").with_visible(false).with_keepalive(true),
            RawRouteRecord {
                icon: Some("i-custom".to_string()),
                ..record(3, 0, RouteKind::Menu, "Custom", "custom")
            },
        ];
        let routes = transform_api_routes(&records);
        assert_eq!(routes[0].meta.icon, icons::HOME_ICON);
        assert!(!routes[0].meta.hide);
        assert!(routes[1].meta.hide);
        assert!(routes[1].meta.keep_alive);
        assert_eq!(routes[1].meta.icon, icons::EMPTY_ICON);
        assert_eq!(routes[2].meta.icon, "i-custom");
        assert!(routes.iter().all(|r| r.meta.requires_auth));
    }

    #[test]
    fn test_url_ancestor_does_not_prefix() {
        let records = vec![
            record(1, 0, RouteKind::Directory, "Docs", "docs"),
            record(2, 1, RouteKind::Directory, "External", "https://docs.example.com"),
            record(3, 2, RouteKind::Menu, "Guide", "guide"),
        ];
        let routes = transform_api_routes(&records);
        let external = &routes[0].children[0];
        assert_eq!(external.path, "https://docs.example.com");
        assert_eq!(external.children[0].path, "/docs/guide");
    }

    #[test]
    fn test_unknown_type_skipped_with_its_subtree() {
        let records = vec![
            record(1, 0, RouteKind::Other(3), "Widget", "widget"),
            record(2, 1, RouteKind::Menu, "Inner", "inner"),
            record(3, 0, RouteKind::Directory, "Dir", "dir"),
            record(4, 3, RouteKind::Other(9), "Button", "button"),
            record(5, 3, RouteKind::Menu, "Page", "page"),
        ];
        let routes = transform_api_routes(&records);
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].path, "/dir");
        let children: Vec<&str> = routes[0].children.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(children, vec!["/dir/page"]);
    }

    #[test]
    fn test_ensure_home_route() {
        let mut records = vec![record(1, 0, RouteKind::Menu, "Page", "page")];
        assert!(ensure_home_route(&mut records));
        assert_eq!(records.last().unwrap().id, HOME_RECORD_ID);
        assert!(!ensure_home_route(&mut records));
        assert_eq!(records.len(), 2);
    }
}
