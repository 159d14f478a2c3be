use super::types::VueRoute;

/// Namespace token prefixed to every cached component name
pub const CACHE_NAME_PREFIX: &str = "App";

/// Component names to keep alive, read from the compiled (flattened) routes.
/// A top-level record with children contributes its flagged children; one
/// without contributes itself. Duplicates are kept.
pub fn get_cache_routes(routes: &[VueRoute], prefix: &str) -> Vec<String> {
    let mut names = Vec::new();
    for route in routes {
        match route.children.as_deref() {
            Some(children) if !children.is_empty() => {
                names.extend(
                    children
                        .iter()
                        .filter(|child| child.meta.keep_alive)
                        .map(|child| cache_name(prefix, &child.name)),
                );
            }
            _ => {
                if route.meta.keep_alive {
                    names.push(cache_name(prefix, &route.name));
                }
            }
        }
    }
    names
}

pub fn cache_name(prefix: &str, route_name: &str) -> String {
    format!("{}{}", prefix, to_pascal_case(route_name))
}

/// `user-list` / `user_list` -> `UserList`
pub fn to_pascal_case(name: &str) -> String {
    name.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::types::{RouteComponent, RouteMeta};

    fn record(name: &str, keep_alive: bool, children: Option<Vec<VueRoute>>) -> VueRoute {
        VueRoute {
            name: name.to_string(),
            path: format!("/{}", name),
            redirect: None,
            component: RouteComponent::Page,
            meta: RouteMeta {
                keep_alive,
                ..Default::default()
            },
            children,
        }
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(to_pascal_case("user-list"), "UserList");
        assert_eq!(to_pascal_case("system_menu"), "SystemMenu");
        assert_eq!(to_pascal_case("member_wallet-LOG"), "MemberWalletLog");
        assert_eq!(to_pascal_case("__a"), "A");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_keep_alive_leaf() {
        let names = get_cache_routes(&[record("user-list", true, None)], CACHE_NAME_PREFIX);
        assert_eq!(names, vec!["AppUserList"]);
    }

    #[test]
    fn test_parent_with_children_contributes_only_children() {
        let routes = vec![record(
            "member",
            true,
            Some(vec![record("member_list", true, None), record("member_level", false, None)]),
        )];
        assert_eq!(get_cache_routes(&routes, "App"), vec!["AppMemberList"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let routes = vec![record("user-list", true, None), record("user_list", true, None)];
        assert_eq!(get_cache_routes(&routes, "App"), vec!["AppUserList", "AppUserList"]);
    }

    #[test]
    fn test_empty_children_checks_self() {
        let routes = vec![record("dir", true, Some(vec![]))];
        assert_eq!(get_cache_routes(&routes, "View"), vec!["ViewDir"]);
    }
}
