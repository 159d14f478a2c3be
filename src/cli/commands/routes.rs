use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, ValueEnum};
use serde::Deserialize;

use crate::api::PermissionGroup;
use crate::cli::console::Console;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::config::config;
use crate::router::{build_auth_routes, AuthRoute, MenuItem, PermissionSet, RawRouteRecord, RouteViews, VueRoute};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RouteView {
    /// Filtered auth route tree
    Tree,
    /// Compiled navigable route records
    Compiled,
    /// Sidebar menu
    Menu,
    /// Component names kept alive
    Cache,
}

#[derive(Args)]
pub struct RoutesArgs {
    #[arg(value_enum, help = "Which pipeline output to show")]
    pub view: RouteView,

    #[arg(long, help = "Build offline from a JSON file (record array or {menus, permission})")]
    pub input: Option<PathBuf>,

    #[arg(long = "perm", requires = "input", help = "Granted permission string, repeatable")]
    pub perms: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RouteInput {
    Records(Vec<RawRouteRecord>),
    Group(PermissionGroup),
}

/// Records and granted permissions from a file; `--perm` adds to whatever
/// the file grants.
fn load_input(path: &Path, extra: Vec<String>) -> anyhow::Result<(Vec<RawRouteRecord>, PermissionSet)> {
    let content = fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    let input: RouteInput =
        serde_json::from_str(&content).with_context(|| format!("{} is not a menu list", path.display()))?;

    let (records, mut granted) = match input {
        RouteInput::Group(group) => (group.menus, group.permission),
        RouteInput::Records(records) => (records, Vec::new()),
    };
    granted.extend(extra);
    Ok((records, PermissionSet::from(granted)))
}

pub async fn handle(args: RoutesArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let (auth_routes, views) = match &args.input {
        Some(path) => {
            let (records, granted) = load_input(path, args.perms)?;
            let auth_routes = build_auth_routes(records, &granted);
            let views = RouteViews::derive(&auth_routes, &config().router.cache_name_prefix);
            (auth_routes, views)
        }
        None => {
            let console = Console::open()?;
            console.ready().await?;
            let state = console.ctx.route.snapshot();
            let views = RouteViews {
                menus: state.menus,
                routes: state.routes,
                cache_routes: state.cache_routes,
            };
            (state.auth_routes, views)
        }
    };

    match (args.view, &output_format) {
        (RouteView::Tree, OutputFormat::Json) => output_json(&auth_routes),
        (RouteView::Compiled, OutputFormat::Json) => output_json(&views.routes),
        (RouteView::Menu, OutputFormat::Json) => output_json(&views.menus),
        (RouteView::Cache, OutputFormat::Json) => output_json(&views.cache_routes),
        (RouteView::Tree, OutputFormat::Text) => {
            print_auth_tree(&auth_routes, 0);
            Ok(())
        }
        (RouteView::Compiled, OutputFormat::Text) => {
            print_compiled(&views.routes, 0);
            Ok(())
        }
        (RouteView::Menu, OutputFormat::Text) => {
            print_menu(&views.menus, 0);
            Ok(())
        }
        (RouteView::Cache, OutputFormat::Text) => {
            if views.cache_routes.is_empty() {
                println!("No cached routes");
            }
            for name in &views.cache_routes {
                println!("{}", name);
            }
            Ok(())
        }
    }
}

fn print_auth_tree(routes: &[AuthRoute], depth: usize) {
    for route in routes {
        let perms = if route.meta.permissions.is_empty() {
            String::new()
        } else {
            format!(" [{}]", route.meta.permissions.join(", "))
        };
        let hidden = if route.meta.hide { " (hidden)" } else { "" };
        println!(
            "{}{:<20} {:<30} {:?}{}{}",
            indent(depth),
            route.meta.title,
            route.path,
            route.component,
            perms,
            hidden
        );
        print_auth_tree(&route.children, depth + 1);
    }
}

fn print_compiled(routes: &[VueRoute], depth: usize) {
    for route in routes {
        match &route.redirect {
            Some(redirect) => println!("{}{} ({}) -> {}", indent(depth), route.path, route.name, redirect),
            None => println!("{}{} ({})", indent(depth), route.path, route.name),
        }
        if let Some(children) = &route.children {
            print_compiled(children, depth + 1);
        }
    }
}

fn print_menu(items: &[MenuItem], depth: usize) {
    for item in items {
        match &item.to {
            Some(to) => println!("{}{} {}", indent(depth), item.label, to),
            None => println!("{}{}/", indent(depth), item.label),
        }
        if let Some(children) = &item.children {
            print_menu(children, depth + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn write_temp(content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("admin_routes_{}.json", Uuid::new_v4().simple()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_group_input_merges_extra_perms() {
        let path = write_temp(
            r#"{"menus":[{"id":1,"pid":0,"ty":1,"name":"Members","router":"member"}],"permission":["member-list"]}"#,
        );
        let (records, granted) = load_input(&path, vec!["member-edit".to_string()]).unwrap();
        assert_eq!(records.len(), 1);
        assert!(granted.contains("member-list"));
        assert!(granted.contains("member-edit"));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_record_array_input() {
        let path = write_temp(r#"[{"id":1,"pid":0,"ty":0,"name":"Dir","router":"dir"}]"#);
        let (records, granted) = load_input(&path, Vec::new()).unwrap();
        assert_eq!(records[0].name, "Dir");
        assert!(granted.is_empty());
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_unknown_shapes() {
        let path = write_temp(r#"{"unexpected": 1}"#);
        // an object with no known fields still reads as an empty group
        let (records, _) = load_input(&path, Vec::new()).unwrap();
        assert!(records.is_empty());

        let bad = write_temp("not json");
        assert!(load_input(&bad, Vec::new()).is_err());
        fs::remove_file(path).ok();
        fs::remove_file(bad).ok();
    }
}
