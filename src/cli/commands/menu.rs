use clap::{Args, Subcommand};
use serde_json::{json, Value};

use crate::api::modules::menu;
use crate::api::{routes, MenuParams};
use crate::cli::console::Console;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::router::{PermissionGate, RouteKind};
use crate::utils::{format_menu_tree, MenuTreeNode};

#[derive(Subcommand)]
pub enum MenuCommands {
    #[command(about = "Show every menu record as a tree")]
    List,

    #[command(about = "Create a menu record")]
    Add(MenuArgs),

    #[command(about = "Edit a menu record")]
    Edit {
        #[arg(help = "Menu record id")]
        id: i64,
        #[command(flatten)]
        args: MenuArgs,
    },

    #[command(about = "Delete a menu record")]
    Remove {
        #[arg(help = "Menu record id")]
        id: i64,
    },

    #[command(about = "Menu ids assigned to a permission group")]
    Group {
        #[arg(help = "Permission group id")]
        group_id: i64,
    },

    #[command(about = "Replace the menus assigned to a permission group")]
    Assign {
        #[arg(long, help = "JSON object sent as the form body")]
        data: String,
    },
}

#[derive(Args)]
pub struct MenuArgs {
    #[arg(long, help = "Display name")]
    pub name: String,
    #[arg(long, default_value_t = 1, help = "0 directory, 1 menu, 2 permission")]
    pub ty: u8,
    #[arg(long, default_value_t = 0, help = "Parent record id")]
    pub pid: i64,
    #[arg(long, default_value = "", help = "Route path segment")]
    pub router: String,
    #[arg(long, default_value = "", help = "Required permission string")]
    pub perms: String,
    #[arg(long, default_value = "", help = "Icon name")]
    pub icon: String,
    #[arg(long, default_value_t = 0, help = "Sort order")]
    pub sort: i64,
    #[arg(long, help = "Hide from the sidebar")]
    pub hidden: bool,
    #[arg(long, help = "Keep the page alive when navigating away")]
    pub keepalive: bool,
}

impl MenuArgs {
    fn into_params(self, id: Option<i64>) -> anyhow::Result<MenuParams> {
        if !RouteKind::from(self.ty).is_known() {
            anyhow::bail!("Invalid menu type {}", self.ty);
        }
        Ok(MenuParams {
            id,
            ty: self.ty,
            pid: self.pid,
            name: self.name,
            router: self.router,
            is_show: (!self.hidden) as i64,
            keepalive: self.keepalive as i64,
            icon: self.icon,
            perms: self.perms,
            sort: self.sort,
        })
    }
}

pub async fn handle(cmd: MenuCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let console = Console::open()?;
    console.ready().await?;
    let client = console.client.as_ref();

    match cmd {
        MenuCommands::List => {
            let page = menu::menu_list(client).await?;
            if page.list.is_empty() {
                return output_empty_collection(&output_format, "menus", "No menu records");
            }
            let tree = format_menu_tree(&page.list, None, &[], 0);

            match output_format {
                OutputFormat::Json => output_json(&json!({ "count": page.count, "menus": tree })),
                OutputFormat::Text => {
                    let granted = console.ctx.auth.permissions();
                    println!("{:<40} {:<6} {:<24} {:<24} {}", "NAME", "ID", "ROUTER", "PERMS", "ACTIONS");
                    println!("{}", "-".repeat(110));
                    print_tree(&tree, &granted.gate())?;
                    Ok(())
                }
            }
        }
        MenuCommands::Add(args) => {
            let params = args.into_params(None)?;
            menu::create_menu(client, &params).await?;
            output_success(
                &output_format,
                &format!("Menu '{}' created", params.name),
                Some(json!({ "menu": params })),
            )
        }
        MenuCommands::Edit { id, args } => {
            let params = args.into_params(Some(id))?;
            menu::update_menu(client, &params).await?;
            output_success(
                &output_format,
                &format!("Menu {} updated", id),
                Some(json!({ "menu": params })),
            )
        }
        MenuCommands::Remove { id } => {
            menu::delete_menu(client, id).await?;
            output_success(&output_format, &format!("Menu {} deleted", id), Some(json!({ "id": id })))
        }
        MenuCommands::Group { group_id } => {
            let ids = menu::admin_group_menu_list(client, group_id).await?;
            match output_format {
                OutputFormat::Json => output_json(&json!({ "group_id": group_id, "menus": ids })),
                OutputFormat::Text => {
                    println!("Group {}: {}", group_id, ids);
                    Ok(())
                }
            }
        }
        MenuCommands::Assign { data } => {
            let data: Value =
                serde_json::from_str(&data).map_err(|e| anyhow::anyhow!("--data is not valid JSON: {}", e))?;
            let result = menu::update_group_menu(client, data).await?;
            output_success(&output_format, "Group menus updated", Some(json!({ "result": result })))
        }
    }
}

fn print_tree(nodes: &[MenuTreeNode], gate: &PermissionGate<'_>) -> anyhow::Result<()> {
    for node in nodes {
        let actions: Vec<&str> = [
            gate.render_if(&[routes::RBAC_MENU_ADD], || "add")?,
            gate.render_if(&[routes::RBAC_MENU_EDIT], || "edit")?,
            gate.render_if(&[routes::RBAC_MENU_REMOVE], || "remove")?,
        ]
        .into_iter()
        .flatten()
        .collect();

        let name = format!("{}{}", indent(node.level), node.label);
        println!(
            "{:<40} {:<6} {:<24} {:<24} {}",
            name,
            node.key,
            node.record.router,
            node.record.perms.as_deref().unwrap_or(""),
            actions.join(" ")
        );
        if let Some(children) = &node.children {
            print_tree(children, gate)?;
        }
    }
    Ok(())
}
