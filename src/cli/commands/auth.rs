use clap::Subcommand;
use serde_json::json;

use crate::api::LoginParams;
use crate::cli::console::Console;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::session::storage::{Storage, TOKEN_KEY};

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login and persist the session token")]
    Login {
        #[arg(help = "Administrator email")]
        email: String,
        #[arg(long, help = "Password (falls back to ADMIN_PASSWORD)")]
        password: Option<String>,
        #[arg(long, default_value_t = 1, help = "Login type sent with the credentials")]
        ty: i64,
    },

    #[command(about = "Clear the persisted session")]
    Logout,

    #[command(about = "Show current session phase")]
    Status,

    #[command(about = "Show the logged-in administrator")]
    Whoami,

    #[command(about = "Fetch and list granted permission strings")]
    Perms,
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let console = Console::open()?;
    let ctx = &console.ctx;

    match cmd {
        AuthCommands::Login { email, password, ty } => {
            let params = LoginParams {
                email: email.clone(),
                password: resolve_password(password)?,
                ty,
            };
            ctx.auth.login(&params).await?;

            output_success(
                &output_format,
                &format!("Logged in as {}", email),
                Some(json!({ "user": ctx.auth.user_info() })),
            )
        }
        AuthCommands::Logout => {
            let outcome = ctx.logout();
            output_success(&output_format, "Logged out", Some(json!({ "navigate": outcome })))
        }
        AuthCommands::Status => {
            let phase = ctx.phase();
            let saved_at = console.storage.saved_at(TOKEN_KEY);

            match output_format {
                OutputFormat::Json => output_json(&json!({
                    "phase": phase,
                    "logged_in": ctx.auth.is_login(),
                    "token_saved_at": saved_at,
                    "storage": console.storage.dir(),
                })),
                OutputFormat::Text => {
                    println!("Phase: {:?}", phase);
                    match saved_at {
                        Some(at) => println!("Token saved: {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
                        None => println!("No token saved"),
                    }
                    println!("Storage: {}", console.storage.dir().display());
                    Ok(())
                }
            }
        }
        AuthCommands::Whoami => {
            if !ctx.auth.is_login() {
                anyhow::bail!("Not logged in");
            }
            let user = ctx.auth.user_info();

            match output_format {
                OutputFormat::Json => output_json(&user),
                OutputFormat::Text => {
                    println!("Email: {}", user.email.as_deref().unwrap_or("-"));
                    println!("Username: {}", user.username.as_deref().unwrap_or("-"));
                    if let Some(id) = user.id {
                        println!("ID: {}", id);
                    }
                    if let Some(group_id) = user.group_id {
                        println!("Group: {}", group_id);
                    }
                    Ok(())
                }
            }
        }
        AuthCommands::Perms => {
            console.ready().await?;
            let mut perms = ctx.auth.perms();
            perms.sort();

            if perms.is_empty() {
                return output_empty_collection(&output_format, "permissions", "No permissions granted");
            }
            match output_format {
                OutputFormat::Json => output_json(&json!({ "permissions": perms })),
                OutputFormat::Text => {
                    for perm in perms {
                        println!("{}", perm);
                    }
                    Ok(())
                }
            }
        }
    }
}
