pub mod commands;
pub mod console;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "admin")]
#[command(about = "Admin console - session, permission routes and REST access from the terminal")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Login, logout and session inspection")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Run the permission route pipeline and show one of its views")]
    Routes(commands::routes::RoutesArgs),

    #[command(about = "Run the navigation guard against a path")]
    Navigate {
        #[arg(help = "Full path, e.g. /member/list")]
        path: String,
    },

    #[command(about = "RBAC menu administration")]
    Menu {
        #[command(subcommand)]
        cmd: commands::menu::MenuCommands,
    },

    #[command(about = "Raw access to admin endpoints")]
    Api {
        #[command(subcommand)]
        cmd: commands::api::ApiCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, output_format).await,
        Commands::Routes(args) => commands::routes::handle(args, output_format).await,
        Commands::Navigate { path } => commands::navigate::handle(&path, output_format).await,
        Commands::Menu { cmd } => commands::menu::handle(cmd, output_format).await,
        Commands::Api { cmd } => commands::api::handle(cmd, output_format).await,
    }
}
