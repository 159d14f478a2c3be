use clap::{Subcommand, ValueEnum};
use serde_json::{json, Value};

use crate::api::{routes, Method, RequestOptions};
use crate::cli::console::Console;
use crate::cli::utils::*;
use crate::cli::OutputFormat;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::Get,
            HttpMethod::Post => Method::Post,
            HttpMethod::Put => Method::Put,
            HttpMethod::Delete => Method::Delete,
        }
    }
}

#[derive(Subcommand)]
pub enum ApiCommands {
    #[command(about = "List known endpoints")]
    List {
        #[arg(long, help = "Only endpoints in this group")]
        group: Option<String>,
    },

    #[command(about = "Call an endpoint with the current session")]
    Call {
        #[arg(help = "Endpoint constant (MEMBER_LIST) or path segment (member-list)")]
        endpoint: String,
        #[arg(long, value_enum, default_value = "get")]
        method: HttpMethod,
        #[arg(long, help = "JSON object sent as query or body")]
        data: Option<String>,
        #[arg(long, help = "Send the body as JSON instead of a form")]
        json_body: bool,
    },
}

pub async fn handle(cmd: ApiCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ApiCommands::List { group } => {
            let endpoints: Vec<_> = routes::ALL
                .iter()
                .filter(|(g, _, _)| group.as_deref().map_or(true, |wanted| *g == wanted))
                .collect();

            if endpoints.is_empty() {
                return output_empty_collection(&output_format, "endpoints", "No endpoints match");
            }
            match output_format {
                OutputFormat::Json => {
                    let list: Vec<_> = endpoints
                        .iter()
                        .map(|(g, name, path)| json!({ "group": g, "name": name, "path": path }))
                        .collect();
                    output_json(&json!({ "endpoints": list }))
                }
                OutputFormat::Text => {
                    println!("{:<12} {:<36} {}", "GROUP", "NAME", "PATH");
                    println!("{}", "-".repeat(80));
                    for (g, name, path) in endpoints {
                        println!("{:<12} {:<36} {}", g, name, path);
                    }
                    Ok(())
                }
            }
        }
        ApiCommands::Call {
            endpoint,
            method,
            data,
            json_body,
        } => {
            let path = routes::lookup(&endpoint).unwrap_or(endpoint.as_str()).to_string();
            let data: Option<Value> = data
                .map(|raw| serde_json::from_str(&raw))
                .transpose()
                .map_err(|e| anyhow::anyhow!("--data is not valid JSON: {}", e))?;
            let options = if json_body {
                RequestOptions::json()
            } else {
                RequestOptions::default()
            };

            let console = Console::open()?;
            let result: Result<Value, _> = console.client.request(method.into(), &path, data, &options).await;
            match result {
                Ok(value) => output_json(&value),
                Err(e) => {
                    if let OutputFormat::Json = output_format {
                        output_error(&output_format, e.message(), Some(&e.code().to_string()))?;
                    }
                    Err(e.into())
                }
            }
        }
    }
}
