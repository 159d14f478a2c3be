use serde_json::json;

use crate::cli::console::Console;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::session::GuardOutcome;

pub async fn handle(path: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let console = Console::open()?;
    let outcome = console.ctx.navigate(path).await;
    let phase = console.ctx.phase();

    match output_format {
        OutputFormat::Json => output_json(&json!({
            "path": path,
            "result": outcome,
            "phase": phase,
        })),
        OutputFormat::Text => {
            match outcome {
                GuardOutcome::Proceed => println!("{} -> proceed", path),
                GuardOutcome::Redirect(to) => println!("{} -> redirect {}", path, to),
            }
            println!("Phase: {:?}", phase);
            Ok(())
        }
    }
}
