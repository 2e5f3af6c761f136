//! `modkit prefs` - inspect or reset remembered values.

use crate::{
    cli::PrefsCommands,
    commands::preference_service,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(cmd: PrefsCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let prefs = preference_service(&config)?;

    match cmd {
        PrefsCommands::List => {
            let entries = prefs.entries()?;
            if output.is_json() {
                output.json(&entries)?;
            } else if entries.is_empty() {
                output.info("No remembered values")?;
            } else {
                for (key, value) in &entries {
                    // Templates span lines; show only the first one.
                    let first = value.lines().next().unwrap_or_default();
                    let more = if value.lines().nth(1).is_some() { " ..." } else { "" };
                    output.data(&format!("{key} = {first}{more}"))?;
                }
            }
        }
        PrefsCommands::Clear => {
            let removed = prefs.clear()?;
            output.success(&format!("Forgot {removed} remembered value(s)"))?;
        }
    }

    Ok(())
}
