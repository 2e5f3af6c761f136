//! Implementation of the `modkit layouts` command.

use serde::Serialize;

use crate::{
    cli::{LayoutsArgs, ListFormat},
    commands::layout_registry,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct LayoutRow {
    name: String,
    builtin: bool,
    description: String,
    source_root: String,
    build_file: String,
    manifest_file: String,
}

pub fn execute(args: LayoutsArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let registry = layout_registry(&config)?;
    let rows: Vec<LayoutRow> = registry
        .iter()
        .map(|(layout, builtin)| LayoutRow {
            name: layout.name().to_string(),
            builtin,
            description: layout.description().to_string(),
            source_root: layout.source_root_display(),
            build_file: layout.build_file().to_string(),
            manifest_file: layout.manifest_file().to_string(),
        })
        .collect();

    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header("Available Layouts:")?;
            for row in &rows {
                let origin = if row.builtin { "built-in" } else { "custom" };
                output.data(&format!(
                    "  {:<10} {:<9} {} -> {}/{}",
                    row.name, origin, row.description, row.source_root, row.build_file
                ))?;
            }
        }
        ListFormat::List => {
            for row in &rows {
                output.data(&row.name)?;
            }
        }
        ListFormat::Json => output.json(&rows)?,
    }

    Ok(())
}
