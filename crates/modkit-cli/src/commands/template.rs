//! `modkit template` - print a default build-file template.
//!
//! The output is the raw template with its placeholders, ready to be saved
//! and passed back through `--public-template` and friends.

use modkit_core::{domain::ModuleKind, error::ModkitError};

use crate::{
    cli::TemplateArgs,
    commands::layout_registry,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: TemplateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let registry = layout_registry(&config)?;
    let name = args.layout.as_deref().unwrap_or(&config.defaults.layout);
    let layout = registry.get(name).map_err(ModkitError::from)?;

    let template = layout.template(ModuleKind::from(args.kind));
    output.data(template.trim_end_matches('\n'))?;
    Ok(())
}
