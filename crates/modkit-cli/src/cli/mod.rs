//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use modkit_core::domain::ModuleKind;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "modkit",
    bin_name = "modkit",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Multi-module scaffolding for Gradle builds",
    long_about = "modkit creates public, impl and testing modules for a feature \
                  and registers them in the settings manifest of your Gradle build.",
    after_help = "EXAMPLES:\n\
        \x20 modkit new payments --parent feature --package com.shop\n\
        \x20 modkit new search   --modules public,impl,testing --layout jvm\n\
        \x20 modkit layouts\n\
        \x20 modkit completions bash > /usr/share/bash-completion/completions/modkit",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create feature modules and register them.
    #[command(
        visible_alias = "n",
        about = "Create feature modules",
        after_help = "EXAMPLES:\n\
            \x20 modkit new payments\n\
            \x20 modkit new payments --parent feature --modules public,impl,testing\n\
            \x20 modkit new payments --package com.shop --layout android --dry-run"
    )]
    New(NewArgs),

    /// List available module layouts.
    #[command(
        visible_alias = "ls",
        about = "List available layouts",
        after_help = "EXAMPLES:\n\
            \x20 modkit layouts\n\
            \x20 modkit layouts --format json"
    )]
    Layouts(LayoutsArgs),

    /// Print the default build-file template of a module kind.
    #[command(
        about = "Print a default template",
        after_help = "EXAMPLES:\n\
            \x20 modkit template public\n\
            \x20 modkit template impl --layout jvm > impl.gradle.kts"
    )]
    Template(TemplateArgs),

    /// Inspect or reset remembered values.
    #[command(about = "Manage remembered values", subcommand)]
    Prefs(PrefsCommands),

    /// Initialise a modkit configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 modkit init\n\
            \x20 modkit init --force\n\
            \x20 modkit --config ./modkit.toml init"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 modkit completions bash > ~/.local/share/bash-completion/completions/modkit\n\
            \x20 modkit completions zsh  > ~/.zfunc/_modkit\n\
            \x20 modkit completions fish > ~/.config/fish/completions/modkit.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the modkit configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 modkit config get defaults.layout\n\
            \x20 modkit config list\n\
            \x20 modkit config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `modkit new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Directory that groups the generated modules, e.g. `payments`.
    #[arg(value_name = "NAME", help = "Feature directory name")]
    pub name: String,

    /// Directory the feature directory is created in.
    #[arg(
        short = 'p',
        long = "parent",
        value_name = "DIR",
        default_value = ".",
        help = "Parent directory"
    )]
    pub parent: PathBuf,

    /// Build root holding the settings manifest. Discovered from the parent
    /// when omitted.
    #[arg(
        long = "project-root",
        value_name = "DIR",
        help = "Project root (default: nearest ancestor with a settings manifest)"
    )]
    pub project_root: Option<PathBuf>,

    /// Package name the namespace is derived from.
    #[arg(long = "package", value_name = "PKG", help = "Package name")]
    pub package: Option<String>,

    /// Explicit namespace; overrides `--package`.
    #[arg(
        long = "namespace",
        value_name = "NS",
        help = "Namespace (default: <package>.<name>)"
    )]
    pub namespace: Option<String>,

    /// Module kinds to create.
    #[arg(
        short = 'm',
        long = "modules",
        value_name = "KINDS",
        value_enum,
        value_delimiter = ',',
        help = "Modules to create, comma separated"
    )]
    pub modules: Vec<KindArg>,

    /// Layout preset or custom layout name.
    #[arg(short = 'l', long = "layout", value_name = "NAME", help = "Layout to use")]
    pub layout: Option<String>,

    #[arg(long = "public-template", value_name = "FILE", help = "Template file for the public module")]
    pub public_template: Option<PathBuf>,

    #[arg(long = "impl-template", value_name = "FILE", help = "Template file for the impl module")]
    pub impl_template: Option<PathBuf>,

    #[arg(long = "testing-template", value_name = "FILE", help = "Template file for the testing module")]
    pub testing_template: Option<PathBuf>,

    /// Store the given template files for later runs.
    #[arg(long = "remember-templates", help = "Remember the given templates")]
    pub remember_templates: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    /// Skip prompts and the confirmation step.
    #[arg(short = 'y', long = "yes", help = "Skip prompts and create immediately")]
    pub yes: bool,
}

impl NewArgs {
    /// Template file passed for `kind`, if any.
    pub fn template_file(&self, kind: ModuleKind) -> Option<&PathBuf> {
        match kind {
            ModuleKind::Public => self.public_template.as_ref(),
            ModuleKind::Impl => self.impl_template.as_ref(),
            ModuleKind::Testing => self.testing_template.as_ref(),
        }
    }
}

// ── layouts / template ────────────────────────────────────────────────────────

/// Arguments for `modkit layouts`.
#[derive(Debug, Args)]
pub struct LayoutsArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `layouts` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

/// Arguments for `modkit template`.
#[derive(Debug, Args)]
pub struct TemplateArgs {
    /// Module kind whose template is printed.
    #[arg(value_enum, value_name = "KIND")]
    pub kind: KindArg,

    /// Layout to read the template from.
    #[arg(short = 'l', long = "layout", value_name = "NAME", help = "Layout to use")]
    pub layout: Option<String>,
}

// ── prefs ─────────────────────────────────────────────────────────────────────

/// Subcommands for `modkit prefs`.
#[derive(Debug, Subcommand)]
pub enum PrefsCommands {
    /// Print every remembered value.
    List,
    /// Forget every remembered value.
    Clear,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `modkit init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `modkit completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `modkit config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.layout`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Module kind as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum KindArg {
    #[value(alias = "api")]
    Public,
    #[value(alias = "implementation")]
    Impl,
    #[value(alias = "test")]
    Testing,
}

impl From<KindArg> for ModuleKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Public => ModuleKind::Public,
            KindArg::Impl => ModuleKind::Impl,
            KindArg::Testing => ModuleKind::Testing,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
