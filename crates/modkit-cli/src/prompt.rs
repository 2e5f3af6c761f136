//! Interactive prompts for values the user left out.
//!
//! Prompts only run with the `interactive` feature and when both stdin and
//! stdout are terminals. Otherwise every function falls back to its default.

use modkit_core::domain::ModuleKinds;

use crate::error::CliResult;

#[cfg(feature = "interactive")]
mod enabled {
    use std::io::{self, IsTerminal};

    use dialoguer::{Confirm, Input, MultiSelect};
    use modkit_core::domain::{ModuleKind, ModuleKinds};

    use crate::error::{CliError, CliResult};

    fn prompt_error(err: dialoguer::Error) -> CliError {
        CliError::IoError {
            message: "interactive prompt failed".into(),
            source: err.into(),
        }
    }

    pub fn available() -> bool {
        io::stdin().is_terminal() && io::stdout().is_terminal()
    }

    pub fn package(default: &str) -> CliResult<String> {
        Input::<String>::new()
            .with_prompt("Package name")
            .default(default.to_string())
            .interact_text()
            .map_err(prompt_error)
    }

    pub fn modules(defaults: &ModuleKinds) -> CliResult<ModuleKinds> {
        let labels: Vec<&str> = ModuleKind::ALL.iter().map(|k| k.segment()).collect();
        let checked: Vec<bool> = ModuleKind::ALL.iter().map(|k| defaults.contains(*k)).collect();

        let picked = MultiSelect::new()
            .with_prompt("Modules to create")
            .items(&labels)
            .defaults(&checked)
            .interact()
            .map_err(prompt_error)?;

        let kinds = picked.into_iter().filter_map(|i| ModuleKind::ALL.get(i).copied());
        ModuleKinds::new(kinds).map_err(|e| CliError::Core(e.into()))
    }

    pub fn confirm(question: &str) -> CliResult<bool> {
        Confirm::new()
            .with_prompt(question)
            .default(true)
            .interact()
            .map_err(prompt_error)
    }
}

#[cfg(not(feature = "interactive"))]
mod enabled {
    use modkit_core::domain::ModuleKinds;

    use crate::error::CliResult;

    pub fn available() -> bool {
        false
    }

    pub fn package(default: &str) -> CliResult<String> {
        Ok(default.to_string())
    }

    pub fn modules(defaults: &ModuleKinds) -> CliResult<ModuleKinds> {
        Ok(defaults.clone())
    }

    pub fn confirm(_question: &str) -> CliResult<bool> {
        Ok(true)
    }
}

/// Whether prompts can be shown in this process.
pub fn available() -> bool {
    enabled::available()
}

/// Ask for a package name, pre-filled with `default`.
pub fn package(default: &str) -> CliResult<String> {
    enabled::package(default)
}

/// Ask which module kinds to create, with `defaults` pre-selected.
pub fn modules(defaults: &ModuleKinds) -> CliResult<ModuleKinds> {
    enabled::modules(defaults)
}

/// Yes/no question defaulting to yes.
pub fn confirm(question: &str) -> CliResult<bool> {
    enabled::confirm(question)
}
