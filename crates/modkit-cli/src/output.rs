//! Output management and formatting.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use modkit_adapters::TracingNotifier;
use modkit_core::application::ports::{Notifier, Severity};

use crate::cli::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Writes everything the user sees on stdout.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Auto resolves to Human on a TTY and Plain when piped.
        let resolved_format = match args.output_format {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            other => other,
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Data the user asked for (templates, listings). Written even in quiet
    /// mode, since it is the command's result.
    pub fn data(&self, msg: &str) -> io::Result<()> {
        self.term.write_line(msg)
    }

    /// Serialize `value` as pretty JSON on stdout.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&styled(Severity::Info, msg, self.no_color))
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term
            .write_line(&styled(Severity::Warning, msg, self.no_color))
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}")
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Notifier handed to the scaffold service.
    ///
    /// Human and plain output print outcome messages on the terminal. JSON
    /// output keeps stdout parseable, so messages go to the log instead.
    pub fn notifier(&self) -> Box<dyn Notifier> {
        if self.is_json() {
            Box::new(TracingNotifier::new())
        } else {
            Box::new(ConsoleNotifier {
                term: self.term.clone(),
                quiet: self.quiet,
                no_color: self.no_color,
            })
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }
}

/// Prints scaffold outcome messages with a severity marker.
struct ConsoleNotifier {
    term: Term,
    quiet: bool,
    no_color: bool,
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        // Failures come back as errors and are rendered by the error handler.
        if severity == Severity::Error {
            tracing::debug!(target: "modkit::notify", "{message}");
            return;
        }
        if self.quiet {
            return;
        }
        if let Err(e) = self.term.write_line(&styled(severity, message, self.no_color)) {
            tracing::debug!(error = %e, "could not print notification");
        }
    }
}

fn styled(severity: Severity, msg: &str, no_color: bool) -> String {
    match (severity, no_color) {
        (Severity::Info, true) => format!("\u{2713} {msg}"),
        (Severity::Warning, true) => format!("\u{26a0} {msg}"),
        (Severity::Error, true) => format!("\u{2717} {msg}"),
        (Severity::Info, false) => format!("{} {}", "\u{2713}".green().bold(), msg.green()),
        (Severity::Warning, false) => {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        }
        (Severity::Error, false) => format!("{} {}", "\u{2717}".red().bold(), msg.red()),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_manager(quiet: bool, format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color: false,
            config: None,
            output_format: format,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, OutputFormat::Plain);
        assert!(out.print("hello").is_ok());
        assert!(out.success("done").is_ok());
    }

    #[test]
    fn plain_format_disables_color() {
        let out = make_manager(false, OutputFormat::Plain);
        assert!(!out.supports_color());
        assert!(!out.is_json());
    }

    #[test]
    fn human_format_keeps_color() {
        let out = make_manager(false, OutputFormat::Human);
        assert!(out.supports_color());
    }

    #[test]
    fn json_format_is_reported() {
        assert!(make_manager(false, OutputFormat::Json).is_json());
        assert!(!make_manager(false, OutputFormat::Plain).is_json());
    }

    #[test]
    fn plain_markers_have_no_escape_codes() {
        let line = styled(Severity::Warning, "manifest missing", true);
        assert_eq!(line, "\u{26a0} manifest missing");
        assert!(!styled(Severity::Error, "x", true).contains('\u{1b}'));
    }
}
