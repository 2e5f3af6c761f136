//! Notifier that emits `tracing` events.

use modkit_core::application::ports::{Notifier, Severity};

/// Routes outcome messages to the installed `tracing` subscriber, at the
/// level matching their severity.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info => tracing::info!(target: "modkit::notify", "{message}"),
            Severity::Warning => tracing::warn!(target: "modkit::notify", "{message}"),
            Severity::Error => tracing::error!(target: "modkit::notify", "{message}"),
        }
    }
}
