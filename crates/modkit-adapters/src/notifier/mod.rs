//! Notification adapters.

mod logging;
mod recording;

pub use logging::TracingNotifier;
pub use recording::RecordingNotifier;
