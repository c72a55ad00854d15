use std::time::Duration;

use log::*;

/// How long a transient status message stays on screen.
pub const STATUS_DURATION: Duration = Duration::from_secs(3);

/// A line of text shown over the screen.
///
/// Times are measured from whenever the application started, so the status never needs to read
/// the clock itself.
#[derive(Debug, Clone)]
pub struct Status {
    text: String,
    shown_at: Duration,
    persistent: bool,
}

impl Status {
    /// A status that stays visible until it is replaced.
    pub fn persistent(text: impl Into<String>) -> Status {
        let text = text.into();
        info!("{}", text);
        Status {
            text,
            shown_at: Duration::ZERO,
            persistent: true,
        }
    }
    /// Replace the status with a message that stays visible for [STATUS_DURATION].
    pub fn show(&mut self, text: impl Into<String>, now: Duration) {
        self.text = text.into();
        self.shown_at = now;
        self.persistent = false;
        info!("{}", self.text);
    }
    /// Replace the status with a message that stays visible until it is replaced.
    pub fn show_persistent(&mut self, text: impl Into<String>) {
        *self = Status::persistent(text);
    }
    pub fn text(&self) -> &str {
        &self.text
    }
    /// Whether the status should currently be drawn.
    pub fn visible(&self, now: Duration) -> bool {
        self.persistent || now.saturating_sub(self.shown_at) < STATUS_DURATION
    }
}
