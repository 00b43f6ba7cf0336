//! # Flash Message
//!
//! Transient success text shown above the listing. Each message carries a
//! deadline; the controller calls [`FlashMessage::expire`] on every tick.

use std::time::{Duration, Instant};

/// How long a success message stays visible
pub const FLASH_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Default)]
pub struct FlashMessage {
    current: Option<(String, Instant)>,
}

impl FlashMessage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a message. Replaces any pending one and restarts the interval.
    pub fn show<S: Into<String>>(&mut self, text: S, now: Instant) {
        self.current = Some((text.into(), now + FLASH_DURATION));
    }

    pub fn text(&self) -> Option<&str> {
        self.current.as_ref().map(|(text, _)| text.as_str())
    }

    /// Clear the message once its deadline has passed. Returns true if cleared.
    pub fn expire(&mut self, now: Instant) -> bool {
        match &self.current {
            Some((_, deadline)) if now >= *deadline => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the pending message without waiting for its deadline
    pub fn cancel(&mut self) {
        self.current = None;
    }
}
