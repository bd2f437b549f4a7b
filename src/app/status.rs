//! Status line shown to the user after load, parse and clear actions.

use std::time::{Duration, Instant};

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusLevel {
    #[default]
    Info,
    Warning,
    Error,
}

/// Holds the current status message, optionally clearing it after a delay.
///
/// # Example
///
/// ```
/// use allergen_tools::app::{StatusLevel, StatusMessage};
///
/// let mut status = StatusMessage::new();
/// status.set(StatusLevel::Info, "Lokale Daten gelöscht.");
/// assert_eq!(status.peek(), Some("Lokale Daten gelöscht."));
///
/// status.clear();
/// assert!(status.peek().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StatusMessage {
    message: Option<String>,
    level: StatusLevel,
    set_at: Option<Instant>,
    auto_clear_after: Option<Duration>,
}

impl StatusMessage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a status holder whose messages expire after `duration`.
    #[must_use]
    pub const fn with_auto_clear(duration: Duration) -> Self {
        Self {
            message: None,
            level: StatusLevel::Info,
            set_at: None,
            auto_clear_after: Some(duration),
        }
    }

    pub fn set(&mut self, level: StatusLevel, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.level = level;
        self.set_at = Some(Instant::now());
    }

    pub fn info(&mut self, msg: impl Into<String>) {
        self.set(StatusLevel::Info, msg);
    }

    pub fn warn(&mut self, msg: impl Into<String>) {
        self.set(StatusLevel::Warning, msg);
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        self.set(StatusLevel::Error, msg);
    }

    pub fn clear(&mut self) {
        self.message = None;
        self.level = StatusLevel::Info;
        self.set_at = None;
    }

    /// Current message, dropping it first if it has expired.
    pub fn message(&mut self) -> Option<&str> {
        if let (Some(set_at), Some(duration)) = (self.set_at, self.auto_clear_after)
            && set_at.elapsed() >= duration
        {
            self.clear();
        }
        self.message.as_deref()
    }

    /// Current message without checking expiry.
    #[must_use]
    pub fn peek(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub const fn level(&self) -> StatusLevel {
        self.level
    }

    #[must_use]
    pub const fn has_message(&self) -> bool {
        self.message.is_some()
    }

    pub const fn take(&mut self) -> Option<String> {
        self.set_at = None;
        self.message.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_set_and_level() {
        let mut status = StatusMessage::new();
        assert!(!status.has_message());

        status.warn("Achtung");
        assert_eq!(status.peek(), Some("Achtung"));
        assert_eq!(status.level(), StatusLevel::Warning);

        status.clear();
        assert!(!status.has_message());
        assert_eq!(status.level(), StatusLevel::Info);
    }

    #[test]
    fn test_auto_clear() {
        let mut status = StatusMessage::with_auto_clear(Duration::from_millis(10));
        status.info("kurz");
        assert_eq!(status.message(), Some("kurz"));
        thread::sleep(Duration::from_millis(20));
        assert!(status.message().is_none());
    }

    #[test]
    fn test_take() {
        let mut status = StatusMessage::new();
        status.error("kaputt");
        assert_eq!(status.take().as_deref(), Some("kaputt"));
        assert!(status.peek().is_none());
    }
}
