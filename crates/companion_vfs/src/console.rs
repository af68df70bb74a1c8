//! Observable console log stream.
//!
//! Non-fatal conditions (conflicts, skipped operations, import filtering)
//! are appended here rather than thrown, so the presentation layer can show
//! them in order. The stream is append-only and user-clearable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a console message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Log,
    Info,
    Warn,
    Error,
    Success,
}

/// One line in the console stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleMessage {
    pub id: String,
    #[serde(rename = "type")]
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ConsoleMessage {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            level,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Ordered, append-only log of console messages.
#[derive(Debug, Clone, Default)]
pub struct Console {
    messages: Vec<ConsoleMessage>,
}

impl Console {
    /// Create a console seeded with the startup greeting.
    pub fn new() -> Self {
        let mut console = Self::default();
        console.info("Application initialized. Welcome!");
        console
    }

    pub fn messages(&self) -> &[ConsoleMessage] {
        &self.messages
    }

    /// Append a message, mirroring it to the tracing subscriber.
    pub fn push(&mut self, level: LogLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            LogLevel::Warn => tracing::warn!("{}", message),
            LogLevel::Error => tracing::error!("{}", message),
            _ => tracing::info!("{}", message),
        }
        self.messages.push(ConsoleMessage::new(level, message));
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Info, message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Warn, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Error, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Success, message);
    }

    /// Clear the stream, leaving a single marker message.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.info("Console cleared by user.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_append_in_order() {
        let mut console = Console::default();
        console.info("first");
        console.warn("second");
        let levels: Vec<LogLevel> = console.messages().iter().map(|m| m.level).collect();
        assert_eq!(levels, vec![LogLevel::Info, LogLevel::Warn]);
    }

    #[test]
    fn test_clear_leaves_marker() {
        let mut console = Console::new();
        console.error("boom");
        console.clear();
        assert_eq!(console.messages().len(), 1);
        assert!(console.messages()[0].message.contains("cleared"));
    }

    #[test]
    fn test_level_wire_format() {
        let msg = ConsoleMessage::new(LogLevel::Success, "done");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "success");
    }
}
