//! Core types for the chat layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use companion_vfs::{Checkpoint, Operation};

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// Visual context attached to a user message: a screenshot plus the console
/// lines visible at capture time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenshotContext {
    /// Data URL of the captured frame (`data:image/png;base64,...`)
    #[serde(rename = "screenshotDataUrl")]
    pub screenshot_data_url: String,
    /// Console lines serialized for the model
    #[serde(rename = "consoleContextForAI")]
    pub console_context: String,
}

impl ScreenshotContext {
    /// The base64 payload of the data URL, without the media-type prefix.
    pub fn base64_data(&self) -> Option<&str> {
        self.screenshot_data_url.split_once(',').map(|(_, data)| data)
    }
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID (UUID)
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Pre-operation snapshot, present on assistant messages that applied
    /// file operations; restoring it undoes everything since this message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkpoint: Option<Checkpoint>,
    /// The operations that actually took effect for this message
    #[serde(
        rename = "fileOperationsApplied",
        skip_serializing_if = "Option::is_none"
    )]
    pub operations_applied: Option<Vec<Operation>>,
    /// Round-trip time of the model call, in seconds
    #[serde(rename = "processingTime", skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<f64>,
    /// Whether this exchange was triggered by "fix with AI"
    #[serde(rename = "isFixAttempt", default, skip_serializing_if = "is_false")]
    pub is_fix_attempt: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<ScreenshotContext>,
}

fn is_false(value: &bool) -> bool {
    !value
}

impl Message {
    /// Create a new user message
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    /// Create a new assistant message
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text)
    }

    fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sender,
            text: text.into(),
            timestamp: Utc::now(),
            checkpoint: None,
            operations_applied: None,
            processing_time: None,
            is_fix_attempt: false,
            screenshot: None,
        }
    }

    pub fn with_screenshot(mut self, screenshot: Option<ScreenshotContext>) -> Self {
        self.screenshot = screenshot;
        self
    }

    pub fn as_fix_attempt(mut self) -> Self {
        self.is_fix_attempt = true;
        self
    }
}

/// Parsed reply from the model: an explanation plus optional operations.
/// This mirrors the JSON shape the prompt asks the model to produce.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub explanation: String,
    #[serde(
        rename = "fileOperations",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub file_operations: Option<Vec<Operation>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let msg = Message::user("Hello");
        assert_eq!(msg.sender, Sender::User);
        assert_eq!(msg.text, "Hello");
        assert!(msg.checkpoint.is_none());

        let msg = Message::assistant("Hi there!").as_fix_attempt();
        assert_eq!(msg.sender, Sender::Assistant);
        assert!(msg.is_fix_attempt);
    }

    #[test]
    fn test_screenshot_base64_extraction() {
        let context = ScreenshotContext {
            screenshot_data_url: "data:image/png;base64,AAAA".to_string(),
            console_context: String::new(),
        };
        assert_eq!(context.base64_data(), Some("AAAA"));
    }

    #[test]
    fn test_message_wire_fields_are_camel_case() {
        let mut msg = Message::assistant("done");
        msg.processing_time = Some(1.5);
        msg.operations_applied = Some(Vec::new());
        let json = serde_json::to_value(&msg).unwrap();
        assert!(json.get("processingTime").is_some());
        assert!(json.get("fileOperationsApplied").is_some());
        assert!(json.get("isFixAttempt").is_none()); // false is omitted
    }
}
