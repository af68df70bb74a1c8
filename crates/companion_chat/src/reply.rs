//! Tolerant parsing of model replies.
//!
//! The model is asked for a bare JSON object but routinely wraps it in a
//! fenced code block, with or without a language tag. Parsing never fails:
//! a malformed reply is surfaced as an explanation carrying the raw text,
//! with no file operations, so the store is never mutated on garbage.

use once_cell::sync::Lazy;
use regex::Regex;

use companion_vfs::parse_operations;

use crate::types::AssistantReply;

static FENCE: Lazy<Regex> = Lazy::new(|| {
    // ```lang\n ... \n``` with optional language tag and loose whitespace
    Regex::new(r"(?s)^```(\w*)?\s*\n?(.*?)\n?\s*```$").expect("fence pattern is valid")
});

/// Strip a surrounding triple-backtick fence (and optional language tag)
/// from a reply, returning the inner text. Non-fenced input passes through.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    match FENCE.captures(trimmed) {
        Some(captures) => captures
            .get(2)
            .map(|inner| inner.as_str().trim())
            .unwrap_or(trimmed),
        None => trimmed,
    }
}

/// Parse a raw model reply into an [`AssistantReply`].
///
/// Shape errors (non-JSON text, missing explanation, malformed operations,
/// unknown actions) all degrade to an explanation-only reply that includes
/// the raw text, matching the error taxonomy: the store is never mutated
/// on an unparseable response.
pub fn parse_reply(raw: &str) -> AssistantReply {
    let json_str = strip_code_fence(raw);

    let value: serde_json::Value = match serde_json::from_str(json_str) {
        Ok(value) => value,
        Err(_) => {
            return AssistantReply {
                explanation: format!(
                    "AI returned non-JSON response or malformed JSON. Please try again or \
                     rephrase your request. Raw response: {}",
                    json_str
                ),
                file_operations: None,
            }
        }
    };

    let explanation = match value.get("explanation").and_then(|e| e.as_str()) {
        Some(explanation) => explanation.to_string(),
        None => {
            return AssistantReply {
                explanation: format!(
                    "AI response format error: 'explanation' is missing. Raw response: {}",
                    json_str
                ),
                file_operations: None,
            }
        }
    };

    let file_operations = match value.get("fileOperations") {
        None | Some(serde_json::Value::Null) => None,
        Some(operations) => match parse_operations(operations) {
            Ok(operations) if operations.is_empty() => None,
            Ok(operations) => Some(operations),
            Err(err) => {
                tracing::warn!("Rejected file operations from model: {}", err);
                return AssistantReply {
                    explanation: format!(
                        "AI response format error: {}. Raw response: {}",
                        err, json_str
                    ),
                    file_operations: None,
                };
            }
        },
    };

    AssistantReply {
        explanation,
        file_operations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use companion_vfs::FileAction;

    #[test]
    fn test_strip_fence_with_language_tag() {
        let raw = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fence(raw), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_fence_without_language_tag() {
        let raw = "```\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fence(raw), "{\"a\": 1}");
    }

    #[test]
    fn test_unfenced_text_passes_through() {
        assert_eq!(strip_code_fence("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn test_parse_full_reply() {
        let raw = r#"```json
{"explanation": "Created the app.", "fileOperations": [
  {"action": "create_file", "path": "src/app.js", "content": "x"}
]}
```"#;
        let reply = parse_reply(raw);
        assert_eq!(reply.explanation, "Created the app.");
        let operations = reply.file_operations.unwrap();
        assert_eq!(operations.len(), 1);
        assert_eq!(operations[0].action, FileAction::CreateFile);
    }

    #[test]
    fn test_non_json_becomes_explanation() {
        let reply = parse_reply("I couldn't produce JSON, sorry.");
        assert!(reply.explanation.contains("non-JSON"));
        assert!(reply.explanation.contains("I couldn't produce JSON"));
        assert!(reply.file_operations.is_none());
    }

    #[test]
    fn test_missing_explanation_is_format_error() {
        let reply = parse_reply(r#"{"fileOperations": []}"#);
        assert!(reply.explanation.contains("'explanation' is missing"));
    }

    #[test]
    fn test_unknown_action_rejects_all_operations() {
        let raw = r#"{"explanation": "ok", "fileOperations": [
            {"action": "create_file", "path": "a.txt"},
            {"action": "zap_file", "path": "b.txt"}
        ]}"#;
        let reply = parse_reply(raw);
        assert!(reply.file_operations.is_none());
        assert!(reply.explanation.contains("zap_file"));
    }

    #[test]
    fn test_empty_operations_are_dropped() {
        let reply = parse_reply(r#"{"explanation": "nothing to do", "fileOperations": []}"#);
        assert_eq!(reply.explanation, "nothing to do");
        assert!(reply.file_operations.is_none());
    }
}
