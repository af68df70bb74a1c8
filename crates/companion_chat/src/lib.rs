//! Chat layer: conversation state, prompt assembly, and the Gemini adapter.
//!
//! [`ChatSession`] is the entry point. It owns the message history and the
//! project's [`companion_vfs::FileStore`], drives the model through the
//! [`GenerateReply`] seam, and folds parsed replies back into the store.
//! Reply parsing is tolerant by construction: malformed model output is
//! surfaced as explanation text, never as a crash.

pub mod error;
pub mod llm;
pub mod prompt;
pub mod reply;
pub mod session;
pub mod types;

pub use error::{ChatError, ChatResult};
pub use llm::{GeminiClient, GenerateReply};
pub use prompt::{build_fix_prompt, build_prompt};
pub use reply::{parse_reply, strip_code_fence};
pub use session::ChatSession;
pub use types::{AssistantReply, Message, ScreenshotContext, Sender};
