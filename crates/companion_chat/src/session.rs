//! Conversation orchestration.
//!
//! A [`ChatSession`] owns the message history and the file store, and is the
//! single writer for both. Every model exchange follows the same shape:
//! refuse if a request is already in flight, record the user message, call
//! the model, and fold the parsed reply back into the store. A checkpoint of
//! the pre-operation file set is attached to any assistant message that
//! changed files, so the user can roll the project back to that point later.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use companion_import::{import_tree, TreeSource};
use companion_vfs::{Checkpoint, ConsoleMessage, FileStore};

use crate::error::{ChatError, ChatResult};
use crate::llm::GenerateReply;
use crate::prompt::{build_fix_prompt, build_prompt};
use crate::reply::parse_reply;
use crate::types::{Message, ScreenshotContext};

const GREETING: &str =
    "Welcome to Code Companion! Type your coding questions or requests below. \
     What would you like to build today?";

/// One conversation bound to one project.
pub struct ChatSession {
    id: String,
    messages: Vec<Message>,
    store: FileStore,
    llm: Arc<dyn GenerateReply>,
    is_loading: bool,
}

impl ChatSession {
    pub fn new(llm: Arc<dyn GenerateReply>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            messages: vec![Message::assistant(GREETING)],
            store: FileStore::new(),
            llm,
            is_loading: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn store(&self) -> &FileStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut FileStore {
        &mut self.store
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Send a user message through the model and apply any returned file
    /// operations. A model failure is not an `Err`: it becomes an assistant
    /// apology message and a console line, and the file set stays untouched.
    pub async fn send_message(
        &mut self,
        text: impl Into<String>,
        screenshot: Option<ScreenshotContext>,
    ) -> ChatResult<&Message> {
        let text = text.into();
        let user_message = Message::user(&text).with_screenshot(screenshot.clone());
        let console_context = screenshot.as_ref().map(|s| s.console_context.clone());
        let prompt = build_prompt(&text, self.store.entries(), console_context.as_deref());
        self.exchange(user_message, prompt, screenshot, false).await
    }

    /// Ask the model to fix one console error, optionally with the selected
    /// file's content as context.
    pub async fn fix_error(&mut self, log: &ConsoleMessage) -> ChatResult<&Message> {
        let fix_request = build_fix_prompt(log, self.store.selected_file());
        let user_message = Message::user(&fix_request).as_fix_attempt();
        let prompt = build_prompt(&fix_request, self.store.entries(), None);
        self.exchange(user_message, prompt, None, true).await
    }

    async fn exchange(
        &mut self,
        user_message: Message,
        prompt: String,
        screenshot: Option<ScreenshotContext>,
        fix_attempt: bool,
    ) -> ChatResult<&Message> {
        if self.is_loading {
            return Err(ChatError::Busy);
        }
        self.is_loading = true;
        self.messages.push(user_message);

        let started = Instant::now();
        let raw = self.llm.generate(prompt, screenshot).await;
        let elapsed = started.elapsed().as_secs_f64();
        self.is_loading = false;

        let raw = match raw {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "model call failed");
                self.store
                    .console_mut()
                    .error(format!("AI Error: {}", e));
                let mut apology =
                    Message::assistant(format!("Sorry, I encountered an error: {}", e));
                apology.processing_time = Some(elapsed);
                if fix_attempt {
                    apology = apology.as_fix_attempt();
                }
                self.messages.push(apology);
                return Ok(self.messages.last().unwrap());
            }
        };

        let reply = parse_reply(&raw);
        let mut message = Message::assistant(reply.explanation);
        message.processing_time = Some(elapsed);
        if fix_attempt {
            message = message.as_fix_attempt();
        }

        if let Some(operations) = reply.file_operations {
            if !operations.is_empty() {
                // Snapshot before mutating so the message can undo itself.
                let checkpoint = Checkpoint::capture(self.store.entries());
                let applied = self.store.apply_operations(&operations);
                info!(
                    requested = operations.len(),
                    applied = applied.len(),
                    "applied assistant file operations"
                );
                message.checkpoint = Some(checkpoint);
                message.operations_applied = Some(applied);
            }
        }

        self.messages.push(message);
        Ok(self.messages.last().unwrap())
    }

    /// Roll the file set back to the snapshot attached to `message_id`.
    pub fn restore_checkpoint(&mut self, message_id: &str) -> ChatResult<()> {
        let message = self
            .messages
            .iter()
            .find(|m| m.id == message_id)
            .ok_or_else(|| ChatError::MessageNotFound(message_id.to_string()))?;
        let checkpoint = message
            .checkpoint
            .as_ref()
            .ok_or_else(|| ChatError::NoCheckpoint(message_id.to_string()))?
            .clone();

        self.store.restore(&checkpoint);
        self.store.console_mut().info(format!(
            "Restored project to checkpoint ({} entries)",
            checkpoint.len()
        ));
        Ok(())
    }

    /// Replace the whole project with the result of a directory import.
    /// On error the prior file set is left untouched.
    pub fn import_directory(
        &mut self,
        source: impl TreeSource,
    ) -> ChatResult<companion_import::ImportReport> {
        let outcome = import_tree(source, self.store.console_mut())?;
        let report = outcome.report;
        self.store.replace_all(outcome.entries, outcome.selection);
        Ok(report)
    }

    /// Drop the message history and start over. The file set is kept.
    pub fn reset_conversation(&mut self) {
        self.messages.clear();
        self.messages.push(Message::assistant(GREETING));
        self.is_loading = false;
        info!(session = %self.id, "conversation reset");
    }
}
