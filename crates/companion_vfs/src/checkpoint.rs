//! Checkpoints: immutable deep snapshots of the entry collection.
//!
//! A checkpoint is captured just before a batch of operations is applied
//! and attached to the assistant message that proposed them, so restoring
//! always means "undo everything since this point".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::Entry;

/// Deep, structurally independent copy of the whole entry collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub files: Vec<Entry>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Checkpoint {
    /// Capture the current state. Later mutation of the live store does not
    /// affect the captured copy.
    pub fn capture(entries: &[Entry]) -> Self {
        Self {
            files: entries.to_vec(),
            created_at: Utc::now(),
        }
    }

    /// The checkpoint's entries as a new live set. Callers must re-validate
    /// the selection against the returned entries.
    pub fn restore(&self) -> Vec<Entry> {
        self.files.clone()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
