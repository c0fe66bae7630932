//! Transcript accumulation
//!
//! Ordered, append-only log of role-tagged utterance fragments for one live
//! session. Entries are never mutated or reordered after insertion; the log
//! is cleared at the start of each new session and discarded, not persisted,
//! when the session ends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};
use tokio::sync::watch;

/// Who produced an utterance fragment. Exactly two speakers exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeakerRole {
    User,
    Model,
}

/// A single utterance fragment received during an active session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Which speaker produced the fragment
    pub role: SpeakerRole,

    /// Fragment content, as delivered by the backend
    pub text: String,

    /// When the fragment arrived. Informational only; ordering is defined
    /// by append order, never by timestamp.
    pub received_at: DateTime<Utc>,
}

impl TranscriptEntry {
    pub fn new(role: SpeakerRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            received_at: Utc::now(),
        }
    }
}

/// Append-only transcript log with change notification.
///
/// Consumers that need autoscroll-to-latest semantics subscribe to the
/// revision watch and re-read `current_sequence()` whenever it ticks;
/// scrolling itself is the consumer's concern.
pub struct TranscriptAccumulator {
    entries: Mutex<Vec<TranscriptEntry>>,
    revision: watch::Sender<u64>,
}

impl TranscriptAccumulator {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            entries: Mutex::new(Vec::new()),
            revision,
        }
    }

    /// Clear the log. Called at the start of each new session.
    pub fn reset(&self) {
        self.lock_entries().clear();
        self.bump();
    }

    /// Append one fragment to the end of the log
    pub fn append(&self, entry: TranscriptEntry) {
        self.lock_entries().push(entry);
        self.bump();
    }

    /// Snapshot of the log in exact append order
    pub fn current_sequence(&self) -> Vec<TranscriptEntry> {
        self.lock_entries().clone()
    }

    /// Observe "sequence changed". The value is a revision counter that
    /// ticks on every append or reset.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_entries().is_empty()
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    fn lock_entries(&self) -> MutexGuard<'_, Vec<TranscriptEntry>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for TranscriptAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
