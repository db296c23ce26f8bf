//! Bounded in-memory history store.

use std::collections::VecDeque;
use std::sync::Mutex;

use tracing::debug;

use fileferry_core::HistoryEntry;

use crate::context::HistoryStore;

/// History log with a configurable maximum depth.
///
/// Appends drop the oldest entry once the log is full. The log is the
/// default [`HistoryStore`] implementation; frontends with their own
/// undo stacks supply a different one.
#[derive(Debug)]
pub struct HistoryLog {
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    entries: VecDeque<(u64, HistoryEntry)>,
    max_entries: usize,
    next_id: u64,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(100)
    }
}

impl HistoryLog {
    /// Create a log holding at most `max_entries`.
    pub fn new(max_entries: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: VecDeque::with_capacity(max_entries.min(1000)),
                max_entries,
                next_id: 0,
            }),
        }
    }

    /// Record an entry, returning its id.
    pub fn record(&self, entry: HistoryEntry) -> u64 {
        let mut inner = self.inner.lock().expect("history lock poisoned");
        let id = inner.next_id;
        inner.next_id += 1;
        if inner.entries.len() >= inner.max_entries {
            inner.entries.pop_front();
        }
        debug!(id, kind = %entry.kind, items = entry.len(), "history recorded");
        inner.entries.push_back((id, entry));
        id
    }

    /// Pop the most recent entry.
    pub fn pop(&self) -> Option<HistoryEntry> {
        let mut inner = self.inner.lock().expect("history lock poisoned");
        inner.entries.pop_back().map(|(_, entry)| entry)
    }

    /// Clone the most recent entry without removing it.
    pub fn peek(&self) -> Option<HistoryEntry> {
        let inner = self.inner.lock().expect("history lock poisoned");
        inner.entries.back().map(|(_, entry)| entry.clone())
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("history lock poisoned").entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all entries.
    pub fn clear(&self) {
        self.inner
            .lock()
            .expect("history lock poisoned")
            .entries
            .clear();
    }

    /// Snapshot all entries, oldest first.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.inner
            .lock()
            .expect("history lock poisoned")
            .entries
            .iter()
            .map(|(_, entry)| entry.clone())
            .collect()
    }
}

impl HistoryStore for HistoryLog {
    fn add_history(&self, entry: HistoryEntry) {
        self.record(entry);
    }
}
