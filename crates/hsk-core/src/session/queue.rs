//! Session queue with an explicit cursor

use serde::Serialize;

use super::types::EndPolicy;
use crate::vocabulary::VocabularyItem;

/// Result of moving the cursor forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance<'a> {
    /// The next word to present
    Next(&'a VocabularyItem),
    /// A fixed session ran out of words
    Complete,
}

/// Ordered words for one practice run plus a cursor.
///
/// Invariant: `cursor <= items.len()`, and `cursor == items.len()` only
/// once a fixed session is exhausted. A queue is never empty; an empty
/// pool yields [`SessionBuild::Empty`](super::SessionBuild::Empty) instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionQueue {
    items: Vec<VocabularyItem>,
    cursor: usize,
    end_policy: EndPolicy,
    laps: u32,
}

impl SessionQueue {
    pub(crate) fn new(items: Vec<VocabularyItem>, end_policy: EndPolicy) -> Self {
        debug_assert!(!items.is_empty());
        Self {
            items,
            cursor: 0,
            end_policy,
            laps: 0,
        }
    }

    /// Word under the cursor, `None` once exhausted.
    pub fn current(&self) -> Option<&VocabularyItem> {
        self.items.get(self.cursor)
    }

    /// Move to the next word.
    pub fn advance(&mut self) -> Advance<'_> {
        if self.cursor < self.items.len() {
            self.cursor += 1;
        }

        if self.cursor == self.items.len() {
            match self.end_policy {
                EndPolicy::Complete => return Advance::Complete,
                EndPolicy::Wrap => {
                    self.cursor = 0;
                    self.laps += 1;
                }
            }
        }

        match self.items.get(self.cursor) {
            Some(item) => Advance::Next(item),
            None => Advance::Complete,
        }
    }

    /// Put the cursor back on the first word without reshuffling.
    pub fn restart(&mut self) {
        self.cursor = 0;
        self.laps = 0;
    }

    /// Zero-based cursor position
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true once a fixed session has no words left.
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.items.len()
    }

    /// Completed passes through a wrapping queue
    pub fn laps(&self) -> u32 {
        self.laps
    }

    pub fn end_policy(&self) -> EndPolicy {
        self.end_policy
    }

    pub fn items(&self) -> &[VocabularyItem] {
        &self.items
    }
}
