// File: src/learning.rs
use std::collections::VecDeque;
use tracing::debug;

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;
/// Upper bound accepted from configuration.
pub const MAX_HISTORY_CAPACITY: usize = 10_000;

/// Most-recently-accepted words, newest first, without duplicates.
#[derive(Debug, Clone)]
pub struct HistoryTracker {
    capacity: usize,
    words: VecDeque<String>,
}

impl Default for HistoryTracker {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryTracker {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            // Grows on demand; `capacity` only bounds `record`.
            words: VecDeque::new(),
        }
    }

    /// Moves `word` (lowercased) to the front, evicting the oldest entry when full.
    pub fn record(&mut self, word: &str) {
        let word = word.to_lowercase();
        if let Some(pos) = self.words.iter().position(|w| *w == word) {
            self.words.remove(pos);
        }
        self.words.push_front(word);
        self.words.truncate(self.capacity);
        debug!(len = self.words.len(), "history updated");
    }

    pub fn contains(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        self.words.iter().any(|w| *w == word)
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
