// File: src/core/ranker.rs
use crate::core::lexicon::Lexicon;
use crate::fuzzy::FuzzyMatcher;
use crate::learning::HistoryTracker;
use std::collections::HashSet;
use tracing::{debug, debug_span};

/// Merges exact-prefix completions with fuzzy corrections.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuggestionRanker {
    matcher: FuzzyMatcher,
}

impl SuggestionRanker {
    pub fn new(matcher: FuzzyMatcher) -> Self {
        Self { matcher }
    }

    /// At most `limit` words. Prefix matches come first in trie order, then
    /// fuzzy matches by descending score; each word appears once.
    pub fn get_suggestions(
        &self,
        lexicon: &Lexicon,
        history: &HistoryTracker,
        input: &str,
        limit: usize,
    ) -> Vec<String> {
        let input = input.trim().to_lowercase();
        if input.is_empty() {
            return vec![];
        }
        let _span = debug_span!("get_suggestions", input = %input, limit).entered();

        // 1. Exact prefix completions
        let prefix_matches = lexicon.search_prefix(&input);

        // 2. Fuzzy matches over the whole dictionary
        let fuzzy_matches = self.matcher.rank(&input, lexicon.words(), history);
        debug!(
            prefix = prefix_matches.len(),
            fuzzy = fuzzy_matches.len(),
            "candidates collected"
        );

        // 3. Union in first-seen order, then truncate
        let mut seen = HashSet::new();
        prefix_matches
            .into_iter()
            .chain(fuzzy_matches.into_iter().map(|m| m.word))
            .filter(|word| seen.insert(word.clone()))
            .take(limit)
            .collect()
    }
}
