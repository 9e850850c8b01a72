// File: src/core/lexicon.rs
use crate::core::trie::PrefixTrie;
use std::collections::HashSet;

/// Built-in English word list.
pub const DEFAULT_WORDS: &[&str] = &[
    "hello", "world", "braille", "system", "typing", "keyboard",
    "computer", "screen", "reader", "access", "technology", "innovation",
    "learning", "education", "student", "teacher", "school", "book",
    "reading", "writing", "communication", "language", "english",
    "alphabet", "letter", "word", "sentence", "paragraph", "document",
    "help", "support", "assistance", "guide", "tutorial", "practice",
    "exercise", "lesson", "chapter", "section", "page", "line",
    "character", "symbol", "pattern", "dot", "cell", "grade",
    "tactile", "touch", "feel", "sense", "finger", "hand",
    "the", "and", "for", "are", "but", "not", "you", "all",
    "can", "had", "her", "was", "one", "our", "out", "day",
    "get", "has", "him", "his", "how", "man", "new", "now",
    "old", "see", "two", "way", "who", "boy", "did", "its",
    "let", "put", "say", "she", "too", "use",
];

/// The fixed dictionary: words in load order plus a prefix index over them.
///
/// Immutable after construction. Wrap in an `Arc` to share it between engines.
#[derive(Clone)]
pub struct Lexicon {
    words: Vec<String>,
    trie: PrefixTrie,
}

impl Lexicon {
    /// Lowercases and trims every word, drops empties, keeps the first
    /// occurrence of duplicates.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        let mut trie = PrefixTrie::new();
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() || !seen.insert(word.clone()) {
                continue;
            }
            trie.insert(&word);
            ordered.push(word);
        }
        Self { words: ordered, trie }
    }

    pub fn default_english() -> Self {
        Self::new(DEFAULT_WORDS)
    }

    /// One word per line; blank lines and `#` comments are skipped.
    pub fn from_word_list(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.trie.contains(word)
    }

    pub fn search_prefix(&self, prefix: &str) -> Vec<String> {
        self.trie.search_prefix(prefix)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::default_english()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_and_dedups() {
        let lex = Lexicon::new(["Hello", " world ", "", "hello", "WORLD", "cell"]);
        assert_eq!(lex.words(), ["hello", "world", "cell"]);
        assert!(lex.contains("hello"));
    }

    #[test]
    fn word_list_parsing() {
        let lex = Lexicon::from_word_list("# comment\nhello\n\n  world\n");
        assert_eq!(lex.words(), ["hello", "world"]);
    }

    #[test]
    fn default_list_loads_whole() {
        let lex = Lexicon::default_english();
        assert_eq!(lex.len(), DEFAULT_WORDS.len());
        assert_eq!(lex.search_prefix("").len(), DEFAULT_WORDS.len());
    }
}
