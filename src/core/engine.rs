use crate::config::{EngineConfig, KeyBindings};
use crate::core::chord::ChordDecoder;
use crate::core::codec::{BrailleCodec, CELL_SEPARATOR, WORD_SEPARATOR};
use crate::core::lexicon::Lexicon;
use crate::core::ranker::SuggestionRanker;
use crate::core::types::{ChordEvent, KeyResponse};
use crate::fuzzy::FuzzyMatcher;
use crate::learning::HistoryTracker;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

// One engine per input session. The lexicon is shared, everything else is owned.
pub struct BrailleEngine {
    lexicon: Arc<Lexicon>,
    codec: BrailleCodec,
    ranker: SuggestionRanker,
    history: HistoryTracker,
    chord: ChordDecoder,
    key_bindings: KeyBindings,
    suggestion_limit: usize,
    /// Cell pattern typed so far: cells joined by one space, words by two.
    braille_buffer: String,
    /// Decoded text typed so far.
    live_text: String,
    suggestions: Vec<String>,
}

impl Default for BrailleEngine {
    fn default() -> Self {
        Self::new(Arc::new(Lexicon::default_english()), &EngineConfig::default())
    }
}

impl BrailleEngine {
    pub fn new(lexicon: Arc<Lexicon>, config: &EngineConfig) -> Self {
        Self {
            lexicon,
            codec: BrailleCodec::new(),
            ranker: SuggestionRanker::new(FuzzyMatcher::new(config.history_boost)),
            history: HistoryTracker::new(config.history_capacity),
            chord: ChordDecoder::new(config.debounce()),
            key_bindings: config.key_bindings.clone(),
            suggestion_limit: config.suggestion_limit,
            braille_buffer: String::new(),
            live_text: String::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn lexicon(&self) -> &Arc<Lexicon> {
        &self.lexicon
    }

    pub fn history(&self) -> &HistoryTracker {
        &self.history
    }

    pub fn key_bindings(&self) -> &KeyBindings {
        &self.key_bindings
    }

    pub fn braille_buffer(&self) -> &str {
        &self.braille_buffer
    }

    pub fn live_text(&self) -> &str {
        &self.live_text
    }

    /// Suggestions for the in-progress word, as of the last refresh.
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    // --- Text level ---

    pub fn get_suggestions(&self, text: &str, limit: usize) -> Vec<String> {
        self.ranker
            .get_suggestions(&self.lexicon, &self.history, text, limit)
    }

    /// Typed-text entry: suggestions with the configured limit.
    pub fn suggest_for_text(&self, text: &str) -> Vec<String> {
        self.get_suggestions(text, self.suggestion_limit)
    }

    pub fn encode_word(&self, text: &str) -> String {
        self.codec.encode_word(text)
    }

    pub fn decode_word(&self, pattern: &str) -> String {
        self.codec.decode_word(pattern)
    }

    pub fn record_accepted(&mut self, word: &str) {
        if word.trim().is_empty() {
            return;
        }
        self.history.record(word.trim());
    }

    /// Records `word`, swaps it in for the in-progress word and returns its
    /// Braille pattern for display.
    pub fn accept_suggestion(&mut self, word: &str) -> String {
        let word = word.trim().to_lowercase();
        self.record_accepted(&word);

        let text_start = self
            .live_text
            .rfind(char::is_whitespace)
            .map_or(0, |i| i + 1);
        self.live_text.truncate(text_start);
        self.live_text.push_str(&word);

        let pattern = self.codec.encode_word(&word);
        let cell_start = self
            .braille_buffer
            .rfind(WORD_SEPARATOR)
            .map_or(0, |i| i + WORD_SEPARATOR.len());
        self.braille_buffer.truncate(cell_start);
        self.braille_buffer.push_str(&pattern);

        self.suggestions.clear();
        pattern
    }

    /// Clears typed text and any partial chord. History is kept.
    pub fn reset(&mut self) {
        self.chord.reset();
        self.braille_buffer.clear();
        self.live_text.clear();
        self.suggestions.clear();
    }

    // --- Chord level ---

    pub fn on_key_down(&mut self, key: char) -> KeyResponse {
        self.on_key_down_at(key, Instant::now())
    }

    pub fn on_key_up(&mut self, key: char) -> KeyResponse {
        self.on_key_up_at(key, Instant::now())
    }

    /// Fires a due deferred finalize. Frontends call this from their timer.
    pub fn poll(&mut self) -> KeyResponse {
        self.poll_at(Instant::now())
    }

    pub fn on_key_down_at(&mut self, key: char, now: Instant) -> KeyResponse {
        let Some(chord_key) = self.key_bindings.resolve(key) else {
            debug!(?key, "ignored key-down");
            return self.respond(None);
        };
        let event = self.chord.key_down(chord_key, now);
        self.respond(event)
    }

    pub fn on_key_up_at(&mut self, key: char, now: Instant) -> KeyResponse {
        let Some(chord_key) = self.key_bindings.resolve(key) else {
            debug!(?key, "ignored key-up");
            return self.respond(None);
        };
        let event = self.chord.key_up(chord_key, now);
        self.respond(event)
    }

    pub fn poll_at(&mut self, now: Instant) -> KeyResponse {
        let event = self.chord.poll(now);
        self.respond(event)
    }

    /// When the frontend should call `poll` next, if a chord is waiting.
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.chord.pending_deadline()
    }

    fn respond(&mut self, event: Option<ChordEvent>) -> KeyResponse {
        let suggestions = event.as_ref().map(|event| {
            self.apply(event);
            self.suggestions.clone()
        });
        KeyResponse {
            live_dots: self.chord.live_dots(),
            preview: self.chord.preview(),
            events: event.into_iter().collect(),
            suggestions,
        }
    }

    fn apply(&mut self, event: &ChordEvent) {
        match event {
            ChordEvent::WordBoundary => {
                debug!("word boundary");
                // Boundaries collapse: none at the start, never two in a row.
                if !self.braille_buffer.is_empty() && !self.braille_buffer.ends_with(WORD_SEPARATOR) {
                    self.braille_buffer.push_str(WORD_SEPARATOR);
                }
                if !self.live_text.is_empty() && !self.live_text.ends_with(' ') {
                    self.live_text.push(' ');
                }
                self.suggestions.clear();
            }
            ChordEvent::Character { cell, ch } => {
                if !self.braille_buffer.is_empty() && !self.braille_buffer.ends_with(CELL_SEPARATOR) {
                    self.braille_buffer.push_str(CELL_SEPARATOR);
                }
                self.braille_buffer.push_str(&cell.canonical());
                self.live_text.push(*ch);

                let current_word = self.live_text.split_whitespace().last().unwrap_or("");
                self.suggestions = self.ranker.get_suggestions(
                    &self.lexicon,
                    &self.history,
                    current_word,
                    self.suggestion_limit,
                );
            }
        }
    }
}
