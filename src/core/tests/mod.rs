mod chording;

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::EngineConfig;
use crate::core::engine::BrailleEngine;
use crate::core::lexicon::Lexicon;
use crate::core::types::KeyResponse;

/// Engine that finalizes chords on the last key-up, no debounce.
fn make_engine() -> BrailleEngine {
    let config = EngineConfig {
        debounce_ms: 0,
        ..EngineConfig::default()
    };
    BrailleEngine::new(Arc::new(Lexicon::default_english()), &config)
}

/// Press all keys, then release them in the same order. Returns the final response.
fn chord(engine: &mut BrailleEngine, keys: &str) -> KeyResponse {
    let now = Instant::now();
    for key in keys.chars() {
        engine.on_key_down_at(key, now);
    }
    let mut last = KeyResponse::default();
    for key in keys.chars() {
        last = engine.on_key_up_at(key, now);
    }
    last
}

/// Chords for each letter of `word` under the default D W Q K O P layout.
fn type_word(engine: &mut BrailleEngine, word: &str) -> KeyResponse {
    let mut last = KeyResponse::default();
    for letter in word.chars() {
        last = chord(engine, letter_keys(letter));
    }
    last
}

fn letter_keys(letter: char) -> &'static str {
    match letter {
        'a' => "d",
        'b' => "dw",
        'c' => "dk",
        'd' => "dko",
        'e' => "do",
        'h' => "dwo",
        'l' => "dwq",
        'o' => "dqo",
        't' => "wqko",
        other => panic!("no test layout for {other:?}"),
    }
}

fn ms(base: Instant, millis: u64) -> Instant {
    base + Duration::from_millis(millis)
}
