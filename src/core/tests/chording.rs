use std::sync::Arc;
use std::time::Instant;

use super::{chord, make_engine, ms, type_word};
use crate::config::EngineConfig;
use crate::core::engine::BrailleEngine;
use crate::core::lexicon::Lexicon;
use crate::core::types::{BrailleCell, ChordEvent};

#[test]
fn dots_one_two_decode_to_b_in_either_release_order() {
    for release in ["dw", "wd"] {
        let mut engine = make_engine();
        let now = Instant::now();
        engine.on_key_down_at('d', now);
        let held = engine.on_key_down_at('w', now);
        assert_eq!(held.live_dots.canonical(), "12");
        assert_eq!(held.preview, Some('b'));

        let mut keys = release.chars();
        let first = engine.on_key_up_at(keys.next().unwrap(), now);
        assert!(first.events.is_empty());
        let second = engine.on_key_up_at(keys.next().unwrap(), now);
        assert_eq!(
            second.events,
            vec![ChordEvent::Character { cell: BrailleCell::parse_canonical("12").unwrap(), ch: 'b' }]
        );
        assert_eq!(engine.live_text(), "b");
        assert_eq!(engine.braille_buffer(), "12");
    }
}

#[test]
fn uppercase_keys_are_recognized() {
    let mut engine = make_engine();
    let response = chord(&mut engine, "DW");
    assert!(matches!(response.events[..], [ChordEvent::Character { ch: 'b', .. }]));
}

#[test]
fn unrecognized_keys_are_ignored() {
    let mut engine = make_engine();
    let now = Instant::now();
    engine.on_key_down_at('d', now);
    let response = engine.on_key_down_at('x', now);
    assert_eq!(response.live_dots.canonical(), "1");
    assert!(engine.on_key_up_at('x', now).events.is_empty());
    assert!(matches!(
        engine.on_key_up_at('d', now).events[..],
        [ChordEvent::Character { ch: 'a', .. }]
    ));
}

#[test]
fn space_chord_is_a_word_boundary() {
    let mut engine = make_engine();
    type_word(&mut engine, "the");
    let response = chord(&mut engine, " ");
    assert_eq!(response.events, vec![ChordEvent::WordBoundary]);
    assert_eq!(response.suggestions, Some(vec![]));
    assert_eq!(engine.live_text(), "the ");
    assert_eq!(engine.braille_buffer(), "2345 125 15  ");
    assert!(engine.suggestions().is_empty());
}

#[test]
fn spurious_release_is_a_noop() {
    let mut engine = make_engine();
    let response = engine.on_key_up_at('d', Instant::now());
    assert!(response.events.is_empty());
    assert_eq!(response.suggestions, None);
    assert_eq!(engine.live_text(), "");
}

#[test]
fn buffer_decodes_to_live_text() {
    let mut engine = make_engine();
    type_word(&mut engine, "the");
    chord(&mut engine, " ");
    type_word(&mut engine, "cat");
    assert_eq!(engine.live_text(), "the cat");
    assert_eq!(engine.decode_word(engine.braille_buffer()), "the cat");
}

#[test]
fn leading_boundary_is_dropped() {
    let mut engine = make_engine();
    let response = chord(&mut engine, " ");
    assert_eq!(response.events, vec![ChordEvent::WordBoundary]);
    type_word(&mut engine, "a");
    assert_eq!(engine.braille_buffer(), "1");
    assert_eq!(engine.live_text(), "a");
    assert_eq!(engine.decode_word(engine.braille_buffer()), engine.live_text());
}

#[test]
fn repeated_boundaries_collapse() {
    let mut engine = make_engine();
    type_word(&mut engine, "a");
    chord(&mut engine, " ");
    chord(&mut engine, " ");
    type_word(&mut engine, "b");
    assert_eq!(engine.braille_buffer(), "1  12");
    assert_eq!(engine.live_text(), "a b");
    assert_eq!(engine.decode_word(engine.braille_buffer()), engine.live_text());
}

#[test]
fn unmapped_cell_appends_unknown_marker() {
    let mut engine = make_engine();
    let response = chord(&mut engine, "p");
    assert!(matches!(response.events[..], [ChordEvent::Character { ch: '?', .. }]));
    assert_eq!(engine.live_text(), "?");
    assert_eq!(engine.braille_buffer(), "6");
}

#[test]
fn debounced_release_finalizes_on_poll() {
    let mut engine = BrailleEngine::new(Arc::new(Lexicon::default_english()), &EngineConfig::default());
    let t = Instant::now();
    engine.on_key_down_at('d', t);
    engine.on_key_down_at('w', ms(t, 2));
    engine.on_key_up_at('d', ms(t, 10));
    let released = engine.on_key_up_at('w', ms(t, 25));
    assert!(released.events.is_empty());
    assert_eq!(engine.pending_deadline(), Some(ms(t, 75)));

    assert!(engine.poll_at(ms(t, 60)).events.is_empty());
    let fired = engine.poll_at(ms(t, 75));
    assert!(matches!(fired.events[..], [ChordEvent::Character { ch: 'b', .. }]));
    assert!(fired.suggestions.is_some());
    assert_eq!(engine.pending_deadline(), None);
}

#[test]
fn jittered_press_stays_one_chord() {
    let mut engine = BrailleEngine::new(Arc::new(Lexicon::default_english()), &EngineConfig::default());
    let t = Instant::now();
    engine.on_key_down_at('d', t);
    engine.on_key_up_at('d', ms(t, 20));
    // 'w' lands inside the debounce window.
    engine.on_key_down_at('w', ms(t, 40));
    engine.on_key_up_at('w', ms(t, 45));
    assert!(engine.poll_at(ms(t, 80)).events.is_empty());
    let fired = engine.poll_at(ms(t, 95));
    assert!(matches!(fired.events[..], [ChordEvent::Character { ch: 'b', .. }]));
    assert_eq!(engine.live_text(), "b");
}

#[test]
fn reset_drops_partial_chord_and_text() {
    let mut engine = make_engine();
    type_word(&mut engine, "he");
    engine.on_key_down_at('d', Instant::now());
    engine.reset();
    assert_eq!(engine.live_text(), "");
    assert_eq!(engine.braille_buffer(), "");
    assert!(engine.on_key_up_at('d', Instant::now()).events.is_empty());
}
