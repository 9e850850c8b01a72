// File: src/core/chord.rs
use crate::core::codec::BrailleCodec;
use crate::core::types::{BrailleCell, ChordEvent, ChordKey, UNKNOWN_MARKER};
use std::time::{Duration, Instant};
use tracing::{debug, debug_span};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(50);

/// The recognized keys in a set: dots as a cell, plus the space bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct KeySet {
    dots: BrailleCell,
    space: bool,
}

impl KeySet {
    fn insert(&mut self, key: ChordKey) {
        match key {
            ChordKey::Dot(dot) => self.dots.insert(dot),
            ChordKey::Space => self.space = true,
        }
    }

    fn remove(&mut self, key: ChordKey) {
        match key {
            ChordKey::Dot(dot) => self.dots.remove(dot),
            ChordKey::Space => self.space = false,
        }
    }

    fn is_empty(&self) -> bool {
        self.dots.is_empty() && !self.space
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ChordState {
    Idle,
    Accumulating {
        held: KeySet,
        seen: KeySet,
        /// Armed when `held` empties; cleared by any key-down before it fires.
        finalize_at: Option<Instant>,
    },
}

/// Turns overlapping key presses into one Braille cell per chord.
///
/// A chord ends when every key is released. With a non-zero debounce the
/// finalize is deferred; the caller drives time through `poll`. A key-down
/// before the deadline cancels it and joins the same chord.
#[derive(Debug, Clone)]
pub struct ChordDecoder {
    state: ChordState,
    debounce: Duration,
    codec: BrailleCodec,
}

impl Default for ChordDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl ChordDecoder {
    pub fn new(debounce: Duration) -> Self {
        Self {
            state: ChordState::Idle,
            debounce,
            codec: BrailleCodec::new(),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, ChordState::Idle)
    }

    /// When the armed finalize is due, if any.
    pub fn pending_deadline(&self) -> Option<Instant> {
        match self.state {
            ChordState::Accumulating { finalize_at, .. } => finalize_at,
            ChordState::Idle => None,
        }
    }

    /// Dots physically held right now.
    pub fn live_dots(&self) -> BrailleCell {
        match self.state {
            ChordState::Accumulating { held, .. } => held.dots,
            ChordState::Idle => BrailleCell::EMPTY,
        }
    }

    /// What the held keys would decode to if released now.
    pub fn preview(&self) -> Option<char> {
        match self.state {
            ChordState::Accumulating { held, .. } if !held.is_empty() => Some(
                self.codec
                    .char_for_cell(held.dots)
                    .unwrap_or(UNKNOWN_MARKER),
            ),
            _ => None,
        }
    }

    /// Returns a chord finalized by this call: one whose deadline had already
    /// passed without a `poll`.
    pub fn key_down(&mut self, key: ChordKey, now: Instant) -> Option<ChordEvent> {
        let overdue = self.poll(now);
        if let ChordState::Accumulating { held, seen, finalize_at } = &mut self.state {
            held.insert(key);
            seen.insert(key);
            if finalize_at.take().is_some() {
                debug!(?key, "finalize cancelled by key-down");
            }
            return overdue;
        }
        let mut keys = KeySet::default();
        keys.insert(key);
        self.state = ChordState::Accumulating {
            held: keys,
            seen: keys,
            finalize_at: None,
        };
        overdue
    }

    pub fn key_up(&mut self, key: ChordKey, now: Instant) -> Option<ChordEvent> {
        let ChordState::Accumulating { held, finalize_at, .. } = &mut self.state else {
            // Release with nothing accumulated.
            return None;
        };
        held.remove(key);
        if !held.is_empty() {
            return None;
        }
        if self.debounce.is_zero() {
            return self.finalize();
        }
        if finalize_at.is_none() {
            *finalize_at = Some(now + self.debounce);
        }
        None
    }

    /// Fires the armed finalize if its deadline is at or before `now`.
    pub fn poll(&mut self, now: Instant) -> Option<ChordEvent> {
        let due = matches!(
            self.state,
            ChordState::Accumulating { held, finalize_at: Some(deadline), .. }
                if held.is_empty() && deadline <= now
        );
        if due {
            self.finalize()
        } else {
            None
        }
    }

    /// Drops any partial chord.
    pub fn reset(&mut self) {
        self.state = ChordState::Idle;
    }

    fn finalize(&mut self) -> Option<ChordEvent> {
        let ChordState::Accumulating { seen, .. } = std::mem::replace(&mut self.state, ChordState::Idle)
        else {
            return None;
        };
        if seen.is_empty() {
            return None;
        }
        let _span = debug_span!("finalize_chord", cell = %seen.dots).entered();
        let ch = self.codec.char_for_cell(seen.dots).unwrap_or(UNKNOWN_MARKER);
        let event = if ch == ' ' {
            ChordEvent::WordBoundary
        } else {
            ChordEvent::Character { cell: seen.dots, ch }
        };
        debug!(?event, "chord finalized");
        Some(event)
    }
}
