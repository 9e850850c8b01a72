// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// The character produced for any cell or character the codec cannot map.
pub const UNKNOWN_MARKER: char = '?';

/// One of the six dots of a Braille cell, numbered 1 through 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Dot(u8);

impl Dot {
    pub const ALL: [Dot; 6] = [Dot(1), Dot(2), Dot(3), Dot(4), Dot(5), Dot(6)];

    pub fn new(number: u8) -> Option<Self> {
        (1..=6).contains(&number).then_some(Self(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    fn bit(self) -> u8 {
        1 << (self.0 - 1)
    }
}

impl TryFrom<u8> for Dot {
    type Error = String;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Dot::new(number).ok_or_else(|| format!("dot number out of range: {number}"))
    }
}

impl From<Dot> for u8 {
    fn from(dot: Dot) -> u8 {
        dot.0
    }
}

/// An unordered set of dots. The empty cell is the word separator.
///
/// Stored as a 6-bit mask, so the canonical ascending form falls out of
/// iterating the bits low to high.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BrailleCell(u8);

impl BrailleCell {
    pub const EMPTY: BrailleCell = BrailleCell(0);

    pub fn from_dots<I: IntoIterator<Item = Dot>>(dots: I) -> Self {
        let mut cell = Self::EMPTY;
        for dot in dots {
            cell.insert(dot);
        }
        cell
    }

    pub fn insert(&mut self, dot: Dot) {
        self.0 |= dot.bit();
    }

    pub fn remove(&mut self, dot: Dot) {
        self.0 &= !dot.bit();
    }

    pub fn contains(self, dot: Dot) -> bool {
        self.0 & dot.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn dots(self) -> impl Iterator<Item = Dot> {
        Dot::ALL.into_iter().filter(move |dot| self.contains(*dot))
    }

    /// Parses the canonical form: strictly ascending digits 1-6, no separators.
    /// Anything else (repeats, descending order, other characters) is rejected.
    pub fn parse_canonical(s: &str) -> Option<Self> {
        let mut cell = Self::EMPTY;
        let mut last = 0u8;
        for c in s.chars() {
            let number = c.to_digit(10)? as u8;
            if number <= last {
                return None;
            }
            cell.insert(Dot::new(number)?);
            last = number;
        }
        Some(cell)
    }

    pub fn canonical(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BrailleCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for dot in self.dots() {
            write!(f, "{}", dot.number())?;
        }
        Ok(())
    }
}

/// What a recognized input key contributes to a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordKey {
    Dot(Dot),
    /// The space bar: participates in a chord without adding a dot.
    Space,
}

/// Result of a finalized chord.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChordEvent {
    /// A non-separator cell, decoded through the codec (possibly to the unknown marker).
    Character { cell: BrailleCell, ch: char },
    /// The separator cell: ends the in-progress word.
    WordBoundary,
}

/// Everything a presentation layer needs after one key event.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyResponse {
    /// Dots currently held down.
    pub live_dots: BrailleCell,
    /// What the held dots would decode to right now; `None` when nothing is held.
    pub preview: Option<char>,
    /// Chords finalized by this event, oldest first.
    pub events: Vec<ChordEvent>,
    /// Refreshed suggestions, present only when an event changed the in-progress word.
    pub suggestions: Option<Vec<String>>,
}

/// A scored fuzzy hit. Recomputed per query, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCandidate {
    pub word: String,
    pub edit_distance: usize,
    pub score: u32,
}
