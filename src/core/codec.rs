use crate::core::types::{BrailleCell, UNKNOWN_MARKER};

/// Separates cells inside one word.
pub const CELL_SEPARATOR: &str = " ";
/// Separates words in a cell pattern (the empty separator cell between two single spaces).
pub const WORD_SEPARATOR: &str = "  ";

/// Grade-1 English letters plus the separator cell, as `(canonical cell, char)`.
pub const CODEC_TABLE: [(&str, char); 27] = [
    ("1", 'a'), ("12", 'b'), ("14", 'c'), ("145", 'd'), ("15", 'e'),
    ("124", 'f'), ("1245", 'g'), ("125", 'h'), ("24", 'i'), ("245", 'j'),
    ("13", 'k'), ("123", 'l'), ("134", 'm'), ("1345", 'n'), ("135", 'o'),
    ("1234", 'p'), ("12345", 'q'), ("1235", 'r'), ("234", 's'), ("2345", 't'),
    ("136", 'u'), ("1236", 'v'), ("2456", 'w'), ("1346", 'x'), ("13456", 'y'),
    ("1356", 'z'), ("", ' '),
];

/// Bidirectional mapping between Braille cells and characters.
///
/// Stateless; every lookup failure degrades to [`UNKNOWN_MARKER`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BrailleCodec;

impl BrailleCodec {
    pub fn new() -> Self {
        Self
    }

    pub fn cell_for_char(&self, ch: char) -> Option<BrailleCell> {
        let lower = ch.to_lowercase().next().unwrap_or(ch);
        CODEC_TABLE
            .iter()
            .find(|(_, c)| *c == lower)
            .and_then(|(cell, _)| BrailleCell::parse_canonical(cell))
    }

    pub fn char_for_cell(&self, cell: BrailleCell) -> Option<char> {
        let canonical = cell.canonical();
        CODEC_TABLE
            .iter()
            .find(|(c, _)| *c == canonical)
            .map(|(_, ch)| *ch)
    }

    /// Canonical cell string for `ch`, or `"?"`.
    pub fn encode_char(&self, ch: char) -> String {
        match self.cell_for_char(ch) {
            Some(cell) => cell.canonical(),
            None => UNKNOWN_MARKER.to_string(),
        }
    }

    /// Character for a canonical cell string, or `'?'` (malformed strings included).
    pub fn decode_cell(&self, cell: &str) -> char {
        BrailleCell::parse_canonical(cell)
            .and_then(|cell| self.char_for_cell(cell))
            .unwrap_or(UNKNOWN_MARKER)
    }

    /// Encodes each character and joins the cells with a single space.
    /// A space in `word` becomes the empty cell, so words end up separated by two spaces.
    pub fn encode_word(&self, word: &str) -> String {
        word.chars()
            .map(|c| self.encode_char(c))
            .collect::<Vec<_>>()
            .join(CELL_SEPARATOR)
    }

    pub fn decode_word(&self, pattern: &str) -> String {
        if pattern.is_empty() {
            return String::new();
        }
        pattern
            .split(WORD_SEPARATOR)
            .map(|word| {
                word.split(CELL_SEPARATOR)
                    .map(|token| self.decode_cell(token))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
