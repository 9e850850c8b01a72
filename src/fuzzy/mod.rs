pub mod levenshtein;

pub use levenshtein::{distance, FuzzyMatcher};
