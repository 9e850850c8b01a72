pub mod chord;
pub mod codec;
pub mod engine;
pub mod lexicon;
pub mod ranker;
pub mod trie;
pub mod types;

#[cfg(test)]
mod tests;
