// File: src/error.rs
use std::io;

/// Failures at the engine's edges: configuration and lexicon snapshots.
/// Core lookups never produce these.
#[derive(Debug, thiserror::Error)]
pub enum ImeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("lexicon snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("not a lexicon snapshot (bad magic)")]
    BadMagic,
    #[error("invalid key bindings: {0}")]
    InvalidKeyBindings(String),
    #[error("snapshot version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u8, expected: u8 },
}
