// File: src/config.rs
use crate::core::chord::DEFAULT_DEBOUNCE;
use crate::core::types::{ChordKey, Dot};
use crate::error::ImeError;
use crate::fuzzy::levenshtein::DEFAULT_HISTORY_BOOST;
use crate::learning::{DEFAULT_HISTORY_CAPACITY, MAX_HISTORY_CAPACITY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Maps physical key characters to chord keys. Lookups ignore case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings(BTreeMap<char, ChordKey>);

impl Default for KeyBindings {
    /// D W Q K O P for dots 1-6, space bar for the separator.
    fn default() -> Self {
        let mut map = BTreeMap::new();
        for (key, number) in [('d', 1), ('w', 2), ('q', 3), ('k', 4), ('o', 5), ('p', 6)] {
            if let Some(dot) = Dot::new(number) {
                map.insert(key, ChordKey::Dot(dot));
            }
        }
        map.insert(' ', ChordKey::Space);
        Self(map)
    }
}

impl KeyBindings {
    pub fn new<I: IntoIterator<Item = (char, ChordKey)>>(bindings: I) -> Result<Self, ImeError> {
        let map = bindings
            .into_iter()
            .map(|(key, chord)| (lower(key), chord))
            .collect();
        let bindings = Self(map);
        bindings.validate()?;
        Ok(bindings)
    }

    pub fn resolve(&self, key: char) -> Option<ChordKey> {
        self.0.get(&lower(key)).copied()
    }

    /// The key bound to `chord`, for help text.
    pub fn key_for(&self, chord: ChordKey) -> Option<char> {
        self.0
            .iter()
            .find(|(_, bound)| **bound == chord)
            .map(|(key, _)| *key)
    }

    /// Each dot bound exactly once, at most one space key.
    pub fn validate(&self) -> Result<(), ImeError> {
        for dot in Dot::ALL {
            let count = self.0.values().filter(|c| **c == ChordKey::Dot(dot)).count();
            if count != 1 {
                return Err(ImeError::InvalidKeyBindings(format!(
                    "dot {} is bound {count} times",
                    dot.number()
                )));
            }
        }
        if self.0.values().filter(|c| **c == ChordKey::Space).count() > 1 {
            return Err(ImeError::InvalidKeyBindings("more than one space key".into()));
        }
        if self.0.keys().any(|k| k.is_uppercase()) {
            return Err(ImeError::InvalidKeyBindings("keys must be lowercase".into()));
        }
        Ok(())
    }
}

fn lower(key: char) -> char {
    key.to_lowercase().next().unwrap_or(key)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub suggestion_limit: usize,
    pub history_capacity: usize,
    pub history_boost: u32,
    pub debounce_ms: u64,
    pub key_bindings: KeyBindings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            suggestion_limit: 5,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            history_boost: DEFAULT_HISTORY_BOOST,
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            key_bindings: KeyBindings::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ImeError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ImeError> {
        if self.history_capacity > MAX_HISTORY_CAPACITY {
            return Err(ImeError::InvalidConfig(format!(
                "history_capacity {} exceeds {MAX_HISTORY_CAPACITY}",
                self.history_capacity
            )));
        }
        self.key_bindings.validate()
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ImeError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
