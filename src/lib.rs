// src/lib.rs

pub mod c_api;
pub mod config;
pub mod core;
pub mod error;
pub mod fuzzy;
pub mod learning;
pub mod persistence;
pub mod trace_init;

pub use crate::config::EngineConfig;
pub use crate::core::engine::BrailleEngine;
pub use crate::core::lexicon::Lexicon;
pub use crate::error::ImeError;
