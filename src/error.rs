//! Error types for infrastructure failures
//!
//! Swipe outcomes (exhausted, nothing to rewind, denied) are never errors;
//! they live in `types::outcome`. These enums cover loading decks and config.

use std::path::PathBuf;
use thiserror::Error;

/// Failure loading or validating a candidate deck.
#[derive(Debug, Error)]
pub enum DeckError {
    /// Deck file could not be read.
    #[error("failed to read deck {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Deck contents are not a JSON array of candidates.
    #[error("invalid deck JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two candidates share an id.
    #[error("duplicate candidate id {0:?}")]
    DuplicateId(String),

    /// A candidate has an empty id.
    #[error("candidate at position {0} has an empty id")]
    EmptyId(usize),
}

/// Failure loading the TOML config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Unknown subscription tier name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown subscription tier {0:?} (expected free, plus or sapphire)")]
pub struct TierParseError(pub String);

/// Unknown swipe direction name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown swipe direction {0:?} (expected left or right)")]
pub struct DirectionParseError(pub String);
