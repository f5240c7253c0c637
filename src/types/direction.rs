//! Swipe direction

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use crate::error::DirectionParseError;

/// Which way a card left the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    /// Reject
    Left,
    /// Like
    Right,
}

impl SwipeDirection {
    pub fn is_like(&self) -> bool {
        matches!(self, SwipeDirection::Right)
    }
}

impl std::fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SwipeDirection::Left => "LEFT",
            SwipeDirection::Right => "RIGHT",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for SwipeDirection {
    type Err = DirectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" | "pass" | "nope" => Ok(SwipeDirection::Left),
            "right" | "r" | "like" => Ok(SwipeDirection::Right),
            _ => Err(DirectionParseError(s.to_string())),
        }
    }
}
