//! Output structures for terminal display and API responses

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use crate::types::{Candidate, ReasonCode, SubscriptionTier};

/// Snapshot of a discovery session after an operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionOutput {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// What just happened
    pub reason: ReasonCode,
    /// Current subscription tier
    pub tier: SubscriptionTier,
    /// Candidate now on screen
    pub current: Option<Candidate>,
    /// Cursor into the queue
    pub cursor: usize,
    /// Candidates left including the current one
    pub remaining: usize,
    /// Swipes that can be rewound
    pub rewindable: usize,
    /// Crushes left this period
    pub crushes_remaining: u32,
    /// Boosts left this session
    pub boosts_remaining: u32,
    /// Mutual matches so far
    pub matches: usize,
}

impl SessionOutput {
    /// Is the queue exhausted?
    pub fn exhausted(&self) -> bool {
        self.current.is_none()
    }

    fn paint(&self, text: &str) -> ColoredString {
        match self.reason {
            ReasonCode::D001_LIKED | ReasonCode::D005_MATCHED => text.green(),
            ReasonCode::D001_PASSED => text.red(),
            ReasonCode::D003_CRUSH_GRANTED | ReasonCode::D003_BOOST_GRANTED => text.yellow().bold(),
            ReasonCode::D003_NOT_ENTITLED => text.magenta(),
            ReasonCode::D003_BUDGET_EXHAUSTED => text.yellow(),
            ReasonCode::D002_REWOUND => text.cyan(),
            ReasonCode::D001_EXHAUSTED | ReasonCode::D002_NOTHING_TO_REWIND => text.bright_black(),
            _ => text.normal(),
        }
    }

    fn showing(&self) -> String {
        self.current
            .as_ref()
            .map(|c| c.summary())
            .unwrap_or_else(|| "-".to_string())
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let line = format!(
            "{} | now={} | left={} | undo={} | crushes={} | {}",
            self.reason.description(),
            self.showing(),
            self.remaining,
            self.rewindable,
            self.crushes_remaining,
            self.reason.code(),
        );
        self.paint(&line).to_string()
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "reason={} | tier={} | current={} | cursor={} | remaining={} | rewindable={} | crushes={} | boosts={} | matches={}",
            self.reason.code(),
            self.tier,
            self.current.as_ref().map(|c| c.id.as_str()).unwrap_or("-"),
            self.cursor,
            self.remaining,
            self.rewindable,
            self.crushes_remaining,
            self.boosts_remaining,
            self.matches,
        )
    }
}
