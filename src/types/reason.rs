//! Reason codes for every session outcome
//! Grouped by the operation that produces them

use serde::{Deserialize, Serialize};

/// Reason codes for swipes, rewinds, gated actions and session events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // D001: Advance
    // =========================================================================
    /// Candidate swiped left
    D001_PASSED,
    /// Candidate swiped right
    D001_LIKED,
    /// No candidates left to swipe
    D001_EXHAUSTED,

    // =========================================================================
    // D002: Rewind
    // =========================================================================
    /// Last swiped candidate restored
    D002_REWOUND,
    /// History empty, nothing restored
    D002_NOTHING_TO_REWIND,

    // =========================================================================
    // D003: Gated actions
    // =========================================================================
    /// Crush sent, budget consumed
    D003_CRUSH_GRANTED,
    /// Boost activated
    D003_BOOST_GRANTED,
    /// Tier does not include this action
    D003_NOT_ENTITLED,
    /// Entitled, but no uses left this period
    D003_BUDGET_EXHAUSTED,

    // =========================================================================
    // D004: Session inputs
    // =========================================================================
    /// Session started
    D004_SESSION_STARTED,
    /// Tier changed, budgets regranted
    D004_TIER_CHANGED,
    /// New batch of candidates supplied
    D004_BATCH_LOADED,
    /// Status query, nothing changed
    D004_STATUS,

    // =========================================================================
    // D005: Matching
    // =========================================================================
    /// Like was mutual
    D005_MATCHED,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::D001_PASSED => "D001_PASSED",
            Self::D001_LIKED => "D001_LIKED",
            Self::D001_EXHAUSTED => "D001_EXHAUSTED",
            Self::D002_REWOUND => "D002_REWOUND",
            Self::D002_NOTHING_TO_REWIND => "D002_NOTHING_TO_REWIND",
            Self::D003_CRUSH_GRANTED => "D003_CRUSH_GRANTED",
            Self::D003_BOOST_GRANTED => "D003_BOOST_GRANTED",
            Self::D003_NOT_ENTITLED => "D003_NOT_ENTITLED",
            Self::D003_BUDGET_EXHAUSTED => "D003_BUDGET_EXHAUSTED",
            Self::D004_SESSION_STARTED => "D004_SESSION_STARTED",
            Self::D004_TIER_CHANGED => "D004_TIER_CHANGED",
            Self::D004_BATCH_LOADED => "D004_BATCH_LOADED",
            Self::D004_STATUS => "D004_STATUS",
            Self::D005_MATCHED => "D005_MATCHED",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::D001_PASSED => "Passed",
            Self::D001_LIKED => "Liked",
            Self::D001_EXHAUSTED => "No more profiles to show",
            Self::D002_REWOUND => "Brought back last profile",
            Self::D002_NOTHING_TO_REWIND => "Nothing to rewind",
            Self::D003_CRUSH_GRANTED => "Crush sent",
            Self::D003_BOOST_GRANTED => "Profile boosted",
            Self::D003_NOT_ENTITLED => "Upgrade to unlock",
            Self::D003_BUDGET_EXHAUSTED => "All used up, come back tomorrow",
            Self::D004_SESSION_STARTED => "Discovery started",
            Self::D004_TIER_CHANGED => "Subscription changed",
            Self::D004_BATCH_LOADED => "New profiles loaded",
            Self::D004_STATUS => "Status",
            Self::D005_MATCHED => "It's a match!",
        }
    }

    /// Denials that should route the user to the upgrade screen
    pub fn is_upsell(&self) -> bool {
        matches!(self, Self::D003_NOT_ENTITLED)
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
