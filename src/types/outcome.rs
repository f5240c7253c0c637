//! Outcomes of session transitions
//!
//! Every transition is total: conditions like an exhausted queue or an empty
//! history come back as variants here so the UI can render them directly.

use serde::{Deserialize, Serialize};
use crate::types::{Candidate, ReasonCode, SwipeDirection};

/// Result of `advance`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AdvanceOutcome {
    /// Candidate left the screen and went into the rewind history
    Advanced {
        candidate: Candidate,
        direction: SwipeDirection,
    },
    /// No candidate at the cursor; nothing changed
    Exhausted,
}

impl AdvanceOutcome {
    pub fn reason(&self) -> ReasonCode {
        match self {
            AdvanceOutcome::Advanced { direction: SwipeDirection::Left, .. } => ReasonCode::D001_PASSED,
            AdvanceOutcome::Advanced { direction: SwipeDirection::Right, .. } => ReasonCode::D001_LIKED,
            AdvanceOutcome::Exhausted => ReasonCode::D001_EXHAUSTED,
        }
    }

    pub fn candidate(&self) -> Option<&Candidate> {
        match self {
            AdvanceOutcome::Advanced { candidate, .. } => Some(candidate),
            AdvanceOutcome::Exhausted => None,
        }
    }
}

/// Result of `rewind`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RewindOutcome {
    /// Candidate is back and shown next
    Restored { candidate: Candidate },
    /// History was empty; nothing changed
    NothingToRewind,
}

impl RewindOutcome {
    pub fn reason(&self) -> ReasonCode {
        match self {
            RewindOutcome::Restored { .. } => ReasonCode::D002_REWOUND,
            RewindOutcome::NothingToRewind => ReasonCode::D002_NOTHING_TO_REWIND,
        }
    }

    pub fn candidate(&self) -> Option<&Candidate> {
        match self {
            RewindOutcome::Restored { candidate } => Some(candidate),
            RewindOutcome::NothingToRewind => None,
        }
    }
}

/// Why a gated action was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// Tier does not include the action; route to upsell
    NotEntitled,
    /// Entitled but nothing left this period
    BudgetExhausted,
}

impl DenialReason {
    pub fn reason(&self) -> ReasonCode {
        match self {
            DenialReason::NotEntitled => ReasonCode::D003_NOT_ENTITLED,
            DenialReason::BudgetExhausted => ReasonCode::D003_BUDGET_EXHAUSTED,
        }
    }
}

/// Result of a crush
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GatedOutcome {
    /// Budget consumed and the candidate advanced to the right
    Granted { candidate: Candidate },
    /// Refused; nothing changed
    Denied { reason: DenialReason },
    /// Allowed, but no candidate to act on; budget untouched
    Exhausted,
}

impl GatedOutcome {
    pub fn reason(&self) -> ReasonCode {
        match self {
            GatedOutcome::Granted { .. } => ReasonCode::D003_CRUSH_GRANTED,
            GatedOutcome::Denied { reason } => reason.reason(),
            GatedOutcome::Exhausted => ReasonCode::D001_EXHAUSTED,
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, GatedOutcome::Granted { .. })
    }
}

/// Result of a profile boost. Boosts never touch the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BoostOutcome {
    Granted,
    Denied { reason: DenialReason },
}

impl BoostOutcome {
    pub fn reason(&self) -> ReasonCode {
        match self {
            BoostOutcome::Granted => ReasonCode::D003_BOOST_GRANTED,
            BoostOutcome::Denied { reason } => reason.reason(),
        }
    }
}
