//! Outbound session events consumed by sinks

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::{Candidate, DenialReason, SubscriptionTier, SwipeDirection};

/// Which gated action was attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatedAction {
    Crush,
    Boost,
}

impl std::fmt::Display for GatedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatedAction::Crush => write!(f, "crush"),
            GatedAction::Boost => write!(f, "boost"),
        }
    }
}

/// Something a collaborator outside the session should hear about
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A card left the screen
    Swiped {
        at: DateTime<Utc>,
        candidate: Candidate,
        direction: SwipeDirection,
        /// The swipe came from a granted crush
        via_crush: bool,
    },
    /// A swipe was undone
    Rewound {
        at: DateTime<Utc>,
        candidate_id: String,
    },
    /// A gated action was attempted
    Gated {
        at: DateTime<Utc>,
        action: GatedAction,
        /// Candidate on screen when attempted; none for boosts or an empty queue
        candidate_id: Option<String>,
        granted: bool,
        denial: Option<DenialReason>,
    },
    /// Subscription tier changed and budgets were regranted
    TierChanged {
        at: DateTime<Utc>,
        tier: SubscriptionTier,
        crush_budget: u32,
    },
    /// A new page of candidates arrived
    BatchLoaded {
        at: DateTime<Utc>,
        count: usize,
    },
}

impl SessionEvent {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            SessionEvent::Swiped { at, .. }
            | SessionEvent::Rewound { at, .. }
            | SessionEvent::Gated { at, .. }
            | SessionEvent::TierChanged { at, .. }
            | SessionEvent::BatchLoaded { at, .. } => *at,
        }
    }
}

/// A mutual like
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub candidate_id: String,
    pub name: String,
    /// Matched through a crush rather than a plain like
    pub via_crush: bool,
    pub at: DateTime<Utc>,
}
