//! Discovery: the screen-level owner of a swipe session
//!
//! Applies tier changes, decides entitlement, and reports every outcome to
//! the match ledger and any attached sinks.

use chrono::Utc;
use tracing::debug;
use crate::core::{Entitlements, MatchLedger, SessionSink, SwipeSession};
use crate::types::{
    AdvanceOutcome, BoostOutcome, Candidate, DenialReason, GatedAction, GatedOutcome, Match,
    ReasonCode, RewindOutcome, SessionEvent, SessionOutput, SubscriptionTier, SwipeDirection,
};

/// Boxed sink that can live inside a shared server state
pub type BoxedSink = Box<dyn SessionSink + Send + Sync>;

/// One discovery feed, from screen mount to unmount
#[derive(Debug)]
pub struct Discovery {
    session: SwipeSession,
    tier: SubscriptionTier,
    entitlements: Entitlements,
    boosts_used: u32,
    ledger: MatchLedger,
    sinks: Vec<BoxedSink>,
}

impl Discovery {
    /// Start a feed over `candidates` for a user on `tier`
    pub fn new(candidates: Vec<Candidate>, tier: SubscriptionTier, entitlements: Entitlements) -> Self {
        let mut discovery = Self {
            session: SwipeSession::new(candidates),
            tier,
            entitlements,
            boosts_used: 0,
            ledger: MatchLedger::new(),
            sinks: Vec::new(),
        };
        discovery.apply_tier(tier);
        discovery
    }

    pub fn add_sink(&mut self, sink: BoxedSink) {
        self.sinks.push(sink);
    }

    fn emit(&mut self, event: SessionEvent) {
        self.ledger.on_event(&event);
        for sink in &mut self.sinks {
            sink.on_event(&event);
        }
    }

    fn apply_tier(&mut self, tier: SubscriptionTier) -> u32 {
        let change = self.entitlements.tier_change(tier);
        self.tier = change.tier;
        self.session.reset_budget(change.crush_budget);
        change.crush_budget
    }

    /// Swipe the current card
    pub fn swipe(&mut self, direction: SwipeDirection) -> AdvanceOutcome {
        let outcome = self.session.advance(direction);
        if let AdvanceOutcome::Advanced { candidate, direction } = &outcome {
            self.emit(SessionEvent::Swiped {
                at: Utc::now(),
                candidate: candidate.clone(),
                direction: *direction,
                via_crush: false,
            });
        }
        outcome
    }

    /// Undo the last swipe
    pub fn rewind(&mut self) -> RewindOutcome {
        let outcome = self.session.rewind();
        if let RewindOutcome::Restored { candidate } = &outcome {
            self.emit(SessionEvent::Rewound {
                at: Utc::now(),
                candidate_id: candidate.id.clone(),
            });
        }
        outcome
    }

    /// Send a crush to the current card
    pub fn crush(&mut self) -> GatedOutcome {
        let on_screen = self.session.current().map(|c| c.id.clone());
        let entitled = self.entitlements.crush_entitled(self.tier);
        let outcome = self.session.perform_gated_action(entitled);

        match &outcome {
            GatedOutcome::Granted { candidate } => {
                self.emit(SessionEvent::Gated {
                    at: Utc::now(),
                    action: GatedAction::Crush,
                    candidate_id: Some(candidate.id.clone()),
                    granted: true,
                    denial: None,
                });
                self.emit(SessionEvent::Swiped {
                    at: Utc::now(),
                    candidate: candidate.clone(),
                    direction: SwipeDirection::Right,
                    via_crush: true,
                });
            }
            GatedOutcome::Denied { reason } => {
                self.emit(SessionEvent::Gated {
                    at: Utc::now(),
                    action: GatedAction::Crush,
                    candidate_id: on_screen,
                    granted: false,
                    denial: Some(*reason),
                });
            }
            GatedOutcome::Exhausted => debug!("crush on exhausted queue"),
        }
        outcome
    }

    /// Boost the user's own profile; never moves the queue
    pub fn boost(&mut self) -> BoostOutcome {
        let outcome = if !self.entitlements.boost_entitled(self.tier) {
            BoostOutcome::Denied { reason: DenialReason::NotEntitled }
        } else if self.boosts_remaining() == 0 {
            BoostOutcome::Denied { reason: DenialReason::BudgetExhausted }
        } else {
            self.boosts_used += 1;
            BoostOutcome::Granted
        };

        let denial = match outcome {
            BoostOutcome::Denied { reason } => Some(reason),
            BoostOutcome::Granted => None,
        };
        self.emit(SessionEvent::Gated {
            at: Utc::now(),
            action: GatedAction::Boost,
            candidate_id: None,
            granted: denial.is_none(),
            denial,
        });
        outcome
    }

    /// Subscription changed: regrant the crush budget for the new tier.
    /// Boosts used this session stay used.
    pub fn change_tier(&mut self, tier: SubscriptionTier) {
        let crush_budget = self.apply_tier(tier);
        self.emit(SessionEvent::TierChanged { at: Utc::now(), tier, crush_budget });
    }

    /// Next page of candidates arrived
    pub fn load_batch(&mut self, candidates: Vec<Candidate>) {
        let count = candidates.len();
        self.session.load_batch(candidates);
        self.emit(SessionEvent::BatchLoaded { at: Utc::now(), count });
    }

    pub fn session(&self) -> &SwipeSession {
        &self.session
    }

    pub fn tier(&self) -> SubscriptionTier {
        self.tier
    }

    /// Boosts left this session under the current tier
    pub fn boosts_remaining(&self) -> u32 {
        self.entitlements
            .boost_allowance(self.tier)
            .saturating_sub(self.boosts_used)
    }

    pub fn ledger(&self) -> &MatchLedger {
        &self.ledger
    }

    pub fn matches(&self) -> &[Match] {
        self.ledger.matches()
    }

    /// Display snapshot after an operation that produced `reason`
    pub fn output(&self, reason: ReasonCode) -> SessionOutput {
        SessionOutput {
            timestamp: Utc::now(),
            reason,
            tier: self.tier,
            current: self.session.current().cloned(),
            cursor: self.session.cursor(),
            remaining: self.session.remaining(),
            rewindable: self.session.history_len(),
            crushes_remaining: self.session.action_budget(),
            boosts_remaining: self.boosts_remaining(),
            matches: self.ledger.matches().len(),
        }
    }
}
