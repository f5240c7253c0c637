//! Event sinks: where swipes and gated-action attempts get reported

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, debug_span, info};
use crate::types::{GatedAction, Match, SessionEvent};

/// Receiver of session events
pub trait SessionSink: std::fmt::Debug {
    fn on_event(&mut self, event: &SessionEvent);
}

/// In-memory like/pass bookkeeping with mutual-match detection
#[derive(Debug, Default)]
pub struct MatchLedger {
    liked: HashSet<String>,
    passed: HashSet<String>,
    crushed: Vec<String>,
    matches: Vec<Match>,
}

impl MatchLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_liked(&self, candidate_id: &str) -> bool {
        self.liked.contains(candidate_id)
    }

    pub fn has_passed(&self, candidate_id: &str) -> bool {
        self.passed.contains(candidate_id)
    }

    /// Candidates crushed on, in order; each appears once even if crushed again after a rewind
    pub fn crushes(&self) -> &[String] {
        &self.crushed
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Most recent match, if the last like created one
    pub fn last_match(&self) -> Option<&Match> {
        self.matches.last()
    }

    fn is_matched(&self, candidate_id: &str) -> bool {
        self.matches.iter().any(|m| m.candidate_id == candidate_id)
    }
}

impl SessionSink for MatchLedger {
    fn on_event(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::Swiped { at, candidate, direction, via_crush } => {
                let id = candidate.id.clone();
                if direction.is_like() {
                    self.passed.remove(&id);
                    self.liked.insert(id.clone());
                    if *via_crush && !self.crushed.contains(&id) {
                        self.crushed.push(id.clone());
                    }
                    if candidate.likes_you && !self.is_matched(&id) {
                        self.matches.push(Match {
                            candidate_id: id,
                            name: candidate.name.clone(),
                            via_crush: *via_crush,
                            at: *at,
                        });
                    }
                } else {
                    self.liked.remove(&id);
                    self.passed.insert(id);
                }
            }
            // Matches stay: the other side has already been told
            SessionEvent::Rewound { candidate_id, .. } => {
                self.liked.remove(candidate_id);
                self.passed.remove(candidate_id);
            }
            _ => {}
        }
    }
}

/// Logs every event
#[derive(Debug, Default)]
pub struct TracingSink;

impl SessionSink for TracingSink {
    fn on_event(&mut self, event: &SessionEvent) {
        let _span = debug_span!("session_event", at = %event.at()).entered();
        match event {
            SessionEvent::Swiped { candidate, direction, via_crush, .. } => {
                info!(candidate = %candidate.id, %direction, via_crush, "swiped");
            }
            SessionEvent::Rewound { candidate_id, .. } => {
                info!(candidate = %candidate_id, "rewound");
            }
            SessionEvent::Gated { action, candidate_id, granted: true, .. } => {
                info!(%action, candidate = ?candidate_id, "gated action granted");
            }
            SessionEvent::Gated { action, candidate_id, denial, .. } => {
                debug!(%action, candidate = ?candidate_id, ?denial, "gated action denied");
            }
            SessionEvent::TierChanged { tier, crush_budget, .. } => {
                info!(%tier, crush_budget, "tier changed");
            }
            SessionEvent::BatchLoaded { count, .. } => {
                debug!(count, "batch loaded");
            }
        }
    }
}

/// Keeps every event; handy for tests and replay
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SessionEvent>,
}

impl EventLog {
    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    pub fn gated(&self, action: GatedAction) -> impl Iterator<Item = &SessionEvent> {
        self.events
            .iter()
            .filter(move |e| matches!(e, SessionEvent::Gated { action: a, .. } if *a == action))
    }
}

impl SessionSink for EventLog {
    fn on_event(&mut self, event: &SessionEvent) {
        self.events.push(event.clone());
    }
}

/// Shared sink: lets the owner keep a handle while the session reports into it.
/// A poisoned lock still receives the event.
impl<S: SessionSink> SessionSink for Arc<Mutex<S>> {
    fn on_event(&mut self, event: &SessionEvent) {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::types::{Candidate, SwipeDirection};

    fn swiped(candidate: Candidate, direction: SwipeDirection, via_crush: bool) -> SessionEvent {
        SessionEvent::Swiped { at: Utc::now(), candidate, direction, via_crush }
    }

    #[test]
    fn test_like_on_mutual_creates_match() {
        let mut ledger = MatchLedger::new();
        ledger.on_event(&swiped(Candidate::new("1", "Aisha", 27).liking_you(), SwipeDirection::Right, false));
        ledger.on_event(&swiped(Candidate::new("2", "Fatima", 25), SwipeDirection::Right, false));

        assert_eq!(ledger.matches().len(), 1);
        assert_eq!(ledger.matches()[0].candidate_id, "1");
        assert!(ledger.has_liked("2"));
    }

    #[test]
    fn test_pass_never_matches() {
        let mut ledger = MatchLedger::new();
        ledger.on_event(&swiped(Candidate::new("1", "Aisha", 27).liking_you(), SwipeDirection::Left, false));
        assert!(ledger.matches().is_empty());
        assert!(ledger.has_passed("1"));
    }

    #[test]
    fn test_rewind_clears_decision_but_keeps_match() {
        let mut ledger = MatchLedger::new();
        ledger.on_event(&swiped(Candidate::new("1", "Aisha", 27).liking_you(), SwipeDirection::Right, false));
        ledger.on_event(&SessionEvent::Rewound { at: Utc::now(), candidate_id: "1".into() });

        assert!(!ledger.has_liked("1"));
        assert_eq!(ledger.matches().len(), 1);

        // liking again does not duplicate the match
        ledger.on_event(&swiped(Candidate::new("1", "Aisha", 27).liking_you(), SwipeDirection::Right, false));
        assert_eq!(ledger.matches().len(), 1);
    }

    #[test]
    fn test_crush_recorded() {
        let mut ledger = MatchLedger::new();
        ledger.on_event(&swiped(Candidate::new("3", "Maryam", 29).liking_you(), SwipeDirection::Right, true));
        assert_eq!(ledger.crushes(), ["3".to_string()]);
        assert!(ledger.last_match().is_some_and(|m| m.via_crush));
    }

    #[test]
    fn test_crush_again_after_rewind_recorded_once() {
        let mut ledger = MatchLedger::new();
        let maryam = Candidate::new("3", "Maryam", 29);
        ledger.on_event(&swiped(maryam.clone(), SwipeDirection::Right, true));
        ledger.on_event(&SessionEvent::Rewound { at: Utc::now(), candidate_id: "3".into() });
        ledger.on_event(&swiped(maryam, SwipeDirection::Right, true));

        assert_eq!(ledger.crushes(), ["3".to_string()]);
        assert!(ledger.has_liked("3"));
    }

    #[test]
    fn test_poisoned_shared_sink_still_records() {
        let log = Arc::new(Mutex::new(EventLog::default()));
        let poisoner = log.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("sink holder died");
        })
        .join();
        assert!(log.is_poisoned());

        let mut sink = log.clone();
        sink.on_event(&SessionEvent::BatchLoaded { at: Utc::now(), count: 2 });

        let log = log.lock().unwrap_or_else(PoisonError::into_inner);
        assert_eq!(log.events().len(), 1);
    }
}
