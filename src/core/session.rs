//! Swipe Session: queue, cursor, rewind history and crush budget
//!
//! Transitions:
//! - advance: current card → front of history, cursor + 1
//! - rewind: most recent history entry → shown next
//! - perform_gated_action: budget - 1, then advance right
//! - reset_budget: overwrite budget (tier change)
//!
//! Every transition is total. Exhausted queues and empty histories are
//! reported through the returned outcome and leave state untouched.

use std::collections::VecDeque;
use tracing::debug;
use crate::HISTORY_LIMIT;
use crate::types::{
    AdvanceOutcome, Candidate, DenialReason, GatedOutcome, RewindOutcome, SwipeDirection,
};

/// Swipe session state machine
#[derive(Debug, Clone, Default)]
pub struct SwipeSession {
    /// Candidates in display order
    queue: Vec<Candidate>,
    /// Index of the candidate on screen; `cursor <= queue.len()`
    cursor: usize,
    /// Recently swiped, most recent first, at most `HISTORY_LIMIT`
    history: VecDeque<Candidate>,
    /// Crushes left this period
    action_budget: u32,
}

impl SwipeSession {
    /// Create a session over a freshly fetched queue, with no crushes
    pub fn new(queue: Vec<Candidate>) -> Self {
        Self {
            queue,
            cursor: 0,
            history: VecDeque::with_capacity(HISTORY_LIMIT + 1),
            action_budget: 0,
        }
    }

    /// Move the current candidate off screen
    pub fn advance(&mut self, direction: SwipeDirection) -> AdvanceOutcome {
        let Some(candidate) = self.queue.get(self.cursor).cloned() else {
            debug!(cursor = self.cursor, "advance on exhausted queue");
            return AdvanceOutcome::Exhausted;
        };

        self.history.push_front(candidate.clone());
        self.history.truncate(HISTORY_LIMIT);
        self.cursor += 1;

        AdvanceOutcome::Advanced { candidate, direction }
    }

    /// Bring back the most recently swiped candidate as the next one shown
    pub fn rewind(&mut self) -> RewindOutcome {
        let Some(candidate) = self.history.pop_front() else {
            return RewindOutcome::NothingToRewind;
        };

        // Within one batch the swiped card still sits just behind the cursor.
        // After a new batch replaced the queue it has to be put back in.
        let behind = self.cursor.checked_sub(1).and_then(|i| self.queue.get(i));
        if behind.is_some_and(|c| c.id == candidate.id) {
            self.cursor -= 1;
        } else {
            self.queue.insert(self.cursor, candidate.clone());
        }

        RewindOutcome::Restored { candidate }
    }

    /// Attempt a crush: consumes one budget unit and advances right
    pub fn perform_gated_action(&mut self, entitled: bool) -> GatedOutcome {
        if !entitled {
            return GatedOutcome::Denied { reason: DenialReason::NotEntitled };
        }
        if self.action_budget == 0 {
            return GatedOutcome::Denied { reason: DenialReason::BudgetExhausted };
        }
        if self.is_exhausted() {
            return GatedOutcome::Exhausted;
        }

        match self.advance(SwipeDirection::Right) {
            AdvanceOutcome::Advanced { candidate, .. } => {
                self.action_budget -= 1;
                GatedOutcome::Granted { candidate }
            }
            AdvanceOutcome::Exhausted => GatedOutcome::Exhausted,
        }
    }

    /// Overwrite the crush budget (delivered by the tier-change collaborator)
    pub fn reset_budget(&mut self, value: u32) {
        self.action_budget = value;
    }

    /// Accept the next page of candidates.
    ///
    /// Swiped candidates are dropped from the queue; the rewind history is
    /// kept, so a rewind right after a page turn still works.
    pub fn load_batch(&mut self, batch: Vec<Candidate>) {
        self.queue.drain(..self.cursor);
        self.cursor = 0;
        self.queue.extend(batch);
    }

    /// Candidate on screen
    pub fn current(&self) -> Option<&Candidate> {
        self.queue.get(self.cursor)
    }

    /// Candidate after the current one (the card peeking underneath)
    pub fn next(&self) -> Option<&Candidate> {
        self.queue.get(self.cursor + 1)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn queue(&self) -> &[Candidate] {
        &self.queue
    }

    /// Candidates left including the current one
    pub fn remaining(&self) -> usize {
        self.queue.len() - self.cursor
    }

    /// Rewind history, most recent first
    pub fn history(&self) -> impl Iterator<Item = &Candidate> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn action_budget(&self) -> u32 {
        self.action_budget
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.queue.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn deck(ids: &[&str]) -> Vec<Candidate> {
        ids.iter().map(|id| Candidate::new(*id, format!("User {}", id), 25)).collect()
    }

    fn history_ids(session: &SwipeSession) -> Vec<String> {
        session.history().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn test_new_session_shows_first() {
        let session = SwipeSession::new(deck(&["A", "B"]));
        assert_eq!(session.current().map(|c| c.id.as_str()), Some("A"));
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.action_budget(), 0);
        assert_eq!(session.history_len(), 0);
    }

    #[test]
    fn test_advance_moves_cursor_and_records_history() {
        let mut session = SwipeSession::new(deck(&["A", "B", "C"]));

        let outcome = session.advance(SwipeDirection::Left);
        assert_eq!(outcome.candidate().map(|c| c.id.as_str()), Some("A"));
        assert_eq!(session.cursor(), 1);
        assert_eq!(history_ids(&session), vec!["A"]);

        session.advance(SwipeDirection::Right);
        assert_eq!(session.cursor(), 2);
        assert_eq!(history_ids(&session), vec!["B", "A"]);
    }

    #[test]
    fn test_advance_on_exhausted_is_noop() {
        let mut session = SwipeSession::new(deck(&["A"]));
        session.advance(SwipeDirection::Right);

        assert_eq!(session.advance(SwipeDirection::Left), AdvanceOutcome::Exhausted);
        assert_eq!(session.cursor(), 1);
        assert_eq!(session.history_len(), 1);
        assert!(session.is_exhausted());
    }

    #[test]
    fn test_empty_queue_is_exhausted() {
        let mut session = SwipeSession::new(Vec::new());
        assert!(session.is_exhausted());
        assert_eq!(session.advance(SwipeDirection::Right), AdvanceOutcome::Exhausted);
        assert_eq!(session.rewind(), RewindOutcome::NothingToRewind);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut session = SwipeSession::new(deck(&["A", "B", "C", "D", "E", "F", "G"]));
        for _ in 0..7 {
            session.advance(SwipeDirection::Left);
        }
        assert_eq!(session.history_len(), HISTORY_LIMIT);
        assert_eq!(history_ids(&session), vec!["G", "F", "E", "D", "C"]);
    }

    #[test]
    fn test_rewind_restores_last_swiped() {
        let mut session = SwipeSession::new(deck(&["A", "B", "C"]));
        session.advance(SwipeDirection::Left);
        session.advance(SwipeDirection::Right);

        let outcome = session.rewind();
        assert_eq!(outcome.candidate().map(|c| c.id.as_str()), Some("B"));
        assert_eq!(session.current().map(|c| c.id.as_str()), Some("B"));
        assert_eq!(session.cursor(), 1);
        assert_eq!(history_ids(&session), vec!["A"]);
        assert_eq!(session.queue().len(), 3);
    }

    #[test]
    fn test_rewind_empty_history_is_noop() {
        let mut session = SwipeSession::new(deck(&["A"]));
        assert_eq!(session.rewind(), RewindOutcome::NothingToRewind);
        assert_eq!(session.cursor(), 0);
    }

    #[test]
    fn test_rewind_after_exhaustion() {
        let mut session = SwipeSession::new(deck(&["A"]));
        session.advance(SwipeDirection::Left);
        assert!(session.is_exhausted());

        session.rewind();
        assert!(!session.is_exhausted());
        assert_eq!(session.current().map(|c| c.id.as_str()), Some("A"));
    }

    #[test]
    fn test_rewind_across_batch_inserts_at_cursor() {
        let mut session = SwipeSession::new(deck(&["A", "B"]));
        session.advance(SwipeDirection::Left);
        session.advance(SwipeDirection::Right);
        session.load_batch(deck(&["C", "D"]));

        assert_eq!(session.cursor(), 0);
        assert_eq!(session.current().map(|c| c.id.as_str()), Some("C"));

        session.rewind();
        assert_eq!(session.current().map(|c| c.id.as_str()), Some("B"));
        assert_eq!(session.next().map(|c| c.id.as_str()), Some("C"));
        assert_eq!(session.remaining(), 3);
    }

    #[test]
    fn test_gated_not_entitled() {
        let mut session = SwipeSession::new(deck(&["A"]));
        session.reset_budget(2);
        assert_eq!(
            session.perform_gated_action(false),
            GatedOutcome::Denied { reason: DenialReason::NotEntitled }
        );
        assert_eq!(session.action_budget(), 2);
        assert_eq!(session.cursor(), 0);
    }

    #[test]
    fn test_gated_zero_budget_denied() {
        let mut session = SwipeSession::new(deck(&["A"]));
        assert_eq!(
            session.perform_gated_action(true),
            GatedOutcome::Denied { reason: DenialReason::BudgetExhausted }
        );
        assert_eq!(session.action_budget(), 0);
        assert_eq!(session.cursor(), 0);
    }

    #[test]
    fn test_gated_grant_consumes_and_advances() {
        let mut session = SwipeSession::new(deck(&["A", "B"]));
        session.reset_budget(1);

        let outcome = session.perform_gated_action(true);
        assert!(outcome.is_granted());
        assert_eq!(session.action_budget(), 0);
        assert_eq!(session.cursor(), 1);
        assert_eq!(history_ids(&session), vec!["A"]);
    }

    #[test]
    fn test_gated_on_exhausted_keeps_budget() {
        let mut session = SwipeSession::new(Vec::new());
        session.reset_budget(2);
        assert_eq!(session.perform_gated_action(true), GatedOutcome::Exhausted);
        assert_eq!(session.action_budget(), 2);
    }

    #[test]
    fn test_reset_budget_overwrites() {
        let mut session = SwipeSession::new(Vec::new());
        session.reset_budget(5);
        session.reset_budget(1);
        assert_eq!(session.action_budget(), 1);
    }

    #[test]
    fn test_load_batch_drops_consumed_prefix() {
        let mut session = SwipeSession::new(deck(&["A", "B", "C"]));
        session.advance(SwipeDirection::Left);
        session.load_batch(deck(&["D"]));

        let ids: Vec<&str> = session.queue().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "C", "D"]);
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.history_len(), 1);
    }
}
