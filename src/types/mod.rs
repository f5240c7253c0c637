//! Core types for Swipedeck

mod candidate;
mod direction;
mod tier;
mod reason;
mod outcome;
mod event;
mod output;

pub use candidate::Candidate;
pub use direction::SwipeDirection;
pub use tier::{SubscriptionTier, Feature};
pub use reason::ReasonCode;
pub use outcome::{AdvanceOutcome, RewindOutcome, GatedOutcome, BoostOutcome, DenialReason};
pub use event::{SessionEvent, GatedAction, Match};
pub use output::SessionOutput;
