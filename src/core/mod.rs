//! Core modules for Swipedeck

pub mod session;
pub mod entitlements;
pub mod notify;
pub mod discovery;
pub mod deck;
pub mod command;
pub mod api;

pub use session::SwipeSession;
pub use entitlements::{Entitlements, TierBudgets, TierChange};
pub use notify::{SessionSink, MatchLedger, TracingSink, EventLog};
pub use discovery::{Discovery, BoxedSink};
pub use deck::{load_deck, parse_deck, validate_deck, sample_deck};
pub use command::{Command, HELP};
pub use api::{create_router, run_server};
