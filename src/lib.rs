//! Swipedeck: discovery-feed swipe session engine
//!
//! SwipeSession (queue + cursor + rewind history + crush budget) driven by
//! Discovery, which applies tier changes and fans events out to sinks.

pub mod config;
pub mod core;
pub mod error;
pub mod types;

// =============================================================================
// SESSION LIMITS
// =============================================================================

/// Maximum number of recently swiped candidates kept for rewind
pub const HISTORY_LIMIT: usize = 5;

/// Profile boosts allowed per discovery session (entitled tiers only)
pub const BOOSTS_PER_SESSION: u32 = 1;

// =============================================================================
// DEFAULT CRUSH BUDGETS - per subscription tier
// =============================================================================

/// Free tier gets no crushes
pub const DEFAULT_FREE_CRUSHES: u32 = 0;

/// Plus tier crushes per period
pub const DEFAULT_PLUS_CRUSHES: u32 = 2;

/// Sapphire tier crushes per period
pub const DEFAULT_SAPPHIRE_CRUSHES: u32 = 2;

// =============================================================================
// SERVER
// =============================================================================

/// Default bind address for `--serve`
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
