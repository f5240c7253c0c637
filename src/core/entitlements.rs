//! Entitlements: tier → crush budget mapping and feature gates
//!
//! Lives outside the session. The session only ever sees the numbers this
//! produces, through `reset_budget`.

use serde::{Deserialize, Serialize};
use crate::{BOOSTS_PER_SESSION, DEFAULT_FREE_CRUSHES, DEFAULT_PLUS_CRUSHES, DEFAULT_SAPPHIRE_CRUSHES};
use crate::types::{Feature, SubscriptionTier};

/// Crushes granted per tier per period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierBudgets {
    pub free: u32,
    pub plus: u32,
    pub sapphire: u32,
}

impl Default for TierBudgets {
    fn default() -> Self {
        Self {
            free: DEFAULT_FREE_CRUSHES,
            plus: DEFAULT_PLUS_CRUSHES,
            sapphire: DEFAULT_SAPPHIRE_CRUSHES,
        }
    }
}

/// A tier change, ready to be applied to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierChange {
    pub tier: SubscriptionTier,
    pub crush_budget: u32,
    /// Boosts this tier allows per session. Boosts already used are not refunded.
    pub boost_allowance: u32,
}

/// Decides what each tier may do
#[derive(Debug, Clone, Copy, Default)]
pub struct Entitlements {
    budgets: TierBudgets,
}

impl Entitlements {
    pub fn new(budgets: TierBudgets) -> Self {
        Self { budgets }
    }

    /// Crush allowance for a tier
    pub fn budget_for(&self, tier: SubscriptionTier) -> u32 {
        match tier {
            SubscriptionTier::Free => self.budgets.free,
            SubscriptionTier::Plus => self.budgets.plus,
            SubscriptionTier::Sapphire => self.budgets.sapphire,
        }
    }

    /// Crushes are a premium action
    pub fn crush_entitled(&self, tier: SubscriptionTier) -> bool {
        tier.is_premium()
    }

    pub fn boost_entitled(&self, tier: SubscriptionTier) -> bool {
        tier.has_feature(Feature::Boost)
    }

    /// Budgets to deliver when the user moves to `tier`
    pub fn tier_change(&self, tier: SubscriptionTier) -> TierChange {
        TierChange {
            tier,
            crush_budget: self.budget_for(tier),
            boost_allowance: self.boost_allowance(tier),
        }
    }

    /// Boosts per session for a tier
    pub fn boost_allowance(&self, tier: SubscriptionTier) -> u32 {
        if self.boost_entitled(tier) { BOOSTS_PER_SESSION } else { 0 }
    }
}
