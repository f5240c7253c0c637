//! Subscription tiers and the features each plan unlocks

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use crate::error::TierParseError;

/// Subscription tier of the current user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionTier {
    #[default]
    #[serde(alias = "free")]
    Free,
    #[serde(alias = "plus")]
    Plus,
    #[serde(alias = "sapphire")]
    Sapphire,
}

/// Premium features sold by the paid plans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// No daily limit on profiles viewed
    UnlimitedSwipes,
    /// Go back to recently swiped profiles
    Rewind,
    /// Extra profile visibility
    Boost,
    /// Browse without leaving visits
    StealthMode,
    /// See profiles that already liked you
    SeeWhoLikesYou,
    /// Message without matching first
    MessageBeforeMatch,
}

const PLUS_FEATURES: &[Feature] = &[
    Feature::UnlimitedSwipes,
    Feature::Rewind,
    Feature::Boost,
    Feature::StealthMode,
];

const SAPPHIRE_FEATURES: &[Feature] = &[
    Feature::UnlimitedSwipes,
    Feature::Rewind,
    Feature::Boost,
    Feature::StealthMode,
    Feature::SeeWhoLikesYou,
    Feature::MessageBeforeMatch,
];

impl SubscriptionTier {
    /// Any paid tier
    pub fn is_premium(&self) -> bool {
        !matches!(self, SubscriptionTier::Free)
    }

    /// Features included in this tier's plan
    pub fn features(&self) -> &'static [Feature] {
        match self {
            SubscriptionTier::Free => &[],
            SubscriptionTier::Plus => PLUS_FEATURES,
            SubscriptionTier::Sapphire => SAPPHIRE_FEATURES,
        }
    }

    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features().contains(&feature)
    }

    /// Plan name shown to users
    pub fn plan_name(&self) -> &'static str {
        match self {
            SubscriptionTier::Free => "Free",
            SubscriptionTier::Plus => "Naseebi Plus",
            SubscriptionTier::Sapphire => "Naseebi Sapphire",
        }
    }
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SubscriptionTier::Free => "FREE",
            SubscriptionTier::Plus => "PLUS",
            SubscriptionTier::Sapphire => "SAPPHIRE",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for SubscriptionTier {
    type Err = TierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(SubscriptionTier::Free),
            "plus" => Ok(SubscriptionTier::Plus),
            "sapphire" => Ok(SubscriptionTier::Sapphire),
            _ => Err(TierParseError(s.to_string())),
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Feature::UnlimitedSwipes => "Unlimited Swipes",
            Feature::Rewind => "Rewind / Undo",
            Feature::Boost => "Daily Boost",
            Feature::StealthMode => "Shadow Mode",
            Feature::SeeWhoLikesYou => "See Who Likes You",
            Feature::MessageBeforeMatch => "Message Before Matching",
        };
        write!(f, "{}", name)
    }
}
