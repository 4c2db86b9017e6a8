//! State machine for market-tier transitions.
//!
//! The classifier itself has no memory of previous results; the policy of
//! reacting to a tier change lives here as a pure transition function that
//! returns the new state together with a side-effect instruction for the
//! caller to carry out.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::classify::MarketType;

/// Persistent market state of a job order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketState {
    Simple,
    Complex,
}

impl From<MarketType> for MarketState {
    fn from(tier: MarketType) -> Self {
        match tier {
            MarketType::Simple => MarketState::Simple,
            MarketType::Complex => MarketState::Complex,
        }
    }
}

impl fmt::Display for MarketState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketState::Simple => write!(f, "simple"),
            MarketState::Complex => write!(f, "complex"),
        }
    }
}

/// Pricing approach chosen for a job order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingApproach {
    Standard,
    Premium,
    Custom,
}

impl fmt::Display for PricingApproach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingApproach::Standard => write!(f, "standard"),
            PricingApproach::Premium => write!(f, "premium"),
            PricingApproach::Custom => write!(f, "custom"),
        }
    }
}

/// Instruction for the caller; the transition function performs no side
/// effects itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingAction {
    /// Default the pricing approach to premium.
    SuggestPremium,
}

/// Result of applying a reclassification to the previous state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionOutcome {
    pub state: MarketState,
    pub action: Option<PricingAction>,
}

/// Apply a new classification tier to the previous market state.
///
/// `SuggestPremium` fires exactly when the order lands on `complex` from a
/// non-complex state (including a first-ever classification) and no pricing
/// approach has been chosen yet. A repeated complex result never re-fires.
pub fn evaluate_transition(
    previous: Option<MarketState>,
    next: MarketState,
    pricing_chosen: bool,
) -> TransitionOutcome {
    let entered_complex = next == MarketState::Complex && previous != Some(MarketState::Complex);

    let action = if entered_complex && !pricing_chosen {
        Some(PricingAction::SuggestPremium)
    } else {
        None
    };

    TransitionOutcome {
        state: next,
        action,
    }
}
