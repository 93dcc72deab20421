//! Symbol definitions

use serde::{Deserialize, Serialize};

/// Symbol type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    /// Regular symbol, takes part in win detection
    Standard,
    /// Placed at most once per round, post-processes the reward
    Bonus,
}

impl SymbolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Bonus => "bonus",
        }
    }
}

/// Effect of a bonus symbol on the round reward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusImpact {
    /// Multiply the reward by the symbol's `reward_multiplier`
    MultiplyReward,
    /// Add the symbol's `extra` to the reward
    ExtraBonus,
    /// No effect
    Miss,
    /// Any impact name this engine does not know; behaves like `Miss`
    #[serde(other)]
    Unrecognized,
}

/// A symbol definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    /// Bet multiplier for standard symbols, reward multiplier for `multiply_reward`
    #[serde(default)]
    pub reward_multiplier: f64,
    /// Symbol type
    #[serde(rename = "type")]
    pub kind: SymbolKind,
    /// Flat amount added by `extra_bonus`
    #[serde(default)]
    pub extra: f64,
    /// Bonus effect (bonus symbols only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<BonusImpact>,
}

impl Symbol {
    /// Create a standard symbol
    pub fn standard(reward_multiplier: f64) -> Self {
        Self {
            reward_multiplier,
            kind: SymbolKind::Standard,
            extra: 0.0,
            impact: None,
        }
    }

    /// Create a `multiply_reward` bonus symbol
    pub fn multiplier(reward_multiplier: f64) -> Self {
        Self {
            reward_multiplier,
            kind: SymbolKind::Bonus,
            extra: 0.0,
            impact: Some(BonusImpact::MultiplyReward),
        }
    }

    /// Create an `extra_bonus` bonus symbol
    pub fn extra_bonus(extra: f64) -> Self {
        Self {
            reward_multiplier: 0.0,
            kind: SymbolKind::Bonus,
            extra,
            impact: Some(BonusImpact::ExtraBonus),
        }
    }

    /// Create a `miss` bonus symbol
    pub fn miss() -> Self {
        Self {
            reward_multiplier: 0.0,
            kind: SymbolKind::Bonus,
            extra: 0.0,
            impact: Some(BonusImpact::Miss),
        }
    }

    pub fn is_standard(&self) -> bool {
        self.kind == SymbolKind::Standard
    }

    pub fn is_bonus(&self) -> bool {
        self.kind == SymbolKind::Bonus
    }

    /// Apply this symbol's bonus effect to a pre-bonus reward.
    ///
    /// Standard symbols leave the reward untouched.
    pub fn apply_bonus(&self, reward: f64) -> f64 {
        if !self.is_bonus() {
            return reward;
        }
        match self.impact {
            Some(BonusImpact::MultiplyReward) => reward * self.reward_multiplier,
            Some(BonusImpact::ExtraBonus) => reward + self.extra,
            Some(BonusImpact::Miss) | Some(BonusImpact::Unrecognized) | None => reward,
        }
    }
}
