//! Reward composition

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::combinations::MatchResult;
use crate::config::GameConfig;
use crate::error::ConfigError;

/// How a round's reward was composed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardBreakdown {
    /// Reward per winning symbol, before the bonus
    pub per_symbol: BTreeMap<String, f64>,
    /// Sum of `per_symbol`
    pub base: f64,
    /// Bonus symbol whose effect was applied
    pub applied_bonus: Option<String>,
    /// Final reward
    pub total: f64,
}

/// Turns match results into a reward
#[derive(Debug, Clone, Copy)]
pub struct RewardCalculator<'a> {
    config: &'a GameConfig,
}

impl<'a> RewardCalculator<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    /// Compose the reward for one round.
    ///
    /// A round without matches pays exactly zero and ignores the bonus symbol.
    pub fn calculate(
        &self,
        bet: f64,
        matches: &MatchResult,
        bonus_symbol: Option<&str>,
    ) -> Result<RewardBreakdown, ConfigError> {
        if matches.is_empty() {
            return Ok(RewardBreakdown::default());
        }

        let mut per_symbol = BTreeMap::new();
        for (symbol, combinations) in matches.iter() {
            let mut amount = bet * self.config.symbol(symbol)?.reward_multiplier;
            for name in combinations {
                amount *= self.config.combination(name)?.reward_multiplier;
            }
            per_symbol.insert(symbol.to_string(), amount);
        }
        let base: f64 = per_symbol.values().sum();

        let mut total = base;
        let mut applied_bonus = None;
        if let Some(name) = bonus_symbol {
            let bonus = self.config.symbol(name)?;
            if bonus.is_bonus() {
                total = bonus.apply_bonus(base);
                applied_bonus = Some(name.to_string());
                debug!("Bonus {name} turned {base} into {total}");
            }
        }

        Ok(RewardBreakdown {
            per_symbol,
            base,
            applied_bonus,
            total,
        })
    }
}

/// Compose the reward for one round
pub fn calculate_reward(
    config: &GameConfig,
    bet: f64,
    matches: &MatchResult,
    bonus_symbol: Option<&str>,
) -> Result<RewardBreakdown, ConfigError> {
    RewardCalculator::new(config).calculate(bet, matches, bonus_symbol)
}
