//! Scratch Engine: one round from configuration to reward

use log::{debug, info};

use crate::combinations::CombinationMatcher;
use crate::config::GameConfig;
use crate::error::{ScratchError, ScratchResult};
use crate::matrix::MatrixGenerator;
use crate::reward::RewardCalculator;
use crate::rng::{RandomSource, RngSource};
use crate::round::RoundResult;

/// Evaluates rounds against a validated configuration.
///
/// Holds only the configuration and the random source; every round's grid and
/// matches are built fresh and returned in the `RoundResult`.
#[derive(Debug, Clone)]
pub struct ScratchGame<S: RandomSource = RngSource> {
    config: GameConfig,
    source: S,
}

impl ScratchGame<RngSource> {
    /// Create with an OS-seeded source
    pub fn new(config: GameConfig) -> ScratchResult<Self> {
        Self::with_source(config, RngSource::from_entropy())
    }

    /// Create with a fixed seed for reproducible rounds
    pub fn seeded(config: GameConfig, seed: u64) -> ScratchResult<Self> {
        Self::with_source(config, RngSource::seeded(seed))
    }
}

impl<S: RandomSource> ScratchGame<S> {
    /// Create with a caller-supplied random source
    pub fn with_source(config: GameConfig, source: S) -> ScratchResult<Self> {
        config.validate()?;
        Ok(Self { config, source })
    }

    /// Get current config
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Play one round
    pub fn play(&mut self, bet: f64) -> ScratchResult<RoundResult> {
        play_round(&self.config, bet, &mut self.source)
    }
}

/// Generate, match and pay one round.
///
/// `config` is expected to be validated; problems that slipped through are
/// still reported as configuration errors rather than panics.
pub fn play_round<S: RandomSource + ?Sized>(
    config: &GameConfig,
    bet: f64,
    source: &mut S,
) -> ScratchResult<RoundResult> {
    if !bet.is_finite() || bet < 0.0 {
        return Err(ScratchError::InvalidBet(bet));
    }

    let matrix = MatrixGenerator::new(config).generate(source)?;
    let matches = CombinationMatcher::new(config).evaluate(&matrix);
    let reward = RewardCalculator::new(config).calculate(bet, &matches, matrix.bonus_symbol())?;

    debug!(
        "Round: base {} across {} symbol(s), bonus {:?}",
        reward.base,
        reward.per_symbol.len(),
        matrix.bonus_symbol()
    );
    info!("Round finished: bet {bet}, reward {}", reward.total);

    Ok(RoundResult {
        matrix,
        reward: reward.total,
        applied_winning_combinations: matches,
        applied_bonus_symbol: reward.applied_bonus,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::rng::ScriptedSource;
    use serde_json::json;

    fn config() -> GameConfig {
        serde_json::from_value(json!({
            "rows": 3,
            "columns": 3,
            "symbols": {
                "A": { "reward_multiplier": 5, "type": "standard" },
                "B": { "reward_multiplier": 3, "type": "standard" },
                "C": { "reward_multiplier": 2.5, "type": "standard" },
                "5x": { "reward_multiplier": 5, "type": "bonus", "impact": "multiply_reward" },
                "MISS": { "type": "bonus", "impact": "miss" }
            },
            "probabilities": {
                "standard_symbols": [
                    { "row": 0, "column": 0, "symbols": { "A": 1, "B": 2, "C": 3 } }
                ],
                "bonus_symbols": { "symbols": { "5x": 1, "MISS": 1 } }
            },
            "win_combinations": {
                "same_symbol_3": { "reward_multiplier": 1, "when": "same_symbols", "count": 3, "group": "same_symbols" },
                "same_symbol_5": { "reward_multiplier": 2, "when": "same_symbols", "count": 5, "group": "same_symbols" }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_engine_creation() {
        let game = ScratchGame::new(config()).unwrap();
        assert_eq!(game.config().rows, 3);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut bad = config();
        bad.columns = 0;
        assert!(matches!(
            ScratchGame::seeded(bad, 1),
            Err(ScratchError::Config(ConfigError::InvalidDimensions { .. }))
        ));
    }

    #[test]
    fn test_invalid_bet_rejected() {
        let mut game = ScratchGame::seeded(config(), 1).unwrap();
        for bet in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(game.play(bet), Err(ScratchError::InvalidBet(_))));
        }
        assert!(game.play(0.0).is_ok());
    }

    #[test]
    fn test_seeded_games_repeat() {
        let mut first = ScratchGame::seeded(config(), 2024).unwrap();
        let mut second = ScratchGame::seeded(config(), 2024).unwrap();
        for _ in 0..25 {
            assert_eq!(first.play(100.0).unwrap(), second.play(100.0).unwrap());
        }
    }

    #[test]
    fn test_scripted_round() {
        // bonus at 0:0, bonus draw 0.0 picks "5x", every other cell draws C
        let mut script = vec![0.0, 0.0, 0.0];
        script.extend([0.9; 8]);
        let mut source = ScriptedSource::new(script);
        let result = play_round(&config(), 10.0, &mut source).unwrap();

        assert_eq!(result.matrix.get(crate::Position::ORIGIN), Some("5x"));
        assert!(result.applied_winning_combinations.contains("C", "same_symbol_5"));
        // 10 * 2.5 * 2 * 5
        assert_eq!(result.reward, 250.0);
        assert_eq!(result.applied_bonus_symbol.as_deref(), Some("5x"));
    }

    #[test]
    fn test_zero_bet_pays_zero_without_extra_bonus() {
        let mut game = ScratchGame::seeded(config(), 9).unwrap();
        for _ in 0..20 {
            assert_eq!(game.play(0.0).unwrap().reward, 0.0);
        }
    }

    #[test]
    fn test_zero_bet_win_still_gets_extra_bonus() {
        let mut config = config();
        config
            .symbols
            .insert("+1000".into(), crate::Symbol::extra_bonus(1000.0));
        config.probabilities.bonus_symbols = Some(crate::BonusProbability {
            symbols: [("+1000".to_string(), 1)].into_iter().collect(),
        });

        // bonus at 0:0, every other cell draws C
        let mut script = vec![0.0, 0.0, 0.0];
        script.extend([0.9; 8]);
        let mut game = ScratchGame::with_source(config, ScriptedSource::new(script)).unwrap();
        let result = game.play(0.0).unwrap();

        assert!(result.applied_winning_combinations.contains("C", "same_symbol_5"));
        assert_eq!(result.reward, 1000.0);
        assert_eq!(result.applied_bonus_symbol.as_deref(), Some("+1000"));
    }
}
