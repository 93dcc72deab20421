//! Round result

use serde::{Serialize, Serializer};

use crate::combinations::MatchResult;
use crate::matrix::{BonusPlacement, Matrix};

/// Complete outcome of one round
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundResult {
    /// Generated grid
    pub matrix: Matrix,
    /// Final reward
    pub reward: f64,
    /// Combinations won, per symbol
    pub applied_winning_combinations: MatchResult,
    /// Bonus symbol whose effect was applied (serialized as `""` when none)
    #[serde(serialize_with = "serialize_bonus")]
    pub applied_bonus_symbol: Option<String>,
}

impl RoundResult {
    pub fn is_win(&self) -> bool {
        self.reward > 0.0
    }

    /// Where the bonus symbol landed, whether or not it paid
    pub fn bonus_placement(&self) -> Option<&BonusPlacement> {
        self.matrix.bonus()
    }

    /// Serialize to the JSON record consumed by callers
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

fn serialize_bonus<S: Serializer>(bonus: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(bonus.as_deref().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_output_fields() {
        let mut matches = MatchResult::new();
        matches.record("B", "same_symbol_4");
        let result = RoundResult {
            matrix: Matrix::from_rows([["B", "B"], ["B", "B"]]),
            reward: 4500.0,
            applied_winning_combinations: matches,
            applied_bonus_symbol: Some("10x".into()),
        };

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "matrix": [["B", "B"], ["B", "B"]],
                "reward": 4500.0,
                "applied_winning_combinations": { "B": ["same_symbol_4"] },
                "applied_bonus_symbol": "10x"
            })
        );
    }

    #[test]
    fn test_losing_round_output() {
        let result = RoundResult {
            matrix: Matrix::from_rows([["A", "B"]]),
            reward: 0.0,
            applied_winning_combinations: MatchResult::new(),
            applied_bonus_symbol: None,
        };
        assert!(!result.is_win());

        let json = result.to_json(false).unwrap();
        assert!(json.starts_with('{') && json.ends_with('}'));
        assert!(json.contains(r#""applied_bonus_symbol":"""#));
        assert!(!json.contains("null"));
    }
}
