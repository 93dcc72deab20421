//! Win combinations and matching

use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::matrix::Matrix;
use crate::position::Position;

/// How a combination is detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinCondition {
    /// A symbol appears at least `count` times anywhere on the grid
    SameSymbols,
    /// One symbol fills every position of a covered area
    LinearSymbols,
}

/// A winning pattern definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinCombination {
    pub reward_multiplier: f64,
    pub when: WinCondition,
    /// Minimum occurrences (`same_symbols` only)
    #[serde(default)]
    pub count: usize,
    /// Display grouping, not used for matching
    #[serde(default)]
    pub group: String,
    /// Position lists that must hold one identical symbol (`linear_symbols` only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub covered_areas: Vec<Vec<Position>>,
}

impl WinCombination {
    /// Create a `same_symbols` combination
    pub fn same_symbols(count: usize, reward_multiplier: f64) -> Self {
        Self {
            reward_multiplier,
            when: WinCondition::SameSymbols,
            count,
            group: "same_symbols".to_string(),
            covered_areas: Vec::new(),
        }
    }

    /// Create a `linear_symbols` combination
    pub fn linear(
        group: impl Into<String>,
        covered_areas: Vec<Vec<Position>>,
        reward_multiplier: f64,
    ) -> Self {
        Self {
            reward_multiplier,
            when: WinCondition::LinearSymbols,
            count: 0,
            group: group.into(),
            covered_areas,
        }
    }
}

/// Combinations satisfied per symbol in one round
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchResult(BTreeMap<String, BTreeSet<String>>);

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a combination against a symbol
    pub fn record(&mut self, symbol: &str, combination: &str) {
        self.0
            .entry(symbol.to_string())
            .or_default()
            .insert(combination.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Combinations recorded for a symbol
    pub fn get(&self, symbol: &str) -> Option<&BTreeSet<String>> {
        self.0.get(symbol)
    }

    pub fn contains(&self, symbol: &str, combination: &str) -> bool {
        self.0.get(symbol).is_some_and(|names| names.contains(combination))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.0.iter().map(|(symbol, names)| (symbol.as_str(), names))
    }

    /// Fold another result into this one
    pub fn merge(&mut self, other: MatchResult) {
        for (symbol, names) in other.0 {
            self.0.entry(symbol).or_default().extend(names);
        }
    }
}

/// Detects configured combinations on a generated matrix
#[derive(Debug, Clone, Copy)]
pub struct CombinationMatcher<'a> {
    config: &'a GameConfig,
}

impl<'a> CombinationMatcher<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    /// Run both passes and merge them
    pub fn evaluate(&self, matrix: &Matrix) -> MatchResult {
        let mut result = self.match_same_symbols(matrix);
        result.merge(self.match_linear_symbols(matrix));
        debug!("{} symbol(s) matched win combinations", result.len());
        result
    }

    fn is_standard(&self, symbol: &str) -> bool {
        self.config
            .symbols
            .get(symbol)
            .is_some_and(|definition| definition.is_standard())
    }

    /// Count each standard symbol and keep only its highest reached tier.
    ///
    /// Equal thresholds resolve to the lexicographically smallest name.
    pub fn match_same_symbols(&self, matrix: &Matrix) -> MatchResult {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for (_, symbol) in matrix.iter() {
            if self.is_standard(symbol) {
                *counts.entry(symbol).or_default() += 1;
            }
        }

        let tiers: Vec<(&str, usize)> = self
            .config
            .win_combinations
            .iter()
            .filter(|(_, combination)| combination.when == WinCondition::SameSymbols)
            .map(|(name, combination)| (name.as_str(), combination.count))
            .collect();

        let mut result = MatchResult::new();
        for (symbol, count) in counts {
            let best = tiers
                .iter()
                .filter(|&&(_, threshold)| threshold <= count)
                .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)));
            if let Some(&(name, _)) = best {
                result.record(symbol, name);
            }
        }
        result
    }

    /// Record every covered area filled by a single standard symbol
    pub fn match_linear_symbols(&self, matrix: &Matrix) -> MatchResult {
        let mut result = MatchResult::new();
        for (name, combination) in &self.config.win_combinations {
            if combination.when != WinCondition::LinearSymbols {
                continue;
            }
            for area in &combination.covered_areas {
                if let Some(symbol) = self.area_symbol(matrix, area) {
                    result.record(symbol, name);
                }
            }
        }
        result
    }

    fn area_symbol<'m>(&self, matrix: &'m Matrix, area: &[Position]) -> Option<&'m str> {
        let (first, rest) = area.split_first()?;
        let symbol = matrix.get(*first)?;
        if !self.is_standard(symbol) {
            return None;
        }
        rest.iter()
            .all(|&position| matrix.get(position) == Some(symbol))
            .then_some(symbol)
    }
}

/// Match configured combinations against a matrix
pub fn match_combinations(config: &GameConfig, matrix: &Matrix) -> MatchResult {
    CombinationMatcher::new(config).evaluate(matrix)
}
