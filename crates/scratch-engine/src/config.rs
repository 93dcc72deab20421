//! Game configuration: model, validation and loading

use std::collections::HashSet;
use std::path::Path;

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::combinations::{WinCombination, WinCondition};
use crate::error::{ConfigError, ScratchResult};
use crate::position::Position;
use crate::rng::total_weight;
use crate::symbols::{Symbol, SymbolKind};

/// Symbol → integer weight, kept in configuration order
pub type WeightTable = IndexMap<String, u32>;

/// Standard-symbol weights bound to one grid cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellProbability {
    pub row: usize,
    pub column: usize,
    pub symbols: WeightTable,
}

impl CellProbability {
    pub fn new(row: usize, column: usize, symbols: WeightTable) -> Self {
        Self {
            row,
            column,
            symbols,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.row, self.column)
    }
}

/// Bonus-symbol weights shared by every cell
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BonusProbability {
    #[serde(default)]
    pub symbols: WeightTable,
}

/// Probability tables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Probabilities {
    #[serde(default)]
    pub standard_symbols: Vec<CellProbability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus_symbols: Option<BonusProbability>,
}

/// Complete game configuration.
///
/// Read-only to the engine; one configuration serves any number of
/// independent rounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: usize,
    pub columns: usize,
    pub symbols: IndexMap<String, Symbol>,
    pub probabilities: Probabilities,
    #[serde(default)]
    pub win_combinations: IndexMap<String, WinCombination>,
}

impl GameConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> ScratchResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a YAML configuration
    pub fn from_yaml_str(yaml: &str) -> ScratchResult<Self> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file (`.yaml`/`.yml` as YAML, anything else as JSON)
    pub fn load(path: impl AsRef<Path>) -> ScratchResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        if is_yaml {
            debug!("Loading YAML configuration from {}", path.display());
            Self::from_yaml_str(&text)
        } else {
            debug!("Loading JSON configuration from {}", path.display());
            Self::from_json_str(&text)
        }
    }

    /// Look up a symbol definition
    pub fn symbol(&self, name: &str) -> Result<&Symbol, ConfigError> {
        self.symbols.get(name).ok_or_else(|| ConfigError::UnknownSymbol {
            symbol: name.to_string(),
            context: "the round".to_string(),
        })
    }

    /// Look up a win combination
    pub fn combination(&self, name: &str) -> Result<&WinCombination, ConfigError> {
        self.win_combinations
            .get(name)
            .ok_or_else(|| ConfigError::UnknownCombination(name.to_string()))
    }

    /// Bonus weight table, if one is configured and non-empty
    pub fn bonus_weights(&self) -> Option<&WeightTable> {
        self.probabilities
            .bonus_symbols
            .as_ref()
            .map(|bonus| &bonus.symbols)
            .filter(|symbols| !symbols.is_empty())
    }

    /// Number of cells in the grid, if the dimensions describe one
    pub fn cell_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.columns).filter(|&cells| cells > 0)
    }

    /// Check the configuration can evaluate rounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cell_count = self.cell_count().ok_or(ConfigError::InvalidDimensions {
            rows: self.rows,
            columns: self.columns,
        })?;

        for (name, symbol) in &self.symbols {
            let context = format!("symbol '{name}'");
            check_multiplier(symbol.reward_multiplier, &context)?;
            if !symbol.extra.is_finite() {
                return Err(ConfigError::InvalidMultiplier {
                    value: symbol.extra,
                    context: format!("extra of {context}"),
                });
            }
        }

        self.validate_probabilities(cell_count)?;
        self.validate_combinations()
    }

    fn validate_probabilities(&self, cell_count: usize) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for cell in &self.probabilities.standard_symbols {
            let position = cell.position();
            let context = format!("probabilities for cell {position}");
            if !position.fits(self.rows, self.columns) {
                return Err(ConfigError::PositionOutOfBounds {
                    row: position.row,
                    column: position.column,
                    rows: self.rows,
                    columns: self.columns,
                    context,
                });
            }
            if !seen.insert(position) {
                return Err(ConfigError::DuplicatePosition {
                    row: position.row,
                    column: position.column,
                });
            }
            self.check_table(&cell.symbols, SymbolKind::Standard, &context)?;
        }

        // Cells without their own table borrow the one at 0:0
        let covers_every_cell = seen.len() == cell_count;
        if !covers_every_cell && !seen.contains(&Position::ORIGIN) {
            let missing = (0..self.rows)
                .flat_map(|row| (0..self.columns).map(move |column| Position::new(row, column)))
                .find(|position| !seen.contains(position))
                .unwrap_or(Position::ORIGIN);
            return Err(ConfigError::MissingProbabilities {
                row: missing.row,
                column: missing.column,
            });
        }

        if let Some(bonus) = self.bonus_weights() {
            self.check_table(bonus, SymbolKind::Bonus, "bonus probabilities")?;
        }
        Ok(())
    }

    fn check_table(
        &self,
        table: &WeightTable,
        expected: SymbolKind,
        context: &str,
    ) -> Result<(), ConfigError> {
        for name in table.keys() {
            let symbol = self.symbols.get(name).ok_or_else(|| ConfigError::UnknownSymbol {
                symbol: name.clone(),
                context: context.to_string(),
            })?;
            if symbol.kind != expected {
                return Err(ConfigError::SymbolKindMismatch {
                    symbol: name.clone(),
                    context: context.to_string(),
                    expected: expected.as_str(),
                });
            }
        }
        if total_weight(table) == 0 {
            return Err(ConfigError::ZeroWeight(context.to_string()));
        }
        Ok(())
    }

    fn validate_combinations(&self) -> Result<(), ConfigError> {
        for (name, combination) in &self.win_combinations {
            check_multiplier(combination.reward_multiplier, &format!("win combination '{name}'"))?;
            match combination.when {
                WinCondition::SameSymbols => {
                    if combination.count == 0 {
                        return Err(ConfigError::ZeroCount(name.clone()));
                    }
                }
                WinCondition::LinearSymbols => {
                    for area in &combination.covered_areas {
                        if area.is_empty() {
                            return Err(ConfigError::EmptyArea(name.clone()));
                        }
                        if let Some(outside) =
                            area.iter().find(|p| !p.fits(self.rows, self.columns))
                        {
                            return Err(ConfigError::PositionOutOfBounds {
                                row: outside.row,
                                column: outside.column,
                                rows: self.rows,
                                columns: self.columns,
                                context: format!("win combination '{name}'"),
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

fn check_multiplier(value: f64, context: &str) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidMultiplier {
            value,
            context: context.to_string(),
        })
    }
}
