//! Symbol matrix and its generator

use std::collections::HashMap;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::config::{GameConfig, WeightTable};
use crate::error::ConfigError;
use crate::position::Position;
use crate::rng::{RandomSource, weighted_pick};

/// Where the round's bonus symbol landed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusPlacement {
    pub position: Position,
    pub symbol: String,
}

/// A fully populated grid of symbol names (row-major).
///
/// Serializes as the bare 2D array of names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Matrix {
    cells: Vec<Vec<String>>,
    #[serde(skip)]
    bonus: Option<BonusPlacement>,
}

impl Matrix {
    pub fn new(cells: Vec<Vec<String>>, bonus: Option<BonusPlacement>) -> Self {
        Self { cells, bonus }
    }

    /// Build a matrix without a bonus placement from nested rows of names
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cells = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        Self { cells, bonus: None }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn columns(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// Symbol at a position
    pub fn get(&self, position: Position) -> Option<&str> {
        self.cells
            .get(position.row)
            .and_then(|row| row.get(position.column))
            .map(String::as_str)
    }

    pub fn bonus(&self) -> Option<&BonusPlacement> {
        self.bonus.as_ref()
    }

    /// Name of the bonus symbol placed this round
    pub fn bonus_symbol(&self) -> Option<&str> {
        self.bonus.as_ref().map(|b| b.symbol.as_str())
    }

    /// Every cell in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Position, &str)> {
        self.cells.iter().enumerate().flat_map(|(row, symbols)| {
            symbols
                .iter()
                .enumerate()
                .map(move |(column, symbol)| (Position::new(row, column), symbol.as_str()))
        })
    }
}

/// Per-cell lookup of standard weight tables.
///
/// Cells without an explicit entry use the table declared for 0:0.
#[derive(Debug, Clone)]
pub struct ProbabilityGrid<'a> {
    tables: HashMap<Position, &'a WeightTable>,
    fallback: Option<&'a WeightTable>,
}

impl<'a> ProbabilityGrid<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        let tables: HashMap<Position, &WeightTable> = config
            .probabilities
            .standard_symbols
            .iter()
            .map(|cell| (cell.position(), &cell.symbols))
            .collect();
        let fallback = tables.get(&Position::ORIGIN).copied();

        let borrowed = config.rows.saturating_mul(config.columns).saturating_sub(tables.len());
        if borrowed > 0 {
            debug!("{borrowed} cell(s) use the 0:0 probability table");
        }

        Self { tables, fallback }
    }

    /// Weight table for a cell
    pub fn table_for(&self, position: Position) -> Result<&'a WeightTable, ConfigError> {
        if let Some(table) = self.tables.get(&position) {
            return Ok(table);
        }
        trace!("Cell {position} falls back to the 0:0 table");
        self.fallback.ok_or(ConfigError::MissingProbabilities {
            row: position.row,
            column: position.column,
        })
    }
}

/// Fills a grid from the configured distributions
#[derive(Debug, Clone)]
pub struct MatrixGenerator<'a> {
    config: &'a GameConfig,
    probabilities: ProbabilityGrid<'a>,
}

impl<'a> MatrixGenerator<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self {
            config,
            probabilities: ProbabilityGrid::new(config),
        }
    }

    /// Generate one matrix.
    ///
    /// Draw order: bonus row, bonus column (only with a bonus table), then one
    /// weighted draw per cell in row-major order.
    pub fn generate<S: RandomSource + ?Sized>(&self, source: &mut S) -> Result<Matrix, ConfigError> {
        let rows = self.config.rows;
        let columns = self.config.columns;
        if self.config.cell_count().is_none() {
            return Err(ConfigError::InvalidDimensions { rows, columns });
        }

        let bonus_weights = self.config.bonus_weights();
        let bonus_position = bonus_weights
            .map(|_| Position::new(source.next_index(rows), source.next_index(columns)));

        let mut cells = Vec::with_capacity(rows);
        let mut bonus = None;
        for row in 0..rows {
            let mut line = Vec::with_capacity(columns);
            for column in 0..columns {
                let position = Position::new(row, column);
                let symbol = match (bonus_position, bonus_weights) {
                    (Some(at), Some(weights)) if at == position => {
                        let symbol = weighted_pick(weights, source)
                            .ok_or_else(|| ConfigError::ZeroWeight("bonus probabilities".into()))?;
                        bonus = Some(BonusPlacement {
                            position,
                            symbol: symbol.to_string(),
                        });
                        symbol
                    }
                    _ => {
                        let table = self.probabilities.table_for(position)?;
                        weighted_pick(table, source).ok_or_else(|| {
                            ConfigError::ZeroWeight(format!("probabilities for cell {position}"))
                        })?
                    }
                };
                trace!("Cell {position} = {symbol}");
                line.push(symbol.to_string());
            }
            cells.push(line);
        }

        if let Some(placed) = &bonus {
            debug!("Bonus symbol {} placed at {}", placed.symbol, placed.position);
        }
        Ok(Matrix::new(cells, bonus))
    }
}

/// Generate one matrix for a configuration
pub fn generate_matrix<S: RandomSource + ?Sized>(
    config: &GameConfig,
    source: &mut S,
) -> Result<Matrix, ConfigError> {
    MatrixGenerator::new(config).generate(source)
}
