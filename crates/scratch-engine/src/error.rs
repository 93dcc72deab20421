//! Error types for the scratch engine

use thiserror::Error;

/// A configuration that cannot be used to evaluate a round.
///
/// Every variant is fatal: a round is never evaluated against a configuration
/// that failed validation, and nothing is retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid grid dimensions: {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("Unknown symbol '{symbol}' referenced by {context}")]
    UnknownSymbol { symbol: String, context: String },

    #[error("Symbol '{symbol}' in {context} must be a {expected} symbol")]
    SymbolKindMismatch {
        symbol: String,
        context: String,
        expected: &'static str,
    },

    #[error("Unknown win combination '{0}'")]
    UnknownCombination(String),

    #[error("Weight table for {0} has no positive total weight")]
    ZeroWeight(String),

    #[error("No probability table for cell {row}:{column} and no fallback at 0:0")]
    MissingProbabilities { row: usize, column: usize },

    #[error("Probability table for cell {row}:{column} is declared more than once")]
    DuplicatePosition { row: usize, column: usize },

    #[error("Position {row}:{column} in {context} is outside the {rows}x{columns} grid")]
    PositionOutOfBounds {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
        context: String,
    },

    #[error("Malformed position '{0}', expected 'row:column'")]
    MalformedPosition(String),

    #[error("Win combination '{0}' has an empty covered area")]
    EmptyArea(String),

    #[error("Win combination '{0}' needs a positive same-symbol count")]
    ZeroCount(String),

    #[error("Invalid multiplier {value} on {context}")]
    InvalidMultiplier { value: f64, context: String },
}

/// Top-level engine error
#[derive(Error, Debug)]
pub enum ScratchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("Invalid bet amount: {0}")]
    InvalidBet(f64),
}

/// Result type alias
pub type ScratchResult<T> = Result<T, ScratchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let err: ScratchError = ConfigError::ZeroWeight("bonus symbols".into()).into();
        assert!(matches!(err, ScratchError::Config(ConfigError::ZeroWeight(_))));
        assert_eq!(
            err.to_string(),
            "Configuration error: Weight table for bonus symbols has no positive total weight"
        );
    }
}
