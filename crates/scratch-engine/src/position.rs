//! Grid positions and their `"row:column"` wire form

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A cell on the grid (0-based row and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub const ORIGIN: Position = Position { row: 0, column: 0 };

    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Check the position lies inside a `rows × columns` grid
    pub fn fits(&self, rows: usize, columns: usize) -> bool {
        self.row < rows && self.column < columns
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

impl FromStr for Position {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ConfigError::MalformedPosition(s.to_string());
        let (row, column) = s.split_once(':').ok_or_else(malformed)?;
        let row = row.trim().parse::<usize>().map_err(|_| malformed())?;
        let column = column.trim().parse::<usize>().map_err(|_| malformed())?;
        Ok(Self { row, column })
    }
}

impl TryFrom<String> for Position {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position() {
        assert_eq!("0:2".parse::<Position>().unwrap(), Position::new(0, 2));
        assert_eq!("12:3".parse::<Position>().unwrap(), Position::new(12, 3));
        assert_eq!(Position::new(2, 1).to_string(), "2:1");
    }

    #[test]
    fn test_malformed_positions() {
        for raw in ["", "1", "1:", ":1", "a:b", "-1:0", "1:2:3"] {
            assert_eq!(
                raw.parse::<Position>(),
                Err(ConfigError::MalformedPosition(raw.to_string())),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_position_serde() {
        let area: Vec<Position> = serde_json::from_str(r#"["0:0", "1:1", "2:2"]"#).unwrap();
        assert_eq!(area[1], Position::new(1, 1));
        assert_eq!(serde_json::to_string(&area[2]).unwrap(), "\"2:2\"");

        let bad: Result<Vec<Position>, _> = serde_json::from_str(r#"["0-0"]"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_fits() {
        assert!(Position::new(2, 2).fits(3, 3));
        assert!(!Position::new(3, 0).fits(3, 3));
        assert!(!Position::new(0, 3).fits(3, 3));
    }
}
