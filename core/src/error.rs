//! Error types for maze construction, lookup and configuration.

use thiserror::Error;

/// Errors raised by the maze engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// Every violated generation parameter, one message per violation.
    #[error("Invalid maze parameters:\n{}", .0.join("\n"))]
    InvalidParameters(Vec<String>),

    #[error("Invalid cell coordinates given: ({row}, {col}). Grid is {height} rows by {width} columns.")]
    OutOfBounds {
        row: i32,
        col: i32,
        height: usize,
        width: usize,
    },

    /// A deserialized maze whose shape does not match its own metadata.
    #[error("Invalid maze data: {0}")]
    InvalidData(String),
}

/// Errors raised while reading configuration values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Config value {key}='{value}' is not a valid number")]
    NotANumber { key: String, value: String },

    #[error("Config range is inverted: {min_key}={min} exceeds {max_key}={max}")]
    InvertedRange {
        min_key: &'static str,
        min: usize,
        max_key: &'static str,
        max: usize,
    },

    #[error("Config value {key}={value} must be at least 1")]
    Zero { key: &'static str, value: usize },
}

pub type Result<T> = std::result::Result<T, MazeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameters_lists_every_violation() {
        let err = MazeError::InvalidParameters(vec![
            "height 1 out of range".to_string(),
            "seed too short".to_string(),
        ]);
        let text = err.to_string();
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("height 1 out of range"));
        assert!(text.ends_with("seed too short"));
    }

    #[test]
    fn test_out_of_bounds_names_coordinates() {
        let err = MazeError::OutOfBounds {
            row: -1,
            col: -1,
            height: 3,
            width: 3,
        };
        assert!(err.to_string().contains("(-1, -1)"));
    }
}
