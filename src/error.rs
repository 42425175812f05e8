//! Error types for the boardgames crate

use thiserror::Error;

/// Main error type for the boardgames crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal move {position}: {reason}")]
    IllegalMove { position: usize, reason: String },

    #[error("no valid moves available")]
    NoValidMoves,

    #[error("move input closed before a legal move was entered")]
    InputClosed,

    #[error("unknown player type '{input}'. Expected one of: {expected}")]
    UnknownPlayerType { input: String, expected: String },

    #[error("unknown opponent policy '{input}'. Expected one of: {expected}")]
    UnknownOpponent { input: String, expected: String },

    #[error("no learned table found for '{key}'; train one first")]
    MissingTable { key: String },

    #[error("table stored for '{expected}' was trained for '{found}'")]
    TableMismatch { expected: String, found: String },

    #[error("unsupported table format version {found} (expected {expected})")]
    UnsupportedFormat { found: u32, expected: u32 },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("invalid board size {rows}x{cols} with win length {win_length}")]
    InvalidBoardSize {
        rows: usize,
        cols: usize,
        win_length: usize,
    },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_player_display() {
        let err = Error::UnknownPlayerType {
            input: "wizard".to_string(),
            expected: "human, heuristic".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unknown player type 'wizard'. Expected one of: human, heuristic"
        );
    }

    #[test]
    fn test_missing_table_display() {
        let err = Error::MissingTable {
            key: "tictactoe_3x3_w3_first".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no learned table found for 'tictactoe_3x3_w3_first'; train one first"
        );
    }
}
