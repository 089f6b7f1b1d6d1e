use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a statistics run.
///
/// A malformed record stops the whole run: partial statistics would
/// misrepresent the players they describe.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("malformed hand record {hand}: missing or invalid field `{field}`")]
    MalformedRecord { hand: String, field: String },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid CSV input: {0}")]
    Csv(#[from] csv::Error),
}

impl StatsError {
    pub fn malformed(hand: impl Into<String>, field: impl Into<String>) -> Self {
        StatsError::MalformedRecord {
            hand: hand.into(),
            field: field.into(),
        }
    }
}
