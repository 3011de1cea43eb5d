//! Error types for catalog loading, drawing and deck generation.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for tarot operations.
pub type TarotResult<T> = Result<T, TarotError>;

/// Errors that can occur while loading or drawing from a catalog.
#[derive(Debug, Error)]
pub enum TarotError {
    /// The catalog source violates the card data model.
    #[error("malformed catalog{}: {reason}", record_suffix(.record))]
    MalformedCatalog {
        /// Zero-based position of the offending record, when known.
        record: Option<usize>,
        /// What is wrong with the record or document.
        reason: String,
    },

    /// A draw was attempted on a catalog with no cards.
    #[error("cannot draw from an empty catalog")]
    EmptyCatalog,

    /// More distinct cards were requested than the catalog holds.
    #[error("requested {requested} cards but only {available} are available")]
    InsufficientCards {
        /// Number of cards asked for.
        requested: usize,
        /// Number of cards that could be supplied.
        available: usize,
    },

    /// No card carries the requested id.
    #[error("card not found: {0}")]
    NotFound(u32),

    /// The deck generator configuration is incomplete or inconsistent.
    #[error("invalid deck configuration: {0}")]
    InvalidConfig(String),

    /// A catalog or configuration file could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A catalog could not be written out as JSON.
    #[error("cannot serialize catalog: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl TarotError {
    /// Build a [`TarotError::MalformedCatalog`] for a specific record.
    pub fn malformed(record: usize, reason: impl Into<String>) -> Self {
        Self::MalformedCatalog {
            record: Some(record),
            reason: reason.into(),
        }
    }
}

fn record_suffix(record: &Option<usize>) -> String {
    match record {
        Some(idx) => format!(" (record {})", idx + 1),
        None => String::new(),
    }
}
