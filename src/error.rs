//! Error types for eventdb
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using LogError
pub type Result<T> = std::result::Result<T, LogError>;

/// Unified error type for event log operations
#[derive(Debug, Error)]
pub enum LogError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("{op}: {source}")]
    Io {
        /// Which operation hit the failure ("open", "append", "dump", ...)
        op: &'static str,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Corruption Errors
    // -------------------------------------------------------------------------
    #[error("replay: line {line}: unexpected record {fields:?}")]
    Corrupt {
        /// 1-based physical line on which the record starts
        line: u64,
        /// The raw decoded fields of the offending record
        fields: Vec<String>,
    },

    #[error("replay: line {line}: {source}")]
    Timestamp {
        /// 1-based physical line on which the record starts
        line: u64,
        #[source]
        source: chrono::ParseError,
    },

    // -------------------------------------------------------------------------
    // Scan Errors
    // -------------------------------------------------------------------------
    #[error("replay: {0}")]
    Visitor(#[source] Box<LogError>),

    // -------------------------------------------------------------------------
    // Lifecycle Errors
    // -------------------------------------------------------------------------
    #[error("event log is closed")]
    Closed,
}

impl LogError {
    /// Wrap an I/O failure with the name of the operation that hit it
    pub(crate) fn io(op: &'static str, source: std::io::Error) -> Self {
        Self::Io { op, source }
    }
}
