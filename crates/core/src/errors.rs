//! Core error types for the uniscope analytics library.
//!
//! This module defines provider-agnostic error types. Transport-specific
//! errors (from reqwest, etc.) are converted to these types by the connect
//! layer.

use chrono::{NaiveDate, ParseError as ChronoParseError};
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the universe analytics library.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Timeline query failed: {0}")]
    Timeline(#[from] TimelineError),

    #[error("Turnover analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Universe import failed: {0}")]
    Import(#[from] ImportError),

    #[error("Snapshot provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Errors raised by as-of-date resolution and range queries.
///
/// All variants are recoverable from the caller's perspective: the owning
/// application renders an explicit empty state rather than crashing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    /// The supplied snapshot sequence was empty.
    #[error("No snapshots available for this universe")]
    NoSnapshots,

    /// The target date precedes every available snapshot.
    #[error("No snapshot data on or before {target} (earliest snapshot is {earliest})")]
    NoDataBeforeDate {
        target: NaiveDate,
        earliest: NaiveDate,
    },

    /// Two snapshots in one sequence share a date. This violates the
    /// snapshot-store contract and indicates a caller bug, not bad data.
    #[error("Duplicate snapshot date {0} in one universe sequence")]
    DuplicateSnapshotDate(NaiveDate),
}

/// Errors raised by turnover and stability analysis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Fewer snapshots or periods than the computation needs. Callers must
    /// render an empty state; a "0%" turnover from one data point would be
    /// misleading.
    #[error("Insufficient data: analysis requires {required} snapshots, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// The prior snapshot holds zero assets, so turnover is undefined for
    /// the period (not zero).
    #[error("Turnover undefined against empty baseline snapshot dated {date}")]
    DegenerateBaseline { date: NaiveDate },

    /// A snapshot pair was supplied out of chronological order.
    #[error("Snapshot pair out of order: prior {prior} is not before current {current}")]
    NonChronologicalPair {
        prior: NaiveDate,
        current: NaiveDate,
    },

    /// Two snapshots in the analysis window share a date.
    #[error("Duplicate snapshot date {0} in analysis window")]
    DuplicateSnapshotDate(NaiveDate),

    #[error("Invalid analysis configuration: {0}")]
    InvalidConfig(String),
}

/// Errors raised while parsing bulk CSV imports.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("CSV file contains no rows")]
    EmptyFile,

    /// The header row matches neither the static nor the temporal shape.
    #[error("Unrecognized CSV header: {0}")]
    UnrecognizedHeader(String),

    #[error("Duplicate snapshot date {date} for universe '{universe}'")]
    DuplicateSnapshotDate { universe: String, date: NaiveDate },

    #[error("CSV read failed: {0}")]
    Csv(String),
}

/// Provider-agnostic error type for the snapshot retrieval API.
///
/// This enum uses `String` for transport details, allowing the connect
/// layer to convert reqwest errors into this format.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider returned a non-success HTTP status.
    #[error("Provider returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The provider rejected the request for rate-limiting reasons.
    #[error("Provider rate limit exceeded")]
    RateLimited,

    /// The request never completed (DNS, connect, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The response body could not be decoded into the expected shape.
    #[error("Failed to decode provider response: {0}")]
    Deserialization(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to parse date: {0}")]
    DateParse(#[from] ChronoParseError),
}

// === From implementations for common error types ===

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::Csv(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Import(ImportError::Csv(err.to_string()))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
