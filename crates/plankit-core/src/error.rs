//! Error handling for plankit
//!
//! Provides error types for all layers of the engine:
//! - Placement errors (precondition violations during placement)
//! - Import errors (malformed CSV/JSON furniture files)
//! - Advisory errors (AI advisory capability failures)
//! - Persistence errors (project save/load failures)
//!
//! All error types use `thiserror` for ergonomic error handling.
//! Precondition errors are rejected synchronously and surface as transient
//! notifications; external-capability failures are caught at the boundary and
//! never reach the history engine.

use thiserror::Error;

/// Placement and manipulation precondition errors
///
/// Raised synchronously before any state mutation occurs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlacementError {
    /// No scale has been set for the project yet
    #[error("Cannot place furniture before a scale is set")]
    NoScale,

    /// No unplaced furniture with the requested name remains
    #[error("No unplaced items named '{name}' available")]
    NothingToPlace {
        /// The furniture name that was requested.
        name: String,
    },

    /// Placement was attempted while not in placement mode
    #[error("Not in placement mode")]
    NotArmed,

    /// An operation required more selected items than were available
    #[error("{operation} requires at least {required} selected items, got {actual}")]
    NotEnoughSelected {
        /// The operation that was rejected.
        operation: String,
        /// The minimum number of selected items required.
        required: usize,
        /// The number of items actually selected.
        actual: usize,
    },

    /// The referenced furniture item does not exist in the project
    #[error("Unknown furniture id {id}")]
    UnknownItem {
        /// The missing furniture identifier.
        id: uuid::Uuid,
    },

    /// The referenced stack does not exist
    #[error("Unknown stack id {id}")]
    UnknownStack {
        /// The missing stack identifier.
        id: uuid::Uuid,
    },
}

/// Furniture import errors
///
/// Imports are atomic per file: either every item in the file is added or
/// none are.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportError {
    /// The CSV header is missing required columns
    #[error("Missing required columns: {columns}")]
    MissingColumns {
        /// Comma-separated list of the missing column names.
        columns: String,
    },

    /// A CSV row could not be parsed
    #[error("Invalid value in row {row}, column '{column}': {reason}")]
    InvalidRow {
        /// One-based data row number.
        row: usize,
        /// The column the bad value was found in.
        column: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The JSON document was not an array of items
    #[error("Expected a JSON array of furniture items")]
    NotAnArray,

    /// The JSON document was syntactically invalid
    #[error("Invalid JSON: {reason}")]
    InvalidJson {
        /// The parser's failure message.
        reason: String,
    },

    /// The file extension is not a supported import format
    #[error("Unsupported file extension '{extension}' (expected csv, json or pdf)")]
    UnsupportedExtension {
        /// The offending extension.
        extension: String,
    },

    /// The file contained no importable items
    #[error("File contains no furniture items")]
    Empty,

    /// The external document parser failed or returned malformed data
    #[error("Document parsing failed: {reason}")]
    DocumentParse {
        /// Why the document could not be parsed.
        reason: String,
    },
}

/// AI advisory capability errors
///
/// These are never fatal: the engine degrades to a local collision-only
/// fallback and the in-memory project stays fully usable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdvisoryError {
    /// The advisory capability is not reachable
    #[error("Advisory service unavailable: {reason}")]
    Unavailable {
        /// Why the service could not be reached.
        reason: String,
    },

    /// The advisory response could not be interpreted
    #[error("Malformed advisory response: {reason}")]
    MalformedResponse {
        /// What was wrong with the response.
        reason: String,
    },

    /// No advisory capability is configured at all
    #[error("No advisory capability configured")]
    NotConfigured,
}

/// Project persistence errors
#[derive(Error, Debug, Clone)]
pub enum PersistenceError {
    /// The project could not be written to the store
    #[error("Failed to save project: {reason}")]
    SaveFailed {
        /// Why the save failed.
        reason: String,
    },

    /// The project could not be read from the store
    #[error("Failed to load project {id}: {reason}")]
    LoadFailed {
        /// The project identifier.
        id: String,
        /// Why the load failed.
        reason: String,
    },

    /// The stored project shape could not be decoded
    #[error("Corrupt project data: {reason}")]
    Corrupt {
        /// The decoding failure message.
        reason: String,
    },
}

/// Main error type for plankit
///
/// A unified error that can represent any failure from all layers. This is
/// the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Placement precondition error
    #[error(transparent)]
    Placement(#[from] PlacementError),

    /// Import error
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Advisory error
    #[error(transparent)]
    Advisory(#[from] AdvisoryError),

    /// Persistence error
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a precondition error (user-correctable, no mutation
    /// occurred)
    pub fn is_precondition(&self) -> bool {
        matches!(self, Error::Placement(_))
    }

    /// Check if this is an advisory failure (degraded, never fatal)
    pub fn is_advisory_error(&self) -> bool {
        matches!(self, Error::Advisory(_))
    }

    /// Check if this is a persistence failure
    pub fn is_persistence_error(&self) -> bool {
        matches!(self, Error::Persistence(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
