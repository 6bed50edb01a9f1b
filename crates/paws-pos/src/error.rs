//! # Session Error Types
//!
//! ## Error Flow
//! ```text
//! CoreError (paws-core) ─┐
//! provider failures ─────┼──► PosError ──► caller / console frontend
//! sink failures ─────────┘
//! ```
//!
//! Provider and sink failures are non-retryable from the session's point
//! of view: they are surfaced once and the caller decides what to do.

use thiserror::Error;

use paws_core::CoreError;

/// Boxed error type used at the provider/sink seams, so any backend
/// (SQLite, in-memory, remote service) can satisfy the same contract.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum PosError {
    /// Business rule or validation failure from the sale builder.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The catalog provider failed (not "item missing" - that is a
    /// `CoreError::ItemNotFound`).
    #[error("Catalog provider failed: {0}")]
    Catalog(#[source] BoxError),

    /// The customer directory failed.
    #[error("Customer directory failed: {0}")]
    Directory(#[source] BoxError),

    /// The persistence sink rejected the finalized sale.
    #[error("Sale could not be stored: {0}")]
    Store(#[source] BoxError),
}

/// Result type for session operations.
pub type PosResult<T> = Result<T, PosError>;
