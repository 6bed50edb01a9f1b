//! # Error Types
//!
//! Domain-specific error types for paws-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                          Error Types                              │
//! │                                                                   │
//! │  paws-core errors (this file)                                     │
//! │  ├── CoreError        - business rule violations                  │
//! │  └── ValidationError  - input validation failures                 │
//! │                                                                   │
//! │  paws-db errors (separate crate)                                  │
//! │  └── DbError          - database operation failures               │
//! │                                                                   │
//! │  paws-pos errors (session crate)                                  │
//! │  └── PosError         - core + provider/sink failures             │
//! │                                                                   │
//! │  Flow: ValidationError → CoreError → PosError → caller            │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All errors are raised synchronously to the caller; none are retried or
//! swallowed. A failed builder operation leaves the sale unchanged.

use thiserror::Error;

use crate::types::{ItemKind, SaleStatus};

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations in the sale flow.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Catalog item does not exist (or was soft-deleted).
    #[error("Catalog item not found: {kind:?} {id}")]
    ItemNotFound { kind: ItemKind, id: String },

    /// Catalog item exists but is inactive and cannot be sold.
    #[error("Catalog item '{name}' is inactive")]
    ItemInactive { name: String },

    /// No line with the given (kind, id) key in the sale.
    #[error("Line not found in sale: {kind:?} {id}")]
    LineNotFound { kind: ItemKind, id: String },

    /// Tutor record does not exist.
    #[error("Tutor not found: {0}")]
    TutorNotFound(String),

    /// Animal record does not exist or belongs to another tutor.
    #[error("Animal not found for tutor: {0}")]
    AnimalNotFound(String),

    /// Checkout attempted on a sale with no lines.
    #[error("Cannot complete a sale with no items")]
    EmptySale,

    /// Checkout attempted before a tutor was selected.
    #[error("A tutor must be selected before checkout")]
    MissingTutor,

    /// Operation attempted on a sale that already left the Pending state.
    #[error("Sale is {status:?}, no further changes allowed")]
    SaleClosed { status: SaleStatus },

    /// Sale has reached the maximum number of distinct lines.
    #[error("Sale cannot have more than {max} lines")]
    TooManyLines { max: usize },

    /// A line quantity would exceed the allowed maximum.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Input validation failure (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before business logic runs; the caller corrects the input and
/// retries.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// A discount exceeds what it can be applied against.
    #[error("Discount of {discount_cents} cents exceeds limit of {limit_cents} cents")]
    DiscountTooLarge { discount_cents: i64, limit_cents: i64 },

    /// Invalid format (e.g. malformed UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
