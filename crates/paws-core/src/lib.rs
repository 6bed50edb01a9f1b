//! # paws-core: Pure Business Logic for Paws POS
//!
//! The heart of the Paws POS veterinary/pet-shop console: all sale logic as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                      Paws POS Architecture                        │
//! │                                                                   │
//! │  ┌─────────────────────────────────────────────────────────────┐ │
//! │  │                  Console Frontend (browser)                 │ │
//! │  │   Catalog UI ──► Cart UI ──► Customer UI ──► Checkout UI    │ │
//! │  └───────────────────────────┬─────────────────────────────────┘ │
//! │                              │                                   │
//! │  ┌───────────────────────────▼─────────────────────────────────┐ │
//! │  │                   paws-pos (PosSession)                     │ │
//! │  │   catalog lookups, customer verification, sale storage      │ │
//! │  └───────────────────────────┬─────────────────────────────────┘ │
//! │                              │                                   │
//! │  ┌───────────────────────────▼─────────────────────────────────┐ │
//! │  │               ★ paws-core (THIS CRATE) ★                    │ │
//! │  │                                                             │ │
//! │  │   ┌─────────┐  ┌─────────┐  ┌───────────┐  ┌────────────┐  │ │
//! │  │   │  types  │  │  money  │  │  builder  │  │ validation │  │ │
//! │  │   └─────────┘  └─────────┘  └───────────┘  └────────────┘  │ │
//! │  │                                                             │ │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS        │ │
//! │  └─────────────────────────────────────────────────────────────┘ │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CatalogItem, LineItem, Sale, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`builder`] - The SaleBuilder state machine
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use paws_core::{CatalogItem, ItemKind, PaymentMethod, SaleBuilder};
//!
//! let consult = CatalogItem {
//!     id: "650e8400-e29b-41d4-a716-446655440001".into(),
//!     kind: ItemKind::Service,
//!     name: "Consultation".into(),
//!     description: None,
//!     price_cents: 2500,
//!     is_active: true,
//!     created_at: Utc::now(),
//!     updated_at: Utc::now(),
//! };
//!
//! let mut builder = SaleBuilder::new("operator-1");
//! builder.set_customer("550e8400-e29b-41d4-a716-446655440000", None)?;
//! builder.add_item(&consult, 1)?;
//! assert_eq!(builder.totals().total_cents, 2500);
//!
//! let sale = builder.checkout(PaymentMethod::Pix)?;
//! assert_eq!(sale.total_cents, 2500);
//! # Ok::<(), paws_core::CoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod builder;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use builder::SaleBuilder;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of distinct lines in a single sale.
///
/// Keeps runaway carts out of the UI and receipts at a printable size.
pub const MAX_SALE_LINES: usize = 100;

/// Maximum quantity on a single line.
///
/// Catches typos like 1000 where 10 was meant.
pub const MAX_LINE_QUANTITY: i64 = 999;
