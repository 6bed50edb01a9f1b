//! # Provider Traits
//!
//! The seams between the sale flow and its collaborators. The session layer
//! is generic over these three traits, so the same flow runs against the
//! SQLite repositories (production), the in-memory backends (tests, demos),
//! or any future remote service.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  PosSession                                                       │
//! │    ├── CatalogProvider ...... where prices come from              │
//! │    ├── CustomerDirectory .... who the sale is for                 │
//! │    └── SaleSink ............. where finalized sales go            │
//! └───────────────────────────────────────────────────────────────────┘
//! ```

use paws_core::{Animal, CatalogItem, ItemKind, Sale, Tutor};

use crate::error::BoxError;

/// Read-only access to the sales catalog.
#[allow(async_fn_in_trait)]
pub trait CatalogProvider {
    /// Lists the active items of one kind.
    async fn list_available(&self, kind: ItemKind) -> Result<Vec<CatalogItem>, BoxError>;

    /// Looks up one item by (kind, id), whether active or not. Returns
    /// `None` for unknown ids; the builder decides what inactive means.
    async fn get(&self, kind: ItemKind, id: &str) -> Result<Option<CatalogItem>, BoxError>;
}

/// Read-only access to tutor and animal records.
#[allow(async_fn_in_trait)]
pub trait CustomerDirectory {
    /// Looks up a tutor by id.
    async fn find_tutor(&self, id: &str) -> Result<Option<Tutor>, BoxError>;

    /// Looks up an animal by id.
    async fn find_animal(&self, id: &str) -> Result<Option<Animal>, BoxError>;
}

/// Destination for finalized sales.
///
/// Called exactly once per sale, after checkout validation passes. A
/// failure is not retried by the session; it is surfaced to the caller.
#[allow(async_fn_in_trait)]
pub trait SaleSink {
    /// Stores a finalized (completed or cancelled) sale.
    async fn store(&self, sale: &Sale) -> Result<(), BoxError>;
}
