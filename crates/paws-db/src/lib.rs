//! # paws-db: Database Layer for Paws POS
//!
//! SQLite persistence for the console: catalog, customers, finalized sales.
//!
//! ## Architecture Position
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  paws-pos (PosSession)                                            │
//! │       │                                                           │
//! │       ▼                                                           │
//! │  ┌─────────────────────────────────────────────────────────────┐  │
//! │  │                   paws-db (THIS CRATE)                      │  │
//! │  │                                                             │  │
//! │  │   ┌────────────┐   ┌──────────────────┐   ┌─────────────┐  │  │
//! │  │   │  Database  │   │   Repositories   │   │ Migrations  │  │  │
//! │  │   │ (pool.rs)  │◄──│ catalog/customer │   │ (embedded)  │  │  │
//! │  │   │ SqlitePool │   │ /sale            │   │ 001_init    │  │  │
//! │  │   └────────────┘   └──────────────────┘   └─────────────┘  │  │
//! │  └─────────────────────────────────────────────────────────────┘  │
//! │       │                                                           │
//! │       ▼                                                           │
//! │  SQLite file (WAL) or :memory: for tests                          │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use paws_db::{Database, DbConfig};
//! use paws_core::ItemKind;
//!
//! let db = Database::new(DbConfig::new("./paws.db")).await?;
//! let services = db.catalog().list_available(ItemKind::Service).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::{CatalogRepository, CustomerRepository, SaleRepository};
