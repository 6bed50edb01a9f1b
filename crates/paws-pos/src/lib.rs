//! # paws-pos: Session Layer for Paws POS
//!
//! Wires the pure sale builder (paws-core) to its collaborators: the
//! catalog the prices come from, the directory the customer is verified
//! against, and the sink finalized sales are stored in.
//!
//! ## Architecture Position
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Console / frontend                                               │
//! │       │                                                           │
//! │       ▼                                                           │
//! │  ┌─────────────────────────────────────────────────────────────┐  │
//! │  │                  paws-pos (THIS CRATE)                      │  │
//! │  │                                                             │  │
//! │  │   PosSession ──► SaleBuilder (paws-core)                    │  │
//! │  │       │                                                     │  │
//! │  │       ├── CatalogProvider ──┬── store::*  (paws-db)         │  │
//! │  │       ├── CustomerDirectory ┤                               │  │
//! │  │       └── SaleSink ─────────┴── memory::* (tests, demos)    │  │
//! │  └─────────────────────────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use paws_db::{Database, DbConfig};
//! use paws_pos::{open_session, SessionContext};
//! use paws_core::{ItemKind, PaymentMethod};
//!
//! let db = Database::new(DbConfig::new("./paws.db")).await?;
//! let mut session = open_session(SessionContext::new("operator-1"), &db);
//!
//! session.select_customer(&tutor_id, None).await?;
//! session.add_item(ItemKind::Service, &consult_id, 1).await?;
//! let sale = session.checkout(PaymentMethod::Pix).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod memory;
pub mod provider;
pub mod session;
pub mod store;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{BoxError, PosError, PosResult};
pub use memory::{MemoryCatalog, MemoryDirectory, MemorySaleSink};
pub use provider::{CatalogProvider, CustomerDirectory, SaleSink};
pub use session::{PosSession, SessionContext};
pub use store::{open_session, DbSession};
