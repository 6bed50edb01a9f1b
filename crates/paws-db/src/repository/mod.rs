//! # Repository Module
//!
//! Database repositories for Paws POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Session layer                                                    │
//! │       │  db.catalog().list_available(ItemKind::Service)           │
//! │       ▼                                                           │
//! │  CatalogRepository ── SQL ──► SQLite                              │
//! │                                                                   │
//! │  Benefits: SQL isolated in one place, repositories are cheap      │
//! │  clones over the shared pool, easy to mock behind traits.         │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CatalogRepository`](catalog::CatalogRepository) - products & services
//! - [`CustomerRepository`](customer::CustomerRepository) - tutors & animals
//! - [`SaleRepository`](sale::SaleRepository) - finalized sales

pub mod catalog;
pub mod customer;
pub mod sale;

pub use catalog::CatalogRepository;
pub use customer::CustomerRepository;
pub use sale::SaleRepository;
