//! # SQLite Backends
//!
//! Provider implementations backed by the paws-db repositories. Each impl
//! is a thin delegation: the repository already speaks the domain types,
//! and `?` boxes the `DbError` into the seam's `BoxError`.

use paws_core::{Animal, CatalogItem, ItemKind, Sale, Tutor};
use paws_db::{CatalogRepository, CustomerRepository, Database, SaleRepository};

use crate::error::BoxError;
use crate::provider::{CatalogProvider, CustomerDirectory, SaleSink};
use crate::session::{PosSession, SessionContext};

impl CatalogProvider for CatalogRepository {
    async fn list_available(&self, kind: ItemKind) -> Result<Vec<CatalogItem>, BoxError> {
        Ok(CatalogRepository::list_available(self, kind).await?)
    }

    async fn get(&self, kind: ItemKind, id: &str) -> Result<Option<CatalogItem>, BoxError> {
        Ok(self.get_by_id(kind, id).await?)
    }
}

impl CustomerDirectory for CustomerRepository {
    async fn find_tutor(&self, id: &str) -> Result<Option<Tutor>, BoxError> {
        Ok(self.get_tutor(id).await?)
    }

    async fn find_animal(&self, id: &str) -> Result<Option<Animal>, BoxError> {
        Ok(self.get_animal(id).await?)
    }
}

impl SaleSink for SaleRepository {
    async fn store(&self, sale: &Sale) -> Result<(), BoxError> {
        Ok(SaleRepository::store(self, sale).await?)
    }
}

/// A session wired entirely to one SQLite database.
pub type DbSession = PosSession<CatalogRepository, CustomerRepository, SaleRepository>;

/// Opens a session against a database, using its repositories for all
/// three seams.
pub fn open_session(ctx: SessionContext, db: &Database) -> DbSession {
    PosSession::new(ctx, db.catalog(), db.customers(), db.sales())
}

// =============================================================================
// Integration Tests
// =============================================================================
