//! # POS Session
//!
//! One `PosSession` per open register screen: it owns the in-progress
//! `SaleBuilder` and wires it to the catalog, the customer directory, and
//! the persistence sink.
//!
//! ## Session Flow
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                        PosSession Flow                            │
//! │                                                                   │
//! │  SessionContext (operator) ──► PosSession::new                    │
//! │                                                                   │
//! │  select_customer(tutor, animal?) ── directory lookup ──► builder  │
//! │  add_item(kind, id, qty) ────────── catalog lookup ────► builder  │
//! │  remove_item / discounts ─────────────────────────────► builder   │
//! │                                                                   │
//! │  checkout(method)                                                 │
//! │    1. builder.checkout() ── validation, Pending → Completed       │
//! │    2. sink.store(sale) ──── called once, failure surfaced         │
//! │                                                                   │
//! │  cancel() ── Pending → Cancelled, record returned to caller       │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session is exclusively owned by the UI flow editing it; methods
//! take `&mut self` and there is no concurrent mutation path.

use tracing::{debug, info};

use paws_core::{
    CatalogItem, CoreError, ItemKind, PaymentMethod, Sale, SaleBuilder, SaleStatus, SaleTotals,
};

use crate::error::{PosError, PosResult};
use crate::provider::{CatalogProvider, CustomerDirectory, SaleSink};

// =============================================================================
// Session Context
// =============================================================================

/// Caller-owned session identity.
///
/// Whoever constructs the session decides which operator it belongs to,
/// and dropping the session is its teardown. There is no ambient
/// "current user" state.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Operator the session belongs to.
    pub user_id: String,
}

impl SessionContext {
    /// Creates a context for the given operator.
    pub fn new(user_id: impl Into<String>) -> Self {
        SessionContext {
            user_id: user_id.into(),
        }
    }
}

// =============================================================================
// POS Session
// =============================================================================

/// One in-progress sale, wired to its collaborators.
#[derive(Debug)]
pub struct PosSession<C, D, S> {
    ctx: SessionContext,
    catalog: C,
    directory: D,
    sink: S,
    builder: SaleBuilder,
}

impl<C, D, S> PosSession<C, D, S>
where
    C: CatalogProvider,
    D: CustomerDirectory,
    S: SaleSink,
{
    /// Opens a session with an empty pending sale.
    pub fn new(ctx: SessionContext, catalog: C, directory: D, sink: S) -> Self {
        let builder = SaleBuilder::new(ctx.user_id.clone());
        debug!(sale_id = %builder.id(), user = %ctx.user_id, "POS session opened");

        PosSession {
            ctx,
            catalog,
            directory,
            sink,
            builder,
        }
    }

    /// The operator context this session was opened with.
    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    /// The id of the sale being built.
    pub fn sale_id(&self) -> &str {
        self.builder.id()
    }

    /// Current sale status.
    pub fn status(&self) -> SaleStatus {
        self.builder.status()
    }

    /// Current lines, in insertion order.
    pub fn items(&self) -> &[paws_core::LineItem] {
        self.builder.items()
    }

    /// Current totals, recomputed from the lines.
    pub fn totals(&self) -> SaleTotals {
        self.builder.totals()
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Lists the active catalog items of one kind, for the picker UI.
    pub async fn available_items(&self, kind: ItemKind) -> PosResult<Vec<CatalogItem>> {
        self.catalog
            .list_available(kind)
            .await
            .map_err(PosError::Catalog)
    }

    // =========================================================================
    // Customer Selection
    // =========================================================================

    /// Selects the tutor (and optionally one of their animals) for this
    /// sale, verifying both against the directory.
    pub async fn select_customer(
        &mut self,
        tutor_id: &str,
        animal_id: Option<&str>,
    ) -> PosResult<()> {
        let tutor = self
            .directory
            .find_tutor(tutor_id)
            .await
            .map_err(PosError::Directory)?
            .ok_or_else(|| CoreError::TutorNotFound(tutor_id.to_string()))?;

        if let Some(animal_id) = animal_id {
            let animal = self
                .directory
                .find_animal(animal_id)
                .await
                .map_err(PosError::Directory)?
                .filter(|a| a.tutor_id == tutor.id)
                .ok_or_else(|| CoreError::AnimalNotFound(animal_id.to_string()))?;

            self.builder.set_customer(&tutor.id, Some(&animal.id))?;
        } else {
            self.builder.set_customer(&tutor.id, None)?;
        }

        debug!(sale_id = %self.builder.id(), tutor_id = %tutor_id, "Customer selected");
        Ok(())
    }

    // =========================================================================
    // Line Operations
    // =========================================================================

    /// Adds a catalog item to the sale, snapshotting its current price.
    ///
    /// Unknown ids fail with `ItemNotFound`, inactive items with
    /// `ItemInactive`; both leave the sale unchanged.
    pub async fn add_item(
        &mut self,
        kind: ItemKind,
        item_id: &str,
        quantity: i64,
    ) -> PosResult<SaleTotals> {
        let item = self
            .catalog
            .get(kind, item_id)
            .await
            .map_err(PosError::Catalog)?
            .ok_or_else(|| CoreError::ItemNotFound {
                kind,
                id: item_id.to_string(),
            })?;

        self.builder.add_item(&item, quantity)?;

        debug!(sale_id = %self.builder.id(), item = %item.name, quantity, "Item added");
        Ok(self.builder.totals())
    }

    /// Sets the quantity of an existing line; 0 removes it.
    pub fn set_quantity(
        &mut self,
        kind: ItemKind,
        item_id: &str,
        quantity: i64,
    ) -> PosResult<SaleTotals> {
        self.builder.set_quantity(kind, item_id, quantity)?;
        Ok(self.builder.totals())
    }

    /// Removes a line.
    pub fn remove_item(&mut self, kind: ItemKind, item_id: &str) -> PosResult<SaleTotals> {
        self.builder.remove_item(kind, item_id)?;
        Ok(self.builder.totals())
    }

    /// Sets the per-line discount of an existing line.
    pub fn set_line_discount(
        &mut self,
        kind: ItemKind,
        item_id: &str,
        discount_cents: i64,
    ) -> PosResult<SaleTotals> {
        self.builder
            .set_line_discount(kind, item_id, discount_cents)?;
        Ok(self.builder.totals())
    }

    /// Sets the sale-level discount.
    pub fn set_discount(&mut self, discount_cents: i64) -> PosResult<SaleTotals> {
        self.builder.set_discount(discount_cents)?;
        Ok(self.builder.totals())
    }

    // =========================================================================
    // Finalization
    // =========================================================================

    /// Checks out the sale and stores it through the sink.
    ///
    /// Validation failures (`EmptySale`, `MissingTutor`, second checkout)
    /// leave the sale as it was. A sink failure after a successful
    /// transition is surfaced as `PosError::Store` and is not retried.
    pub async fn checkout(&mut self, method: PaymentMethod) -> PosResult<Sale> {
        let sale = self.builder.checkout(method)?;

        self.sink.store(&sale).await.map_err(PosError::Store)?;

        info!(
            sale_id = %sale.id,
            total = %sale.total_cents,
            lines = sale.items.len(),
            method = ?method,
            "Sale completed"
        );
        Ok(sale)
    }

    /// Cancels the pending sale and returns the cancelled record.
    ///
    /// The record is returned, not stored: the sink only receives sales a
    /// customer actually paid for.
    pub fn cancel(&mut self) -> PosResult<Sale> {
        let sale = self.builder.cancel()?;

        info!(sale_id = %sale.id, "Sale cancelled");
        Ok(sale)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryCatalog, MemoryDirectory, MemorySaleSink};
    use paws_core::{Tutor, ValidationError};

    struct Fixture {
        catalog: MemoryCatalog,
        directory: MemoryDirectory,
        sink: MemorySaleSink,
        tutor: Tutor,
        food_id: String,
        consult_id: String,
    }

    fn fixture() -> Fixture {
        let mut catalog = MemoryCatalog::new();
        let food = catalog.add(ItemKind::Product, "Premium Dog Food 10kg", 1000);
        let consult = catalog.add(ItemKind::Service, "Consultation", 2500);

        let mut directory = MemoryDirectory::new();
        let tutor = directory.add_tutor("Ana Souza");

        Fixture {
            catalog,
            directory,
            sink: MemorySaleSink::new(),
            tutor,
            food_id: food.id,
            consult_id: consult.id,
        }
    }

    fn session(f: &Fixture) -> PosSession<MemoryCatalog, MemoryDirectory, MemorySaleSink> {
        PosSession::new(
            SessionContext::new("operator-1"),
            f.catalog.clone(),
            f.directory.clone(),
            f.sink.clone(),
        )
    }

    #[tokio::test]
    async fn test_full_sale_flow() {
        let f = fixture();
        let mut session = session(&f);

        session.select_customer(&f.tutor.id, None).await.unwrap();
        session
            .add_item(ItemKind::Product, &f.food_id, 2)
            .await
            .unwrap();
        let totals = session
            .add_item(ItemKind::Service, &f.consult_id, 1)
            .await
            .unwrap();
        assert_eq!(totals.subtotal_cents, 4500);

        session.set_discount(500).unwrap();

        let sale = session.checkout(PaymentMethod::Pix).await.unwrap();
        assert_eq!(sale.total_cents, 4000);
        assert_eq!(sale.status, SaleStatus::Completed);

        // Exactly one sale reached the sink
        assert_eq!(f.sink.len(), 1);
        assert_eq!(f.sink.stored()[0].id, sale.id);
    }

    #[tokio::test]
    async fn test_add_unknown_item_fails() {
        let f = fixture();
        let mut session = session(&f);

        let err = session
            .add_item(ItemKind::Product, "no-such-id", 1)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PosError::Core(CoreError::ItemNotFound { .. })
        ));
        assert!(session.items().is_empty());
    }

    #[tokio::test]
    async fn test_select_unknown_customer_fails() {
        let f = fixture();
        let mut session = session(&f);

        let err = session.select_customer("missing", None).await.unwrap_err();
        assert!(matches!(err, PosError::Core(CoreError::TutorNotFound(_))));
    }

    #[tokio::test]
    async fn test_animal_must_belong_to_tutor() {
        let mut f = fixture();
        let other = f.directory.add_tutor("Bruno Lima");
        let stray = f.directory.add_animal(&other.id, "Mia", "cat");
        let mut session = session(&f);

        let err = session
            .select_customer(&f.tutor.id, Some(&stray.id))
            .await
            .unwrap_err();
        assert!(matches!(err, PosError::Core(CoreError::AnimalNotFound(_))));
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_fails() {
        let f = fixture();
        let mut session = session(&f);
        session.select_customer(&f.tutor.id, None).await.unwrap();

        let err = session.checkout(PaymentMethod::Cash).await.unwrap_err();
        assert!(matches!(err, PosError::Core(CoreError::EmptySale)));
        assert_eq!(session.status(), SaleStatus::Pending);
        assert!(f.sink.is_empty());
    }

    #[tokio::test]
    async fn test_second_checkout_refused_and_not_restored() {
        let f = fixture();
        let mut session = session(&f);
        session.select_customer(&f.tutor.id, None).await.unwrap();
        session
            .add_item(ItemKind::Product, &f.food_id, 1)
            .await
            .unwrap();

        session.checkout(PaymentMethod::Card).await.unwrap();
        let err = session.checkout(PaymentMethod::Card).await.unwrap_err();
        assert!(matches!(err, PosError::Core(CoreError::SaleClosed { .. })));

        // Sink saw the sale exactly once
        assert_eq!(f.sink.len(), 1);
    }

    #[tokio::test]
    async fn test_sink_failure_is_surfaced() {
        let f = fixture();
        let mut session = PosSession::new(
            SessionContext::new("operator-1"),
            f.catalog.clone(),
            f.directory.clone(),
            MemorySaleSink::failing(),
        );

        session.select_customer(&f.tutor.id, None).await.unwrap();
        session
            .add_item(ItemKind::Product, &f.food_id, 1)
            .await
            .unwrap();

        let err = session.checkout(PaymentMethod::Cash).await.unwrap_err();
        assert!(matches!(err, PosError::Store(_)));
    }

    #[tokio::test]
    async fn test_line_discount_validation_via_session() {
        let f = fixture();
        let mut session = session(&f);
        session
            .add_item(ItemKind::Product, &f.food_id, 2)
            .await
            .unwrap();
        let before = session.totals();

        let err = session
            .set_line_discount(ItemKind::Product, &f.food_id, 5000)
            .unwrap_err();
        assert!(matches!(
            err,
            PosError::Core(CoreError::Validation(ValidationError::DiscountTooLarge { .. }))
        ));
        assert_eq!(session.totals(), before);
    }

    #[tokio::test]
    async fn test_cancel_does_not_store() {
        let f = fixture();
        let mut session = session(&f);
        session
            .add_item(ItemKind::Service, &f.consult_id, 1)
            .await
            .unwrap();

        let sale = session.cancel().unwrap();
        assert_eq!(sale.status, SaleStatus::Cancelled);
        assert!(f.sink.is_empty());
    }

    #[tokio::test]
    async fn test_available_items_for_picker() {
        let f = fixture();
        let session = session(&f);

        let services = session.available_items(ItemKind::Service).await.unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].name, "Consultation");
    }
}
