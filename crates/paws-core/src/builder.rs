//! # Sale Builder
//!
//! The working state of one in-progress sale: its line items, discounts,
//! customer selection, and the `Pending → Completed | Cancelled` state
//! machine.
//!
//! ## Operation Flow
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                     Sale Builder Operations                       │
//! │                                                                   │
//! │  Operator Action           Builder Call          State Change     │
//! │  ───────────────           ────────────          ────────────     │
//! │  Pick catalog item ──────► add_item()        ──► line added /     │
//! │                                                  quantity merged  │
//! │  Edit quantity ──────────► set_quantity()    ──► line updated     │
//! │  Remove line ────────────► remove_item()     ──► line removed     │
//! │  Line discount ──────────► set_line_discount()                    │
//! │  Sale discount ──────────► set_discount()                         │
//! │  Pick tutor/animal ──────► set_customer()                         │
//! │  Finish sale ────────────► checkout()        ──► Completed, Sale  │
//! │  Abort sale ─────────────► cancel()          ──► Cancelled, Sale  │
//! │                                                                   │
//! │  Every operation is all-or-nothing: a returned error means the    │
//! │  builder is exactly as it was before the call.                    │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Duplicate-add policy
//! Re-adding an existing (kind, id) increments that line's quantity rather
//! than creating a duplicate row.
//!
//! ## Totals invariant
//! Totals are never stored while the sale is open; `totals()` recomputes
//! them from the lines on every call. The sale-level discount is clamped
//! whenever a mutation shrinks the discountable subtotal below it, so
//! `total >= 0` holds at all times.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::types::{CatalogItem, ItemKind, LineItem, PaymentMethod, Sale, SaleStatus, SaleTotals};
use crate::validation::{validate_discount_cents, validate_quantity, validate_uuid};
use crate::{MAX_LINE_QUANTITY, MAX_SALE_LINES};

/// Builder for one in-progress sale.
///
/// Exclusively owned by the session editing it; all methods take `&mut self`
/// and run synchronously.
#[derive(Debug, Clone)]
pub struct SaleBuilder {
    id: String,
    tutor_id: Option<String>,
    animal_id: Option<String>,
    items: Vec<LineItem>,
    /// Sale-level discount in cents.
    discount_cents: i64,
    status: SaleStatus,
    created_by: String,
    created_at: DateTime<Utc>,
}

impl SaleBuilder {
    /// Starts an empty pending sale for the given operator.
    pub fn new(created_by: impl Into<String>) -> Self {
        SaleBuilder {
            id: Uuid::new_v4().to_string(),
            tutor_id: None,
            animal_id: None,
            items: Vec::new(),
            discount_cents: 0,
            status: SaleStatus::Pending,
            created_by: created_by.into(),
            created_at: Utc::now(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The sale id (assigned at creation, stable through checkout).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current status.
    pub fn status(&self) -> SaleStatus {
        self.status
    }

    /// Current lines, in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Selected tutor, if any.
    pub fn tutor_id(&self) -> Option<&str> {
        self.tutor_id.as_deref()
    }

    /// Selected animal, if any.
    pub fn animal_id(&self) -> Option<&str> {
        self.animal_id.as_deref()
    }

    /// True if the sale has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // =========================================================================
    // Customer Selection
    // =========================================================================

    /// Attaches a tutor (and optionally one of their animals) to the sale.
    ///
    /// Existence of the ids is verified by the session layer against the
    /// customer directory; the builder only checks the format.
    pub fn set_customer(
        &mut self,
        tutor_id: &str,
        animal_id: Option<&str>,
    ) -> CoreResult<()> {
        self.ensure_open()?;

        validate_uuid(tutor_id)?;
        if let Some(animal) = animal_id {
            validate_uuid(animal)?;
        }

        self.tutor_id = Some(tutor_id.to_string());
        self.animal_id = animal_id.map(str::to_string);
        Ok(())
    }

    /// Clears the customer selection.
    pub fn clear_customer(&mut self) -> CoreResult<()> {
        self.ensure_open()?;
        self.tutor_id = None;
        self.animal_id = None;
        Ok(())
    }

    // =========================================================================
    // Line Operations
    // =========================================================================

    /// Adds a catalog item to the sale.
    ///
    /// ## Behavior
    /// - Inactive items are rejected.
    /// - An existing (kind, id) line has its quantity incremented.
    /// - A new line snapshots name and unit price from the catalog, so
    ///   later catalog price changes never alter this sale.
    pub fn add_item(&mut self, item: &CatalogItem, quantity: i64) -> CoreResult<()> {
        self.ensure_open()?;
        validate_quantity(quantity)?;

        if !item.is_active {
            return Err(CoreError::ItemInactive {
                name: item.name.clone(),
            });
        }

        if let Some(line) = self
            .items
            .iter_mut()
            .find(|l| l.matches(item.kind, &item.id))
        {
            let new_qty = line.quantity + quantity;
            if new_qty > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_LINE_QUANTITY,
                });
            }
            line.quantity = new_qty;
            return Ok(());
        }

        if self.items.len() >= MAX_SALE_LINES {
            return Err(CoreError::TooManyLines {
                max: MAX_SALE_LINES,
            });
        }

        self.items.push(LineItem::from_catalog(item, quantity));
        Ok(())
    }

    /// Sets the quantity of an existing line directly.
    ///
    /// A quantity of 0 removes the line.
    pub fn set_quantity(&mut self, kind: ItemKind, item_id: &str, quantity: i64) -> CoreResult<()> {
        self.ensure_open()?;

        if quantity == 0 {
            return self.remove_item(kind, item_id);
        }
        validate_quantity(quantity)?;

        let line = self
            .items
            .iter_mut()
            .find(|l| l.matches(kind, item_id))
            .ok_or_else(|| CoreError::LineNotFound {
                kind,
                id: item_id.to_string(),
            })?;

        // Shrinking the line must not leave its discount above the new
        // subtotal; reject before mutating.
        let new_subtotal = line.unit_price_cents * quantity;
        validate_discount_cents(line.discount_cents, new_subtotal)?;

        line.quantity = quantity;
        self.clamp_sale_discount();
        Ok(())
    }

    /// Removes the line with the given (kind, id) key.
    ///
    /// Fails with `LineNotFound` if the line is absent.
    pub fn remove_item(&mut self, kind: ItemKind, item_id: &str) -> CoreResult<()> {
        self.ensure_open()?;

        let pos = self
            .items
            .iter()
            .position(|l| l.matches(kind, item_id))
            .ok_or_else(|| CoreError::LineNotFound {
                kind,
                id: item_id.to_string(),
            })?;

        self.items.remove(pos);
        self.clamp_sale_discount();
        Ok(())
    }

    /// Sets the per-line discount on an existing line.
    ///
    /// The discount must be >= 0 and no greater than that line's subtotal.
    pub fn set_line_discount(
        &mut self,
        kind: ItemKind,
        item_id: &str,
        discount_cents: i64,
    ) -> CoreResult<()> {
        self.ensure_open()?;

        let line = self
            .items
            .iter_mut()
            .find(|l| l.matches(kind, item_id))
            .ok_or_else(|| CoreError::LineNotFound {
                kind,
                id: item_id.to_string(),
            })?;

        validate_discount_cents(discount_cents, line.line_subtotal_cents())?;

        line.discount_cents = discount_cents;
        self.clamp_sale_discount();
        Ok(())
    }

    /// Sets the sale-level discount.
    ///
    /// Limited by the subtotal after per-line discounts, keeping the grand
    /// total non-negative.
    pub fn set_discount(&mut self, discount_cents: i64) -> CoreResult<()> {
        self.ensure_open()?;

        validate_discount_cents(discount_cents, self.discountable_cents())?;
        self.discount_cents = discount_cents;
        Ok(())
    }

    // =========================================================================
    // Totals
    // =========================================================================

    /// Recomputes totals from the current lines.
    ///
    /// Pure and deterministic: same lines, same result, no side effects.
    pub fn totals(&self) -> SaleTotals {
        let subtotal_cents: i64 = self.items.iter().map(|l| l.line_subtotal_cents()).sum();
        let line_discount_cents: i64 = self.items.iter().map(|l| l.discount_cents).sum();

        SaleTotals {
            subtotal_cents,
            line_discount_cents,
            discount_cents: self.discount_cents,
            total_cents: subtotal_cents - line_discount_cents - self.discount_cents,
        }
    }

    // =========================================================================
    // State Transitions
    // =========================================================================

    /// Completes the sale.
    ///
    /// ## Failure (nothing changes)
    /// - `EmptySale` if there are no lines
    /// - `MissingTutor` if no tutor was selected
    /// - `SaleClosed` if the sale already left Pending (a second checkout
    ///   call lands here)
    ///
    /// ## Success
    /// Transitions Pending → Completed exactly once and returns the frozen
    /// `Sale` record for the persistence sink.
    pub fn checkout(&mut self, method: PaymentMethod) -> CoreResult<Sale> {
        self.ensure_open()?;

        if self.items.is_empty() {
            return Err(CoreError::EmptySale);
        }
        if self.tutor_id.is_none() {
            return Err(CoreError::MissingTutor);
        }

        self.status = SaleStatus::Completed;
        Ok(self.freeze(Some(method)))
    }

    /// Cancels the sale.
    ///
    /// Allowed on any pending sale, including an empty one. Terminal: no
    /// totals recomputation or mutation afterwards.
    pub fn cancel(&mut self) -> CoreResult<Sale> {
        self.ensure_open()?;

        self.status = SaleStatus::Cancelled;
        Ok(self.freeze(None))
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    /// Subtotal after per-line discounts: the cap for the sale discount.
    fn discountable_cents(&self) -> i64 {
        self.items.iter().map(|l| l.line_total_cents()).sum()
    }

    /// Keeps `discount <= discountable subtotal` after a mutation shrank
    /// the lines.
    fn clamp_sale_discount(&mut self) {
        let limit = self.discountable_cents();
        if self.discount_cents > limit {
            self.discount_cents = limit;
        }
    }

    fn ensure_open(&self) -> CoreResult<()> {
        if self.status != SaleStatus::Pending {
            return Err(CoreError::SaleClosed {
                status: self.status,
            });
        }
        Ok(())
    }

    /// Produces the immutable sale record for the current state.
    fn freeze(&self, payment_method: Option<PaymentMethod>) -> Sale {
        let totals = self.totals();

        Sale {
            id: self.id.clone(),
            tutor_id: self.tutor_id.clone(),
            animal_id: self.animal_id.clone(),
            items: self.items.clone(),
            subtotal_cents: totals.subtotal_cents,
            line_discount_cents: totals.line_discount_cents,
            discount_cents: totals.discount_cents,
            total_cents: totals.total_cents,
            payment_method,
            status: self.status,
            created_by: self.created_by.clone(),
            created_at: self.created_at,
            completed_at: Some(Utc::now()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use chrono::Utc;

    const TUTOR: &str = "550e8400-e29b-41d4-a716-446655440000";

    fn catalog_item(id: &str, kind: ItemKind, price_cents: i64) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            kind,
            name: format!("Item {id}"),
            description: None,
            price_cents,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn product(id: &str, price_cents: i64) -> CatalogItem {
        catalog_item(id, ItemKind::Product, price_cents)
    }

    fn service(id: &str, price_cents: i64) -> CatalogItem {
        catalog_item(id, ItemKind::Service, price_cents)
    }

    #[test]
    fn test_worked_example_from_console() {
        // product 10.00 x2 + service 25.00 x1 → subtotal 45.00,
        // sale discount 5.00 → total 40.00
        let mut builder = SaleBuilder::new("operator-1");
        builder.add_item(&product("a", 1000), 2).unwrap();
        builder.add_item(&service("b", 2500), 1).unwrap();

        assert_eq!(builder.totals().subtotal_cents, 4500);

        builder.set_discount(500).unwrap();
        assert_eq!(builder.totals().total_cents, 4000);
    }

    #[test]
    fn test_subtotal_matches_independent_sum() {
        let mut builder = SaleBuilder::new("operator-1");
        builder.add_item(&product("a", 999), 3).unwrap();
        builder.add_item(&service("b", 4500), 1).unwrap();
        builder.add_item(&product("c", 120), 7).unwrap();
        builder.remove_item(ItemKind::Product, "a").unwrap();

        let independent: i64 = builder
            .items()
            .iter()
            .map(|l| l.unit_price_cents * l.quantity)
            .sum();
        assert_eq!(builder.totals().subtotal_cents, independent);
    }

    #[test]
    fn test_add_then_remove_round_trips_totals() {
        let mut builder = SaleBuilder::new("operator-1");
        builder.add_item(&product("a", 1000), 2).unwrap();
        let before = builder.totals();

        builder.add_item(&service("b", 2500), 1).unwrap();
        builder.remove_item(ItemKind::Service, "b").unwrap();

        assert_eq!(builder.totals(), before);
    }

    #[test]
    fn test_readding_same_item_merges_quantity() {
        let mut builder = SaleBuilder::new("operator-1");
        let item = product("a", 999);

        builder.add_item(&item, 2).unwrap();
        builder.add_item(&item, 3).unwrap();

        assert_eq!(builder.items().len(), 1);
        assert_eq!(builder.items()[0].quantity, 5);
    }

    #[test]
    fn test_same_id_different_kind_is_separate_line() {
        let mut builder = SaleBuilder::new("operator-1");
        builder.add_item(&product("a", 1000), 1).unwrap();
        builder.add_item(&service("a", 2500), 1).unwrap();

        assert_eq!(builder.items().len(), 2);
    }

    #[test]
    fn test_add_rejects_bad_quantity_and_inactive() {
        let mut builder = SaleBuilder::new("operator-1");

        let err = builder.add_item(&product("a", 1000), 0).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let mut inactive = product("b", 1000);
        inactive.is_active = false;
        let err = builder.add_item(&inactive, 1).unwrap_err();
        assert!(matches!(err, CoreError::ItemInactive { .. }));

        assert!(builder.is_empty());
    }

    #[test]
    fn test_remove_missing_line_fails() {
        let mut builder = SaleBuilder::new("operator-1");
        let err = builder.remove_item(ItemKind::Product, "nope").unwrap_err();
        assert!(matches!(err, CoreError::LineNotFound { .. }));
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut builder = SaleBuilder::new("operator-1");
        builder.add_item(&product("a", 1000), 2).unwrap();
        builder.set_quantity(ItemKind::Product, "a", 0).unwrap();

        assert!(builder.is_empty());
        assert_eq!(builder.totals().subtotal_cents, 0);
    }

    #[test]
    fn test_line_discount_above_line_subtotal_rejected() {
        let mut builder = SaleBuilder::new("operator-1");
        builder.add_item(&product("a", 1000), 2).unwrap();
        let before = builder.totals();

        let err = builder
            .set_line_discount(ItemKind::Product, "a", 2001)
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::DiscountTooLarge { .. })
        ));
        // state unchanged
        assert_eq!(builder.totals(), before);
    }

    #[test]
    fn test_line_discount_applies_to_total() {
        let mut builder = SaleBuilder::new("operator-1");
        builder.add_item(&product("a", 1000), 2).unwrap();
        builder
            .set_line_discount(ItemKind::Product, "a", 300)
            .unwrap();

        let totals = builder.totals();
        assert_eq!(totals.subtotal_cents, 2000);
        assert_eq!(totals.line_discount_cents, 300);
        assert_eq!(totals.total_cents, 1700);
    }

    #[test]
    fn test_sale_discount_clamped_when_lines_shrink() {
        let mut builder = SaleBuilder::new("operator-1");
        builder.add_item(&product("a", 1000), 2).unwrap();
        builder.add_item(&service("b", 500), 1).unwrap();
        builder.set_discount(2200).unwrap();

        builder.remove_item(ItemKind::Product, "a").unwrap();

        let totals = builder.totals();
        assert_eq!(totals.subtotal_cents, 500);
        assert_eq!(totals.discount_cents, 500);
        assert_eq!(totals.total_cents, 0);
    }

    #[test]
    fn test_checkout_empty_sale_fails_without_status_change() {
        let mut builder = SaleBuilder::new("operator-1");
        builder.set_customer(TUTOR, None).unwrap();

        let err = builder.checkout(PaymentMethod::Cash).unwrap_err();
        assert!(matches!(err, CoreError::EmptySale));
        assert_eq!(builder.status(), SaleStatus::Pending);
    }

    #[test]
    fn test_checkout_requires_tutor() {
        let mut builder = SaleBuilder::new("operator-1");
        builder.add_item(&product("a", 1000), 1).unwrap();

        let err = builder.checkout(PaymentMethod::Pix).unwrap_err();
        assert!(matches!(err, CoreError::MissingTutor));
        assert_eq!(builder.status(), SaleStatus::Pending);
    }

    #[test]
    fn test_checkout_completes_exactly_once() {
        let mut builder = SaleBuilder::new("operator-1");
        builder.set_customer(TUTOR, None).unwrap();
        builder.add_item(&product("a", 1000), 2).unwrap();

        let sale = builder.checkout(PaymentMethod::Card).unwrap();
        assert_eq!(sale.status, SaleStatus::Completed);
        assert_eq!(sale.payment_method, Some(PaymentMethod::Card));
        assert_eq!(sale.total_cents, 2000);
        assert_eq!(sale.tutor_id.as_deref(), Some(TUTOR));
        assert!(sale.completed_at.is_some());

        // Second checkout refuses, does not re-complete
        let err = builder.checkout(PaymentMethod::Card).unwrap_err();
        assert!(matches!(err, CoreError::SaleClosed { .. }));
    }

    #[test]
    fn test_completed_sale_rejects_mutation() {
        let mut builder = SaleBuilder::new("operator-1");
        builder.set_customer(TUTOR, None).unwrap();
        builder.add_item(&product("a", 1000), 1).unwrap();
        builder.checkout(PaymentMethod::Cash).unwrap();

        assert!(matches!(
            builder.add_item(&product("b", 500), 1),
            Err(CoreError::SaleClosed { .. })
        ));
        assert!(matches!(
            builder.set_discount(100),
            Err(CoreError::SaleClosed { .. })
        ));
        assert!(matches!(
            builder.cancel(),
            Err(CoreError::SaleClosed { .. })
        ));
    }

    #[test]
    fn test_cancel_is_terminal() {
        let mut builder = SaleBuilder::new("operator-1");
        builder.add_item(&product("a", 1000), 1).unwrap();

        let sale = builder.cancel().unwrap();
        assert_eq!(sale.status, SaleStatus::Cancelled);
        assert_eq!(sale.payment_method, None);

        assert!(matches!(
            builder.checkout(PaymentMethod::Cash),
            Err(CoreError::SaleClosed { .. })
        ));
    }

    #[test]
    fn test_frozen_sale_preserves_insertion_order() {
        let mut builder = SaleBuilder::new("operator-1");
        builder.set_customer(TUTOR, None).unwrap();
        builder.add_item(&service("b", 2500), 1).unwrap();
        builder.add_item(&product("a", 1000), 2).unwrap();
        builder.add_item(&product("c", 300), 1).unwrap();

        let sale = builder.checkout(PaymentMethod::Check).unwrap();
        let ids: Vec<&str> = sale.items.iter().map(|l| l.item_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_max_lines_enforced() {
        let mut builder = SaleBuilder::new("operator-1");
        for i in 0..MAX_SALE_LINES {
            builder.add_item(&product(&format!("p{i}"), 100), 1).unwrap();
        }

        let err = builder.add_item(&product("overflow", 100), 1).unwrap_err();
        assert!(matches!(err, CoreError::TooManyLines { .. }));
    }

    #[test]
    fn test_merge_cannot_exceed_max_quantity() {
        let mut builder = SaleBuilder::new("operator-1");
        let item = product("a", 100);
        builder.add_item(&item, 900).unwrap();

        let err = builder.add_item(&item, 100).unwrap_err();
        assert!(matches!(err, CoreError::QuantityTooLarge { .. }));
        assert_eq!(builder.items()[0].quantity, 900);
    }
}
