//! # Domain Types
//!
//! Core domain types for the Paws POS sale flow.
//!
//! ## Type Hierarchy
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                              │
//! │                                                                   │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐       │
//! │  │  CatalogItem  │   │   LineItem    │   │     Sale      │       │
//! │  │  ───────────  │   │  ───────────  │   │  ───────────  │       │
//! │  │  id (UUID)    │   │  (kind, id)   │   │  id (UUID)    │       │
//! │  │  kind         │   │  unit price   │   │  line items   │       │
//! │  │  price_cents  │   │  quantity     │   │  totals       │       │
//! │  │  is_active    │   │  discount     │   │  status       │       │
//! │  └───────────────┘   └───────────────┘   └───────────────┘       │
//! │                                                                   │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐       │
//! │  │   ItemKind    │   │  SaleStatus   │   │ PaymentMethod │       │
//! │  │  Product      │   │  Pending      │   │  Cash  Card   │       │
//! │  │  Service      │   │  Completed    │   │  Pix   Check  │       │
//! │  │               │   │  Cancelled    │   │               │       │
//! │  └───────────────┘   └───────────────┘   └───────────────┘       │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `LineItem` freezes the catalog name and unit price at the moment it is
//! added. Later catalog edits never retroactively alter an open sale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Item Kind
// =============================================================================

/// Whether a catalog entry is a physical product or a service.
///
/// A pet-shop sells both: food and medication are products, a consultation
/// or a bath-and-groom slot is a service. The pair (kind, id) is the unique
/// key of a sale line.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Physical inventory: food, medication, accessories.
    Product,
    /// Scheduled or on-the-spot services: consultation, vaccine, grooming.
    Service,
}

// =============================================================================
// Catalog Item
// =============================================================================

/// An entry in the sales catalog.
///
/// Immutable reference data from the sale builder's point of view: the
/// builder reads it, snapshots it, and never mutates it.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Product or service.
    pub kind: ItemKind,

    /// Display name shown to the operator and on the receipt.
    pub name: String,

    /// Optional longer description.
    pub description: Option<String>,

    /// Unit price in cents.
    pub price_cents: i64,

    /// Whether the item can currently be sold (soft delete).
    pub is_active: bool,

    /// When the item was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the item was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl CatalogItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Tutor & Animal
// =============================================================================

/// A customer record. The console's domain calls pet owners "tutors", and
/// every sale flow starts by selecting one.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Tutor {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// An animal (patient/pet) belonging to a tutor.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Animal {
    pub id: String,
    /// Owning tutor.
    pub tutor_id: String,
    pub name: String,
    /// "dog", "cat", "bird", ...
    pub species: String,
    pub breed: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Sale Status
// =============================================================================

/// The status of a sale.
///
/// State machine: `Pending → Completed` (checkout) or `Pending → Cancelled`
/// (cancel). Both `Completed` and `Cancelled` are terminal.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Sale is open: lines may be added, removed, discounted.
    Pending,
    /// Sale has been checked out and is immutable.
    Completed,
    /// Sale was cancelled and is immutable.
    Cancelled,
}

impl Default for SaleStatus {
    fn default() -> Self {
        SaleStatus::Pending
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a completed sale was paid.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash.
    Cash,
    /// Credit or debit card on an external terminal.
    Card,
    /// Instant bank transfer (Pix).
    Pix,
    /// Paper check.
    Check,
}

// =============================================================================
// Line Item
// =============================================================================

/// One line of an in-progress or finalized sale.
///
/// Uniquely keyed by `(kind, item_id)` within a sale. Name and unit price
/// are frozen at add time (snapshot pattern).
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Kind of the referenced catalog entry.
    pub kind: ItemKind,

    /// Catalog item id (UUID).
    pub item_id: String,

    /// Name at time of adding (frozen).
    pub name: String,

    /// Unit price in cents at time of adding (frozen).
    pub unit_price_cents: i64,

    /// Quantity, always >= 1.
    pub quantity: i64,

    /// Absolute discount on this line in cents, always >= 0 and never
    /// greater than the line subtotal.
    pub discount_cents: i64,

    /// When this line was added.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    /// Creates a line from a catalog item, snapshotting name and price.
    pub fn from_catalog(item: &CatalogItem, quantity: i64) -> Self {
        LineItem {
            kind: item.kind,
            item_id: item.id.clone(),
            name: item.name.clone(),
            unit_price_cents: item.price_cents,
            quantity,
            discount_cents: 0,
            added_at: Utc::now(),
        }
    }

    /// Checks whether this line matches a (kind, id) key.
    #[inline]
    pub fn matches(&self, kind: ItemKind, item_id: &str) -> bool {
        self.kind == kind && self.item_id == item_id
    }

    /// Line subtotal before discount: quantity × unit price.
    #[inline]
    pub fn line_subtotal_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }

    /// Line total after its own discount.
    #[inline]
    pub fn line_total_cents(&self) -> i64 {
        self.line_subtotal_cents() - self.discount_cents
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents())
    }
}

// =============================================================================
// Sale Totals
// =============================================================================

/// Derived totals for a set of sale lines. Pure computation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleTotals {
    /// Sum of line subtotals, before any discount.
    pub subtotal_cents: i64,
    /// Sum of per-line discounts.
    pub line_discount_cents: i64,
    /// Sale-level discount.
    pub discount_cents: i64,
    /// subtotal − line discounts − sale discount.
    pub total_cents: i64,
}

// =============================================================================
// Sale
// =============================================================================

/// A finalized sale record, produced by checkout or cancellation.
///
/// Once produced this value is never mutated; totals were recomputed from
/// the lines at the moment the sale left the `Pending` state.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    pub id: String,

    /// Selected tutor, required for completed sales.
    pub tutor_id: Option<String>,

    /// Optionally the specific animal the sale relates to.
    pub animal_id: Option<String>,

    /// Lines in insertion order.
    pub items: Vec<LineItem>,

    pub subtotal_cents: i64,
    pub line_discount_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,

    /// None for cancelled sales.
    pub payment_method: Option<PaymentMethod>,

    pub status: SaleStatus,

    /// Operator who created the sale.
    pub created_by: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the sale reached a terminal state.
    #[ts(as = "Option<String>")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Sale {
    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
