//! # Sale Repository
//!
//! The persistence sink for finalized sales.
//!
//! ## Storage Model
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  SaleBuilder.checkout() ──► Sale (frozen)                         │
//! │       │                                                           │
//! │       ▼                                                           │
//! │  store(&sale)                                                     │
//! │    ├── INSERT INTO sales ........ header + totals                 │
//! │    └── INSERT INTO sale_items ... one row per line, `position`    │
//! │                                   preserves insertion order       │
//! │    (both inside ONE transaction - a sale is stored whole or       │
//! │     not at all)                                                   │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only terminal sales reach this repository; there is no UPDATE path.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;
use paws_core::{LineItem, PaymentMethod, Sale, SaleStatus};

/// Header columns of the `sales` table. Lines are loaded separately and
/// reattached in order.
#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    id: String,
    tutor_id: Option<String>,
    animal_id: Option<String>,
    subtotal_cents: i64,
    line_discount_cents: i64,
    discount_cents: i64,
    total_cents: i64,
    payment_method: Option<PaymentMethod>,
    status: SaleStatus,
    created_by: String,
    created_at: chrono::DateTime<chrono::Utc>,
    completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl SaleRow {
    fn into_sale(self, items: Vec<LineItem>) -> Sale {
        Sale {
            id: self.id,
            tutor_id: self.tutor_id,
            animal_id: self.animal_id,
            items,
            subtotal_cents: self.subtotal_cents,
            line_discount_cents: self.line_discount_cents,
            discount_cents: self.discount_cents,
            total_cents: self.total_cents,
            payment_method: self.payment_method,
            status: self.status,
            created_by: self.created_by,
            created_at: self.created_at,
            completed_at: self.completed_at,
        }
    }
}

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Stores a finalized sale and all its lines in one transaction.
    pub async fn store(&self, sale: &Sale) -> DbResult<()> {
        debug!(id = %sale.id, total = %sale.total_cents, "Storing sale");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, tutor_id, animal_id,
                subtotal_cents, line_discount_cents, discount_cents, total_cents,
                payment_method, status, created_by, created_at, completed_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.tutor_id)
        .bind(&sale.animal_id)
        .bind(sale.subtotal_cents)
        .bind(sale.line_discount_cents)
        .bind(sale.discount_cents)
        .bind(sale.total_cents)
        .bind(sale.payment_method)
        .bind(sale.status)
        .bind(&sale.created_by)
        .bind(sale.created_at)
        .bind(sale.completed_at)
        .execute(&mut *tx)
        .await?;

        for (position, line) in sale.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO sale_items (
                    sale_id, position, kind, item_id, name,
                    unit_price_cents, quantity, discount_cents, added_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
            )
            .bind(&sale.id)
            .bind(position as i64)
            .bind(line.kind)
            .bind(&line.item_id)
            .bind(&line.name)
            .bind(line.unit_price_cents)
            .bind(line.quantity)
            .bind(line.discount_cents)
            .bind(line.added_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(id = %sale.id, lines = sale.items.len(), status = ?sale.status, "Sale stored");
        Ok(())
    }

    /// Gets a sale with its lines, in insertion order.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let row = sqlx::query_as::<_, SaleRow>(
            r#"
            SELECT id, tutor_id, animal_id,
                   subtotal_cents, line_discount_cents, discount_cents, total_cents,
                   payment_method, status, created_by, created_at, completed_at
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = self.get_items(id).await?;
        Ok(Some(row.into_sale(items)))
    }

    /// Lists the most recent sales (with lines), newest first.
    pub async fn list_recent(&self, limit: u32) -> DbResult<Vec<Sale>> {
        let rows = sqlx::query_as::<_, SaleRow>(
            r#"
            SELECT id, tutor_id, animal_id,
                   subtotal_cents, line_discount_cents, discount_cents, total_cents,
                   payment_method, status, created_by, created_at, completed_at
            FROM sales
            ORDER BY created_at DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let mut sales = Vec::with_capacity(rows.len());
        for row in rows {
            let items = self.get_items(&row.id).await?;
            sales.push(row.into_sale(items));
        }

        Ok(sales)
    }

    /// Loads the lines of one sale, ordered by position.
    async fn get_items(&self, sale_id: &str) -> DbResult<Vec<LineItem>> {
        let items = sqlx::query_as::<_, LineItem>(
            r#"
            SELECT kind, item_id, name, unit_price_cents, quantity,
                   discount_cents, added_at
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY position
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;
    use paws_core::{CatalogItem, ItemKind, SaleBuilder, Tutor};
    use uuid::Uuid;

    fn catalog_item(kind: ItemKind, name: &str, price_cents: i64) -> CatalogItem {
        let now = Utc::now();
        CatalogItem {
            id: Uuid::new_v4().to_string(),
            kind,
            name: name.to_string(),
            description: None,
            price_cents,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    async fn seeded_tutor(db: &Database) -> Tutor {
        let tutor = Tutor {
            id: Uuid::new_v4().to_string(),
            name: "Ana Souza".to_string(),
            phone: None,
            email: None,
            created_at: Utc::now(),
        };
        db.customers().insert_tutor(&tutor).await.unwrap();
        tutor
    }

    fn completed_sale(tutor_id: &str) -> Sale {
        let mut builder = SaleBuilder::new("operator-1");
        builder.set_customer(tutor_id, None).unwrap();
        builder
            .add_item(&catalog_item(ItemKind::Service, "Consultation", 2500), 1)
            .unwrap();
        builder
            .add_item(&catalog_item(ItemKind::Product, "Dog Food 10kg", 1000), 2)
            .unwrap();
        builder.set_discount(500).unwrap();
        builder.checkout(PaymentMethod::Pix).unwrap()
    }

    #[tokio::test]
    async fn test_store_and_get_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let tutor = seeded_tutor(&db).await;

        let sale = completed_sale(&tutor.id);
        db.sales().store(&sale).await.unwrap();

        let found = db.sales().get_by_id(&sale.id).await.unwrap().unwrap();
        assert_eq!(found.status, SaleStatus::Completed);
        assert_eq!(found.payment_method, Some(PaymentMethod::Pix));
        assert_eq!(found.subtotal_cents, 4500);
        assert_eq!(found.discount_cents, 500);
        assert_eq!(found.total_cents, 4000);
        assert_eq!(found.tutor_id, Some(tutor.id));

        // Line order preserved
        assert_eq!(found.items.len(), 2);
        assert_eq!(found.items[0].name, "Consultation");
        assert_eq!(found.items[1].name, "Dog Food 10kg");
        assert_eq!(found.items[1].quantity, 2);
    }

    #[tokio::test]
    async fn test_get_missing_sale() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.sales().get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_storing_same_sale_twice_fails() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let tutor = seeded_tutor(&db).await;

        let sale = completed_sale(&tutor.id);
        db.sales().store(&sale).await.unwrap();
        assert!(db.sales().store(&sale).await.is_err());
    }

    #[tokio::test]
    async fn test_cancelled_sale_stored_without_payment() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let mut builder = SaleBuilder::new("operator-1");
        builder
            .add_item(&catalog_item(ItemKind::Product, "Cat Litter 4kg", 3200), 1)
            .unwrap();
        let sale = builder.cancel().unwrap();

        db.sales().store(&sale).await.unwrap();

        let found = db.sales().get_by_id(&sale.id).await.unwrap().unwrap();
        assert_eq!(found.status, SaleStatus::Cancelled);
        assert_eq!(found.payment_method, None);
        assert_eq!(found.tutor_id, None);
    }

    #[tokio::test]
    async fn test_list_recent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let tutor = seeded_tutor(&db).await;

        for _ in 0..3 {
            db.sales().store(&completed_sale(&tutor.id)).await.unwrap();
        }

        let recent = db.sales().list_recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].items.len(), 2);
    }
}
