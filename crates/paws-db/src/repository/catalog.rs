//! # Catalog Repository
//!
//! Database operations for catalog items (products and services).
//!
//! The sale flow only ever reads active items; deactivation is a soft
//! delete so historical sales keep valid references.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use paws_core::{CatalogItem, ItemKind};

/// Repository for catalog database operations.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Inserts a catalog item.
    pub async fn insert(&self, item: &CatalogItem) -> DbResult<()> {
        debug!(id = %item.id, name = %item.name, "Inserting catalog item");

        sqlx::query(
            r#"
            INSERT INTO catalog_items (
                id, kind, name, description, price_cents, is_active,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&item.id)
        .bind(item.kind)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price_cents)
        .bind(item.is_active)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a catalog item by (kind, id), active or not.
    pub async fn get_by_id(&self, kind: ItemKind, id: &str) -> DbResult<Option<CatalogItem>> {
        let item = sqlx::query_as::<_, CatalogItem>(
            r#"
            SELECT id, kind, name, description, price_cents, is_active,
                   created_at, updated_at
            FROM catalog_items
            WHERE kind = ?1 AND id = ?2
            "#,
        )
        .bind(kind)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Lists active items of one kind, ordered by name.
    pub async fn list_available(&self, kind: ItemKind) -> DbResult<Vec<CatalogItem>> {
        let items = sqlx::query_as::<_, CatalogItem>(
            r#"
            SELECT id, kind, name, description, price_cents, is_active,
                   created_at, updated_at
            FROM catalog_items
            WHERE kind = ?1 AND is_active = 1
            ORDER BY name
            "#,
        )
        .bind(kind)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Updates the price of a catalog item.
    ///
    /// Open sales are unaffected: lines snapshot the price at add time.
    pub async fn update_price(&self, kind: ItemKind, id: &str, price_cents: i64) -> DbResult<()> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE catalog_items
            SET price_cents = ?3, updated_at = ?4
            WHERE kind = ?1 AND id = ?2
            "#,
        )
        .bind(kind)
        .bind(id)
        .bind(price_cents)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Catalog item", id));
        }

        Ok(())
    }

    /// Deactivates a catalog item (soft delete).
    pub async fn deactivate(&self, kind: ItemKind, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deactivating catalog item");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE catalog_items
            SET is_active = 0, updated_at = ?3
            WHERE kind = ?1 AND id = ?2
            "#,
        )
        .bind(kind)
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Catalog item", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use uuid::Uuid;

    fn item(kind: ItemKind, name: &str, price_cents: i64) -> CatalogItem {
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

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.catalog();

        let consult = item(ItemKind::Service, "Consultation", 2500);
        repo.insert(&consult).await.unwrap();

        let found = repo
            .get_by_id(ItemKind::Service, &consult.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.name, "Consultation");
        assert_eq!(found.price_cents, 2500);
        assert!(found.is_active);

        // Same id under the other kind does not match
        assert!(repo
            .get_by_id(ItemKind::Product, &consult.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_list_available_filters_kind_and_active() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.catalog();

        let food = item(ItemKind::Product, "Dog Food 10kg", 12000);
        let bath = item(ItemKind::Service, "Bath & Groom", 8000);
        let old = item(ItemKind::Product, "Discontinued Toy", 500);

        repo.insert(&food).await.unwrap();
        repo.insert(&bath).await.unwrap();
        repo.insert(&old).await.unwrap();
        repo.deactivate(ItemKind::Product, &old.id).await.unwrap();

        let products = repo.list_available(ItemKind::Product).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, food.id);

        let services = repo.list_available(ItemKind::Service).await.unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].id, bath.id);
    }

    #[tokio::test]
    async fn test_update_price() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.catalog();

        let shampoo = item(ItemKind::Product, "Flea Shampoo", 1800);
        repo.insert(&shampoo).await.unwrap();
        repo.update_price(ItemKind::Product, &shampoo.id, 1990)
            .await
            .unwrap();

        let found = repo
            .get_by_id(ItemKind::Product, &shampoo.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.price_cents, 1990);
    }

    #[tokio::test]
    async fn test_deactivate_missing_item() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.catalog();

        let err = repo
            .deactivate(ItemKind::Service, "no-such-id")
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
