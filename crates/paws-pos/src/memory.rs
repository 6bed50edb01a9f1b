//! # In-Memory Backends
//!
//! Provider implementations backed by plain collections. Used by tests and
//! demos.
//!
//! `MemorySaleSink` records every stored sale behind a mutex so tests can
//! assert on what reached the sink, and can be flipped into a failing mode
//! to exercise the store-failure path.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use paws_core::{Animal, CatalogItem, ItemKind, Sale, Tutor};

use crate::error::BoxError;
use crate::provider::{CatalogProvider, CustomerDirectory, SaleSink};

// =============================================================================
// Catalog
// =============================================================================

/// Fixed in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    items: Vec<CatalogItem>,
}

impl MemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pre-built item.
    pub fn push(&mut self, item: CatalogItem) {
        self.items.push(item);
    }

    /// Creates and adds an active item, returning it.
    pub fn add(&mut self, kind: ItemKind, name: &str, price_cents: i64) -> CatalogItem {
        let now = Utc::now();
        let item = CatalogItem {
            id: Uuid::new_v4().to_string(),
            kind,
            name: name.to_string(),
            description: None,
            price_cents,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.items.push(item.clone());
        item
    }
}

impl CatalogProvider for MemoryCatalog {
    async fn list_available(&self, kind: ItemKind) -> Result<Vec<CatalogItem>, BoxError> {
        Ok(self
            .items
            .iter()
            .filter(|i| i.kind == kind && i.is_active)
            .cloned()
            .collect())
    }

    async fn get(&self, kind: ItemKind, id: &str) -> Result<Option<CatalogItem>, BoxError> {
        Ok(self
            .items
            .iter()
            .find(|i| i.kind == kind && i.id == id)
            .cloned())
    }
}

// =============================================================================
// Customer Directory
// =============================================================================

/// Fixed in-memory tutor/animal directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    tutors: Vec<Tutor>,
    animals: Vec<Animal>,
}

impl MemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates and adds a tutor, returning it.
    pub fn add_tutor(&mut self, name: &str) -> Tutor {
        let tutor = Tutor {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            phone: None,
            email: None,
            created_at: Utc::now(),
        };
        self.tutors.push(tutor.clone());
        tutor
    }

    /// Creates and adds an animal for a tutor, returning it.
    pub fn add_animal(&mut self, tutor_id: &str, name: &str, species: &str) -> Animal {
        let animal = Animal {
            id: Uuid::new_v4().to_string(),
            tutor_id: tutor_id.to_string(),
            name: name.to_string(),
            species: species.to_string(),
            breed: None,
            created_at: Utc::now(),
        };
        self.animals.push(animal.clone());
        animal
    }
}

impl CustomerDirectory for MemoryDirectory {
    async fn find_tutor(&self, id: &str) -> Result<Option<Tutor>, BoxError> {
        Ok(self.tutors.iter().find(|t| t.id == id).cloned())
    }

    async fn find_animal(&self, id: &str) -> Result<Option<Animal>, BoxError> {
        Ok(self.animals.iter().find(|a| a.id == id).cloned())
    }
}

// =============================================================================
// Sale Sink
// =============================================================================

/// Recording sale sink.
///
/// `Arc<Mutex<..>>` so a clone handed to a session and the copy kept by a
/// test observe the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemorySaleSink {
    stored: Arc<Mutex<Vec<Sale>>>,
    fail: bool,
}

impl MemorySaleSink {
    /// Creates an empty, accepting sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink whose `store` always fails.
    pub fn failing() -> Self {
        MemorySaleSink {
            stored: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    /// Snapshot of everything stored so far.
    pub fn stored(&self) -> Vec<Sale> {
        self.stored.lock().expect("sink mutex poisoned").clone()
    }

    /// Number of stored sales.
    pub fn len(&self) -> usize {
        self.stored.lock().expect("sink mutex poisoned").len()
    }

    /// True if nothing was stored yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SaleSink for MemorySaleSink {
    async fn store(&self, sale: &Sale) -> Result<(), BoxError> {
        if self.fail {
            return Err("sink unavailable".into());
        }
        self.stored
            .lock()
            .expect("sink mutex poisoned")
            .push(sale.clone());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_catalog_filters() {
        let mut catalog = MemoryCatalog::new();
        let food = catalog.add(ItemKind::Product, "Dog Food", 12000);
        let now = Utc::now();
        let old = CatalogItem {
            id: Uuid::new_v4().to_string(),
            kind: ItemKind::Product,
            name: "Old Toy".to_string(),
            description: None,
            price_cents: 500,
            is_active: false,
            created_at: now,
            updated_at: now,
        };
        catalog.push(old.clone());
        catalog.add(ItemKind::Service, "Bath", 6500);

        let products = catalog.list_available(ItemKind::Product).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, food.id);

        // get returns inactive items too
        assert!(catalog
            .get(ItemKind::Product, &old.id)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_memory_directory_lookup() {
        let mut dir = MemoryDirectory::new();
        let ana = dir.add_tutor("Ana");
        let rex = dir.add_animal(&ana.id, "Rex", "dog");

        assert!(dir.find_tutor(&ana.id).await.unwrap().is_some());
        assert!(dir.find_tutor("missing").await.unwrap().is_none());
        assert_eq!(
            dir.find_animal(&rex.id).await.unwrap().unwrap().tutor_id,
            ana.id
        );
    }

    #[tokio::test]
    async fn test_failing_sink() {
        let sink = MemorySaleSink::failing();
        let mut builder = paws_core::SaleBuilder::new("op");
        let sale = builder.cancel().unwrap();

        assert!(sink.store(&sale).await.is_err());
        assert!(sink.is_empty());
    }
}
