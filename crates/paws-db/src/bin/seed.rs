//! # Seed Data Generator
//!
//! Populates the database with a demo catalog and a couple of customers
//! for development.
//!
//! ## Usage
//! ```bash
//! # Default database path (./paws.db)
//! cargo run -p paws-db --bin seed
//!
//! # Specify database path
//! cargo run -p paws-db --bin seed -- --db ./data/paws.db
//! ```

use chrono::Utc;
use std::env;
use tracing::info;
use uuid::Uuid;

use paws_core::{Animal, CatalogItem, ItemKind, Tutor};
use paws_db::{Database, DbConfig, DbError};

/// Demo services offered by the clinic, (name, price in cents).
const SERVICES: &[(&str, i64)] = &[
    ("Consultation", 12000),
    ("Return Visit", 6000),
    ("V10 Vaccine", 9500),
    ("Rabies Vaccine", 7000),
    ("Bath & Groom - Small", 6500),
    ("Bath & Groom - Large", 9900),
    ("Nail Trim", 2500),
    ("Microchipping", 15000),
];

/// Demo shop products, (name, price in cents).
const PRODUCTS: &[(&str, i64)] = &[
    ("Premium Dog Food 10kg", 18990),
    ("Premium Cat Food 3kg", 9490),
    ("Flea & Tick Shampoo 500ml", 3590),
    ("Cat Litter 4kg", 2890),
    ("Rope Toy", 1990),
    ("Retractable Leash", 5490),
    ("Dental Treats 200g", 2490),
    ("Wormer Tablets", 4290),
];

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

#[tokio::main]
async fn main() -> Result<(), DbError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Minimal arg parsing: --db <path>
    let args: Vec<String> = env::args().collect();
    let db_path = args
        .iter()
        .position(|a| a == "--db")
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
        .unwrap_or("./paws.db");

    info!(path = %db_path, "Seeding database");

    let db = Database::new(DbConfig::new(db_path)).await?;
    let catalog = db.catalog();

    for (name, price) in SERVICES {
        catalog
            .insert(&catalog_item(ItemKind::Service, name, *price))
            .await?;
    }
    for (name, price) in PRODUCTS {
        catalog
            .insert(&catalog_item(ItemKind::Product, name, *price))
            .await?;
    }
    info!(
        services = SERVICES.len(),
        products = PRODUCTS.len(),
        "Catalog seeded"
    );

    let customers = db.customers();
    let now = Utc::now();

    let ana = Tutor {
        id: Uuid::new_v4().to_string(),
        name: "Ana Souza".to_string(),
        phone: Some("11 98888-1234".to_string()),
        email: Some("ana@example.com".to_string()),
        created_at: now,
    };
    customers.insert_tutor(&ana).await?;
    customers
        .insert_animal(&Animal {
            id: Uuid::new_v4().to_string(),
            tutor_id: ana.id.clone(),
            name: "Rex".to_string(),
            species: "dog".to_string(),
            breed: Some("Labrador".to_string()),
            created_at: now,
        })
        .await?;

    let bruno = Tutor {
        id: Uuid::new_v4().to_string(),
        name: "Bruno Lima".to_string(),
        phone: Some("11 97777-5678".to_string()),
        email: None,
        created_at: now,
    };
    customers.insert_tutor(&bruno).await?;
    customers
        .insert_animal(&Animal {
            id: Uuid::new_v4().to_string(),
            tutor_id: bruno.id.clone(),
            name: "Mia".to_string(),
            species: "cat".to_string(),
            breed: None,
            created_at: now,
        })
        .await?;

    info!("Tutors and animals seeded");
    info!("Done");

    Ok(())
}
