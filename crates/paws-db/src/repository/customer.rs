//! # Customer Repository
//!
//! Database operations for tutors and their animals.
//!
//! The console registers a tutor before anything else; animals always
//! belong to a tutor. The sale flow uses this repository to verify the
//! customer reference before attaching it to a sale.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use paws_core::{Animal, Tutor};

/// Repository for tutor and animal records.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Inserts a tutor.
    pub async fn insert_tutor(&self, tutor: &Tutor) -> DbResult<()> {
        debug!(id = %tutor.id, name = %tutor.name, "Inserting tutor");

        sqlx::query(
            r#"
            INSERT INTO tutors (id, name, phone, email, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&tutor.id)
        .bind(&tutor.name)
        .bind(&tutor.phone)
        .bind(&tutor.email)
        .bind(tutor.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Inserts an animal. The owning tutor must exist (FK).
    pub async fn insert_animal(&self, animal: &Animal) -> DbResult<()> {
        debug!(id = %animal.id, tutor_id = %animal.tutor_id, "Inserting animal");

        sqlx::query(
            r#"
            INSERT INTO animals (id, tutor_id, name, species, breed, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&animal.id)
        .bind(&animal.tutor_id)
        .bind(&animal.name)
        .bind(&animal.species)
        .bind(&animal.breed)
        .bind(animal.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a tutor by id.
    pub async fn get_tutor(&self, id: &str) -> DbResult<Option<Tutor>> {
        let tutor = sqlx::query_as::<_, Tutor>(
            r#"
            SELECT id, name, phone, email, created_at
            FROM tutors
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tutor)
    }

    /// Gets an animal by id.
    pub async fn get_animal(&self, id: &str) -> DbResult<Option<Animal>> {
        let animal = sqlx::query_as::<_, Animal>(
            r#"
            SELECT id, tutor_id, name, species, breed, created_at
            FROM animals
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(animal)
    }

    /// Lists the animals of one tutor, ordered by name.
    pub async fn list_animals(&self, tutor_id: &str) -> DbResult<Vec<Animal>> {
        let animals = sqlx::query_as::<_, Animal>(
            r#"
            SELECT id, tutor_id, name, species, breed, created_at
            FROM animals
            WHERE tutor_id = ?1
            ORDER BY name
            "#,
        )
        .bind(tutor_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(animals)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;
    use uuid::Uuid;

    fn tutor(name: &str) -> Tutor {
        Tutor {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            phone: Some("11 99999-0000".to_string()),
            email: None,
            created_at: Utc::now(),
        }
    }

    fn animal(tutor_id: &str, name: &str, species: &str) -> Animal {
        Animal {
            id: Uuid::new_v4().to_string(),
            tutor_id: tutor_id.to_string(),
            name: name.to_string(),
            species: species.to_string(),
            breed: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_tutor_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        let ana = tutor("Ana Souza");
        repo.insert_tutor(&ana).await.unwrap();

        let found = repo.get_tutor(&ana.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Ana Souza");

        assert!(repo.get_tutor("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_animals_belong_to_tutor() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        let ana = tutor("Ana Souza");
        repo.insert_tutor(&ana).await.unwrap();
        repo.insert_animal(&animal(&ana.id, "Rex", "dog"))
            .await
            .unwrap();
        repo.insert_animal(&animal(&ana.id, "Mia", "cat"))
            .await
            .unwrap();

        let animals = repo.list_animals(&ana.id).await.unwrap();
        assert_eq!(animals.len(), 2);
        // Ordered by name
        assert_eq!(animals[0].name, "Mia");
        assert_eq!(animals[1].name, "Rex");
    }

    #[tokio::test]
    async fn test_animal_requires_existing_tutor() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        let orphan = animal("no-such-tutor", "Rex", "dog");
        let err = repo.insert_animal(&orphan).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }
}
