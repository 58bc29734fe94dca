use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::{Pet, PetInput};

use super::remove_stored_files;

/// Pet records, each tied to an owner
pub struct PetService {
    pool: PgPool,
}

impl PetService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_pets(&self) -> Result<Vec<Pet>, StoreError> {
        let pets = sqlx::query_as::<_, Pet>(
            r#"
            SELECT id, name, species, breed, owner_id, medical_history
            FROM pets
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(pets)
    }

    pub async fn create_pet(&self, input: PetInput) -> Result<Pet, StoreError> {
        sqlx::query_as::<_, Pet>(
            r#"
            INSERT INTO pets (name, species, breed, owner_id, medical_history)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, species, breed, owner_id, medical_history
            "#,
        )
        .bind(input.name)
        .bind(input.species)
        .bind(input.breed)
        .bind(input.owner_id)
        .bind(input.medical_history)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)
    }

    pub async fn get_pet(&self, id: i32) -> Result<Option<Pet>, StoreError> {
        let pet = sqlx::query_as::<_, Pet>(
            r#"
            SELECT id, name, species, breed, owner_id, medical_history
            FROM pets
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(pet)
    }

    pub async fn update_pet(&self, id: i32, input: PetInput) -> Result<Option<Pet>, StoreError> {
        sqlx::query_as::<_, Pet>(
            r#"
            UPDATE pets
            SET name = $1, species = $2, breed = $3, owner_id = $4, medical_history = $5
            WHERE id = $6
            RETURNING id, name, species, breed, owner_id, medical_history
            "#,
        )
        .bind(input.name)
        .bind(input.species)
        .bind(input.breed)
        .bind(input.owner_id)
        .bind(input.medical_history)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)
    }

    /// Delete pet `id` with its appointments and file records, then the
    /// record files on disk.
    pub async fn delete_pet(&self, id: i32) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;

        let file_paths: Vec<String> =
            sqlx::query_scalar("DELETE FROM file_records WHERE pet_id = $1 RETURNING file_path")
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;

        let result = sqlx::query("DELETE FROM pets WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        remove_stored_files(&file_paths).await;

        Ok(true)
    }
}
