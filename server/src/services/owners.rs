use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::{Owner, OwnerInput};

use super::remove_stored_files;

pub struct OwnerService {
    pool: PgPool,
}

impl OwnerService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_owners(&self) -> Result<Vec<Owner>, StoreError> {
        let owners = sqlx::query_as::<_, Owner>(
            "SELECT id, name, contact, email FROM owners ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(owners)
    }

    pub async fn create_owner(&self, input: OwnerInput) -> Result<Owner, StoreError> {
        sqlx::query_as::<_, Owner>(
            r#"
            INSERT INTO owners (name, contact, email)
            VALUES ($1, $2, $3)
            RETURNING id, name, contact, email
            "#,
        )
        .bind(input.name)
        .bind(input.contact)
        .bind(input.email)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)
    }

    pub async fn get_owner(&self, id: i32) -> Result<Option<Owner>, StoreError> {
        let owner = sqlx::query_as::<_, Owner>(
            "SELECT id, name, contact, email FROM owners WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(owner)
    }

    /// Replace every field of owner `id`; `None` when no such owner exists.
    pub async fn update_owner(&self, id: i32, input: OwnerInput) -> Result<Option<Owner>, StoreError> {
        sqlx::query_as::<_, Owner>(
            r#"
            UPDATE owners
            SET name = $1, contact = $2, email = $3
            WHERE id = $4
            RETURNING id, name, contact, email
            "#,
        )
        .bind(input.name)
        .bind(input.contact)
        .bind(input.email)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)
    }

    /// Returns whether a row was removed.
    /// Delete owner `id` and everything under their pets, including the
    /// record files on disk.
    pub async fn delete_owner(&self, id: i32) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;

        let file_paths: Vec<String> = sqlx::query_scalar(
            r#"
            DELETE FROM file_records
            WHERE pet_id IN (SELECT id FROM pets WHERE owner_id = $1)
            RETURNING file_path
            "#,
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM owners WHERE id = $1")
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
