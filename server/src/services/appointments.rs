use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::{Appointment, AppointmentInput};

pub struct AppointmentService {
    pool: PgPool,
}

impl AppointmentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_appointments(&self) -> Result<Vec<Appointment>, StoreError> {
        let appointments = sqlx::query_as::<_, Appointment>(
            r#"
            SELECT id, pet_id, appointment_date, appointment_time, reason
            FROM appointments
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(appointments)
    }

    /// Insert a validated appointment; date and time are present after validation.
    pub async fn create_appointment(&self, input: AppointmentInput) -> Result<Appointment, StoreError> {
        sqlx::query_as::<_, Appointment>(
            r#"
            INSERT INTO appointments (pet_id, appointment_date, appointment_time, reason)
            VALUES ($1, $2, $3, $4)
            RETURNING id, pet_id, appointment_date, appointment_time, reason
            "#,
        )
        .bind(input.pet_id)
        .bind(input.appointment_date)
        .bind(input.appointment_time)
        .bind(input.reason)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)
    }

    pub async fn get_appointment(&self, id: i32) -> Result<Option<Appointment>, StoreError> {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            SELECT id, pet_id, appointment_date, appointment_time, reason
            FROM appointments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(appointment)
    }

    pub async fn update_appointment(
        &self,
        id: i32,
        input: AppointmentInput,
    ) -> Result<Option<Appointment>, StoreError> {
        sqlx::query_as::<_, Appointment>(
            r#"
            UPDATE appointments
            SET pet_id = $1, appointment_date = $2, appointment_time = $3, reason = $4
            WHERE id = $5
            RETURNING id, pet_id, appointment_date, appointment_time, reason
            "#,
        )
        .bind(input.pet_id)
        .bind(input.appointment_date)
        .bind(input.appointment_time)
        .bind(input.reason)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)
    }

    pub async fn delete_appointment(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
