// src/db/service_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::service::Service};

const SERVICE_COLUMNS: &str =
    "id, name, description, duration_minutes, price, active, created_at, updated_at";

#[derive(Clone)]
pub struct ServiceRepository {
    pool: PgPool,
}

impl ServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_active(&self) -> Result<Vec<Service>, AppError> {
        let services = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services WHERE active = TRUE ORDER BY name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(services)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Service>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let service = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(service)
    }

    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        duration_minutes: i32,
        price: Decimal,
        active: bool,
    ) -> Result<Service, AppError> {
        let service = sqlx::query_as::<_, Service>(&format!(
            r#"
            INSERT INTO services (name, description, duration_minutes, price, active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {SERVICE_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(description)
        .bind(duration_minutes)
        .bind(price)
        .bind(active)
        .fetch_one(&self.pool)
        .await?;

        Ok(service)
    }

    /// Atualiza o serviço. `active` ausente preserva o valor atual.
    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        description: Option<&str>,
        duration_minutes: i32,
        price: Decimal,
        active: Option<bool>,
    ) -> Result<Service, AppError> {
        let service = sqlx::query_as::<_, Service>(&format!(
            r#"
            UPDATE services SET
                name = $2,
                description = $3,
                duration_minutes = $4,
                price = $5,
                active = COALESCE($6, active),
                updated_at = now()
            WHERE id = $1
            RETURNING {SERVICE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(duration_minutes)
        .bind(price)
        .bind(active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Serviço não encontrado"))?;

        Ok(service)
    }

    pub async fn set_active(&self, id: Uuid, active: bool) -> Result<Service, AppError> {
        let service = sqlx::query_as::<_, Service>(&format!(
            r#"
            UPDATE services SET active = $2, updated_at = now()
            WHERE id = $1
            RETURNING {SERVICE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Serviço não encontrado"))?;

        Ok(service)
    }

    // Agendamentos, depoimentos e imagens vinculados caem em cascata (FK).
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Serviço não encontrado"));
        }

        Ok(())
    }
}
