// src/db/client_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::client::{Client, ClientPage},
};

const CLIENT_COLUMNS: &str = "id, name, phone, created_at, updated_at";

// Escapa os curingas do LIKE para que a busca seja sempre literal
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Listagem paginada com busca (case-insensitive) por nome ou telefone.
    pub async fn list_paginated(
        &self,
        page: i64,
        per_page: i64,
        search: &str,
    ) -> Result<ClientPage, AppError> {
        let offset = (page - 1) * per_page;
        let search = escape_like(search);

        let items = sqlx::query_as::<_, Client>(&format!(
            r#"
            SELECT {CLIENT_COLUMNS} FROM clients
            WHERE $1 = '' OR name ILIKE '%' || $1 || '%' OR phone ILIKE '%' || $1 || '%'
            ORDER BY name ASC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(&search)
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM clients
            WHERE $1 = '' OR name ILIKE '%' || $1 || '%' OR phone ILIKE '%' || $1 || '%'
            "#,
        )
        .bind(&search)
        .fetch_one(&self.pool)
        .await?;

        Ok(ClientPage {
            items,
            page,
            per_page,
            total,
            total_pages: (total + per_page - 1) / per_page,
        })
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        let client =
            sqlx::query_as::<_, Client>(&format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(client)
    }

    pub async fn find_by_phone<'e, E>(
        &self,
        executor: E,
        phone: &str,
    ) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE phone = $1"
        ))
        .bind(phone)
        .fetch_optional(executor)
        .await?;

        Ok(client)
    }

    pub async fn create<'e, E>(&self, executor: E, name: &str, phone: &str) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(&format!(
            r#"
            INSERT INTO clients (name, phone)
            VALUES ($1, $2)
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(phone)
        .fetch_one(executor)
        .await
        .map_err(|e| AppError::map_unique_violation(e, AppError::PhoneAlreadyExists))?;

        Ok(client)
    }

    pub async fn update(&self, id: Uuid, name: &str, phone: &str) -> Result<Client, AppError> {
        let client = sqlx::query_as::<_, Client>(&format!(
            r#"
            UPDATE clients SET name = $2, phone = $3, updated_at = now()
            WHERE id = $1
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(name)
        .bind(phone)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::map_unique_violation(e, AppError::PhoneAlreadyExists))?
        .ok_or(AppError::NotFound("Cliente não encontrado"))?;

        Ok(client)
    }

    /// Atualiza só o nome (last-writer-wins na admissão de agendamento).
    pub async fn update_name<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: &str,
    ) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(&format!(
            r#"
            UPDATE clients SET name = $2, updated_at = now()
            WHERE id = $1
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(name)
        .fetch_one(executor)
        .await?;

        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busca_escapa_curingas_do_like() {
        assert_eq!(escape_like("%"), "\\%");
        assert_eq!(escape_like("_"), "\\_");
        assert_eq!(escape_like("\\"), "\\\\");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
    }

    #[test]
    fn busca_comum_passa_intacta() {
        assert_eq!(escape_like("Maria"), "Maria");
        assert_eq!(escape_like("11999998888"), "11999998888");
        assert_eq!(escape_like(""), "");
    }
}
