// src/db/appointment_repo.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, FromRow, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        appointment::{Appointment, AppointmentDetail, AppointmentStatus, AppointmentWithService},
        client::Client,
        service::Service,
    },
};

const APPOINTMENT_COLUMNS: &str =
    "id, client_id, service_id, date, time, status, notes, created_at, updated_at";

// Apenas estes status ocupam a vaga; cancelados e faltas liberam o horário.
// Precisa bater com o índice parcial uq_appointments_slot_ativo.
const OCCUPYING_STATUSES: &str = "('scheduled', 'done')";

// Linha achatada do JOIN agendamento + cliente + serviço
#[derive(FromRow)]
struct AppointmentDetailRow {
    id: Uuid,
    client_id: Uuid,
    service_id: Uuid,
    date: NaiveDate,
    time: String,
    status: AppointmentStatus,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,

    client_name: String,
    client_phone: String,
    client_created_at: DateTime<Utc>,
    client_updated_at: DateTime<Utc>,

    service_name: String,
    service_description: Option<String>,
    duration_minutes: i32,
    price: Decimal,
    active: bool,
    service_created_at: DateTime<Utc>,
    service_updated_at: DateTime<Utc>,
}

impl From<AppointmentDetailRow> for AppointmentDetail {
    fn from(row: AppointmentDetailRow) -> Self {
        AppointmentDetail {
            appointment: Appointment {
                id: row.id,
                client_id: row.client_id,
                service_id: row.service_id,
                date: row.date,
                time: row.time,
                status: row.status,
                notes: row.notes,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            client: Client {
                id: row.client_id,
                name: row.client_name,
                phone: row.client_phone,
                created_at: row.client_created_at,
                updated_at: row.client_updated_at,
            },
            service: Service {
                id: row.service_id,
                name: row.service_name,
                description: row.service_description,
                duration_minutes: row.duration_minutes,
                price: row.price,
                active: row.active,
                created_at: row.service_created_at,
                updated_at: row.service_updated_at,
            },
        }
    }
}

const DETAIL_SELECT: &str = r#"
    SELECT
        a.id, a.client_id, a.service_id, a.date, a.time, a.status, a.notes,
        a.created_at, a.updated_at,
        c.name AS client_name, c.phone AS client_phone,
        c.created_at AS client_created_at, c.updated_at AS client_updated_at,
        s.name AS service_name, s.description AS service_description,
        s.duration_minutes, s.price, s.active,
        s.created_at AS service_created_at, s.updated_at AS service_updated_at
    FROM appointments a
    JOIN clients c ON c.id = a.client_id
    JOIN services s ON s.id = a.service_id
"#;

#[derive(Clone)]
pub struct AppointmentRepository {
    pool: PgPool,
}

impl AppointmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Horários já ocupados de um serviço em uma data, na ordem do dia.
    pub async fn occupied_times(
        &self,
        service_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<String>, AppError> {
        let times = sqlx::query_scalar::<_, String>(&format!(
            r#"
            SELECT time FROM appointments
            WHERE service_id = $1 AND date = $2 AND status IN {OCCUPYING_STATUSES}
            ORDER BY time ASC
            "#
        ))
        .bind(service_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(times)
    }

    /// Pré-checagem de conflito. A garantia definitiva é o índice parcial.
    pub async fn slot_is_taken<'e, E>(
        &self,
        executor: E,
        service_id: Uuid,
        date: NaiveDate,
        time: &str,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let existing = sqlx::query_scalar::<_, Uuid>(&format!(
            r#"
            SELECT id FROM appointments
            WHERE service_id = $1 AND date = $2 AND time = $3
              AND status IN {OCCUPYING_STATUSES}
            LIMIT 1
            "#
        ))
        .bind(service_id)
        .bind(date)
        .bind(time)
        .fetch_optional(executor)
        .await?;

        Ok(existing.is_some())
    }

    /// Insere o agendamento. Violação do índice único parcial vira SlotTaken:
    /// duas requisições simultâneas para a mesma vaga nunca gravam as duas.
    pub async fn insert<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        service_id: Uuid,
        date: NaiveDate,
        time: &str,
        status: AppointmentStatus,
        notes: Option<&str>,
    ) -> Result<Appointment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Appointment>(&format!(
            r#"
            INSERT INTO appointments (client_id, service_id, date, time, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {APPOINTMENT_COLUMNS}
            "#
        ))
        .bind(client_id)
        .bind(service_id)
        .bind(date)
        .bind(time)
        .bind(status)
        .bind(notes)
        .fetch_one(executor)
        .await
        .map_err(|e| AppError::map_unique_violation(e, AppError::SlotTaken))
    }

    pub async fn find_detail(&self, id: Uuid) -> Result<Option<AppointmentDetail>, AppError> {
        let row = sqlx::query_as::<_, AppointmentDetailRow>(&format!("{DETAIL_SELECT} WHERE a.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(AppointmentDetail::from))
    }

    /// Listagem do painel, com filtros opcionais de data e status.
    pub async fn list_detail(
        &self,
        date: Option<NaiveDate>,
        status: Option<AppointmentStatus>,
    ) -> Result<Vec<AppointmentDetail>, AppError> {
        let rows = sqlx::query_as::<_, AppointmentDetailRow>(&format!(
            r#"
            {DETAIL_SELECT}
            WHERE ($1::date IS NULL OR a.date = $1)
              AND ($2::appointment_status IS NULL OR a.status = $2)
            ORDER BY a.date ASC, a.time ASC
            "#
        ))
        .bind(date)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AppointmentDetail::from).collect())
    }

    /// Histórico de um cliente, mais recente primeiro.
    pub async fn list_by_client(
        &self,
        client_id: Uuid,
    ) -> Result<Vec<AppointmentWithService>, AppError> {
        let rows = sqlx::query_as::<_, AppointmentDetailRow>(&format!(
            "{DETAIL_SELECT} WHERE a.client_id = $1 ORDER BY a.date DESC, a.time DESC"
        ))
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let detail = AppointmentDetail::from(row);
                AppointmentWithService {
                    appointment: detail.appointment,
                    service: detail.service,
                }
            })
            .collect())
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment, AppError> {
        sqlx::query_as::<_, Appointment>(&format!(
            r#"
            UPDATE appointments SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING {APPOINTMENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::map_unique_violation(e, AppError::SlotTaken))?
        .ok_or(AppError::NotFound("Agendamento não encontrado"))
    }
}
