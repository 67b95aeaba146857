// src/db/testimonial_repo.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        appointment::{Appointment, AppointmentDetail, AppointmentStatus},
        client::Client,
        service::Service,
        testimonial::{PublishedTestimonial, Testimonial, TestimonialDetail, TestimonialStatus},
    },
};

const TESTIMONIAL_COLUMNS: &str = "id, appointment_id, client_name, client_phone, unique_link, \
                                   rating, text, status, created_at, updated_at";

// Linha achatada do JOIN depoimento + agendamento + cliente + serviço
#[derive(FromRow)]
struct TestimonialDetailRow {
    id: Uuid,
    appointment_id: Uuid,
    client_name: String,
    client_phone: String,
    unique_link: String,
    rating: i32,
    text: String,
    status: TestimonialStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,

    a_client_id: Uuid,
    a_service_id: Uuid,
    a_date: NaiveDate,
    a_time: String,
    a_status: AppointmentStatus,
    a_notes: Option<String>,
    a_created_at: DateTime<Utc>,
    a_updated_at: DateTime<Utc>,

    c_name: String,
    c_phone: String,
    c_created_at: DateTime<Utc>,
    c_updated_at: DateTime<Utc>,

    s_name: String,
    s_description: Option<String>,
    s_duration_minutes: i32,
    s_price: Decimal,
    s_active: bool,
    s_created_at: DateTime<Utc>,
    s_updated_at: DateTime<Utc>,
}

impl From<TestimonialDetailRow> for TestimonialDetail {
    fn from(row: TestimonialDetailRow) -> Self {
        TestimonialDetail {
            testimonial: Testimonial {
                id: row.id,
                appointment_id: row.appointment_id,
                client_name: row.client_name,
                client_phone: row.client_phone,
                unique_link: row.unique_link,
                rating: row.rating,
                text: row.text,
                status: row.status,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            appointment: AppointmentDetail {
                appointment: Appointment {
                    id: row.appointment_id,
                    client_id: row.a_client_id,
                    service_id: row.a_service_id,
                    date: row.a_date,
                    time: row.a_time,
                    status: row.a_status,
                    notes: row.a_notes,
                    created_at: row.a_created_at,
                    updated_at: row.a_updated_at,
                },
                client: Client {
                    id: row.a_client_id,
                    name: row.c_name,
                    phone: row.c_phone,
                    created_at: row.c_created_at,
                    updated_at: row.c_updated_at,
                },
                service: Service {
                    id: row.a_service_id,
                    name: row.s_name,
                    description: row.s_description,
                    duration_minutes: row.s_duration_minutes,
                    price: row.s_price,
                    active: row.s_active,
                    created_at: row.s_created_at,
                    updated_at: row.s_updated_at,
                },
            },
        }
    }
}

#[derive(Clone)]
pub struct TestimonialRepository {
    pool: PgPool,
}

impl TestimonialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_published(&self) -> Result<Vec<PublishedTestimonial>, AppError> {
        let testimonials = sqlx::query_as::<_, PublishedTestimonial>(
            r#"
            SELECT id, client_name, text, rating, created_at
            FROM testimonials
            WHERE status = 'published'
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(testimonials)
    }

    pub async fn list_all_detail(&self) -> Result<Vec<TestimonialDetail>, AppError> {
        let rows = sqlx::query_as::<_, TestimonialDetailRow>(
            r#"
            SELECT
                t.id, t.appointment_id, t.client_name, t.client_phone, t.unique_link,
                t.rating, t.text, t.status, t.created_at, t.updated_at,
                a.client_id AS a_client_id, a.service_id AS a_service_id,
                a.date AS a_date, a.time AS a_time, a.status AS a_status,
                a.notes AS a_notes, a.created_at AS a_created_at, a.updated_at AS a_updated_at,
                c.name AS c_name, c.phone AS c_phone,
                c.created_at AS c_created_at, c.updated_at AS c_updated_at,
                s.name AS s_name, s.description AS s_description,
                s.duration_minutes AS s_duration_minutes, s.price AS s_price,
                s.active AS s_active, s.created_at AS s_created_at, s.updated_at AS s_updated_at
            FROM testimonials t
            JOIN appointments a ON a.id = t.appointment_id
            JOIN clients c ON c.id = a.client_id
            JOIN services s ON s.id = a.service_id
            ORDER BY t.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TestimonialDetail::from).collect())
    }

    pub async fn find_by_appointment(
        &self,
        appointment_id: Uuid,
    ) -> Result<Option<Testimonial>, AppError> {
        let testimonial = sqlx::query_as::<_, Testimonial>(&format!(
            "SELECT {TESTIMONIAL_COLUMNS} FROM testimonials WHERE appointment_id = $1"
        ))
        .bind(appointment_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(testimonial)
    }

    pub async fn find_by_link(&self, unique_link: &str) -> Result<Option<Testimonial>, AppError> {
        let testimonial = sqlx::query_as::<_, Testimonial>(&format!(
            "SELECT {TESTIMONIAL_COLUMNS} FROM testimonials WHERE unique_link = $1"
        ))
        .bind(unique_link)
        .fetch_optional(&self.pool)
        .await?;

        Ok(testimonial)
    }

    /// Cria o depoimento pendente. `None` significa que outra requisição
    /// criou o registro do mesmo agendamento primeiro.
    pub async fn create_pending(
        &self,
        appointment_id: Uuid,
        client_name: &str,
        client_phone: &str,
        unique_link: &str,
    ) -> Result<Option<Testimonial>, AppError> {
        let testimonial = sqlx::query_as::<_, Testimonial>(&format!(
            r#"
            INSERT INTO testimonials (appointment_id, client_name, client_phone, unique_link)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (appointment_id) DO NOTHING
            RETURNING {TESTIMONIAL_COLUMNS}
            "#
        ))
        .bind(appointment_id)
        .bind(client_name)
        .bind(client_phone)
        .bind(unique_link)
        .fetch_optional(&self.pool)
        .await?;

        Ok(testimonial)
    }

    /// Publica o depoimento de forma atômica: só transiciona se ainda estiver
    /// pendente, então um segundo envio nunca sobrescreve nota ou texto.
    pub async fn publish_if_pending(
        &self,
        id: Uuid,
        rating: i32,
        text: &str,
    ) -> Result<Option<Testimonial>, AppError> {
        let testimonial = sqlx::query_as::<_, Testimonial>(&format!(
            r#"
            UPDATE testimonials
            SET rating = $2, text = $3, status = 'published', updated_at = now()
            WHERE id = $1 AND status = 'pending'
            RETURNING {TESTIMONIAL_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(rating)
        .bind(text)
        .fetch_optional(&self.pool)
        .await?;

        Ok(testimonial)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Depoimento não encontrado"));
        }

        Ok(())
    }
}
