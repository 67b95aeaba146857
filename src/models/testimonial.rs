// src/models/testimonial.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::appointment::AppointmentDetail;

// Mapeia o CREATE TYPE testimonial_status do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "testimonial_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TestimonialStatus {
    Pending,
    Published,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: Uuid,
    pub appointment_id: Uuid,
    #[schema(example = "Maria da Silva")]
    pub client_name: String,
    #[schema(example = "11999998888")]
    pub client_phone: String,
    // Token hexadecimal de 32 caracteres, única credencial do envio público
    pub unique_link: String,
    #[schema(example = 5)]
    pub rating: i32,
    pub text: String,
    pub status: TestimonialStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Depoimento com o agendamento de origem (listagem do painel)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialDetail {
    #[serde(flatten)]
    pub testimonial: Testimonial,
    pub appointment: AppointmentDetail,
}

// Depoimento como aparece no site (sem telefone nem token)
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishedTestimonial {
    pub id: Uuid,
    pub client_name: String,
    pub text: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

// Dados para o formulário público, resolvidos pelo token
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialFormInfo {
    pub client_name: String,
    pub service_name: String,
    pub status: TestimonialStatus,
}

// Link pronto para envio via WhatsApp
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialLinkInfo {
    pub unique_link: String,
    pub url: String,
    pub whatsapp_message: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTestimonialPayload {
    #[validate(range(min = 1, max = 5, message = "A nota deve ser de 1 a 5"))]
    #[schema(example = 5)]
    pub rating: i32,

    #[validate(length(min = 10, message = "O depoimento deve ter no mínimo 10 caracteres"))]
    #[schema(example = "Atendimento maravilhoso, super recomendo!")]
    pub text: String,
}
