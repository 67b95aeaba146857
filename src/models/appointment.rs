// src/models/appointment.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::{client::Client, service::Service};

// Mapeia o CREATE TYPE appointment_status do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "appointment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Done,
    Canceled,
    NoShow,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub client_id: Uuid,
    pub service_id: Uuid,
    #[schema(value_type = String, format = Date, example = "2026-09-14")]
    pub date: NaiveDate,
    #[schema(example = "14:30")]
    pub time: String,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Agendamento com cliente e serviço embutidos (como a listagem do painel espera)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDetail {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub client: Client,
    pub service: Service,
}

// Variante usada no histórico de um cliente (o cliente já é o contexto)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentWithService {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub service: Service,
}

// -------- Payloads --------

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório"))]
    #[schema(example = "Maria da Silva")]
    pub name: String,

    #[validate(length(min = 8, message = "O telefone deve ter no mínimo 8 dígitos"))]
    #[schema(example = "11999998888")]
    pub phone: String,

    pub service_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2026-09-14")]
    pub date: NaiveDate,

    #[schema(example = "14:30")]
    pub time: String,

    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManualAppointmentPayload {
    // Informe clientId OU (name e phone)
    pub client_id: Option<Uuid>,
    pub name: Option<String>,
    pub phone: Option<String>,

    pub service_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2026-09-14")]
    pub date: NaiveDate,

    #[schema(example = "14:30")]
    pub time: String,

    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusPayload {
    pub status: AppointmentStatus,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub service_id: Uuid,
    #[param(value_type = String, format = Date, example = "2026-09-14")]
    pub date: NaiveDate,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    #[schema(value_type = String, format = Date, example = "2026-09-14")]
    pub date: NaiveDate,
    pub service_id: Uuid,
    #[schema(example = json!(["09:00", "11:30", "14:00"]))]
    pub available_times: Vec<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ListAppointmentsQuery {
    #[param(value_type = Option<String>, format = Date)]
    pub date: Option<NaiveDate>,
    pub status: Option<AppointmentStatus>,
}
