// src/models/service.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: Uuid,
    #[schema(example = "Design de sobrancelhas")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = 90)]
    pub duration_minutes: i32,
    #[schema(example = 120.0)]
    pub price: Decimal,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertServicePayload {
    #[validate(length(min = 1, message = "O nome é obrigatório"))]
    #[schema(example = "Design de sobrancelhas")]
    pub name: String,

    pub description: Option<String>,

    #[validate(range(min = 1, message = "A duração deve ser positiva"))]
    #[schema(example = 90)]
    pub duration_minutes: i32,

    #[schema(value_type = f64, example = 120.0)]
    pub price: Decimal,

    // Ausente na criação vale `true`; na atualização preserva o valor atual.
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivateServicePayload {
    pub active: bool,
}
