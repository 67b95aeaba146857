// src/handlers/services.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::service::{ActivateServicePayload, Service, UpsertServicePayload},
};

// GET /api/services — público, só os ativos
#[utoipa::path(
    get,
    path = "/api/services",
    tag = "Serviços",
    responses((status = 200, description = "Serviços ativos", body = Vec<Service>))
)]
pub async fn list_services(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let services = app_state.service_repo.list_active().await?;
    Ok(Json(services))
}

// GET /api/services/{id} — público; inativo aparece como inexistente
#[utoipa::path(
    get,
    path = "/api/services/{id}",
    tag = "Serviços",
    params(("id" = Uuid, Path, description = "ID do serviço")),
    responses(
        (status = 200, description = "Detalhe do serviço", body = Service),
        (status = 404, description = "Serviço não encontrado")
    )
)]
pub async fn get_service(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let service = app_state
        .service_repo
        .find_by_id(&app_state.db_pool, id)
        .await?
        .filter(|s| s.active)
        .ok_or(AppError::NotFound("Serviço não encontrado"))?;

    Ok(Json(service))
}

// POST /api/services
#[utoipa::path(
    post,
    path = "/api/services",
    tag = "Serviços",
    request_body = UpsertServicePayload,
    responses((status = 201, description = "Serviço criado", body = Service)),
    security(("api_jwt" = []))
)]
pub async fn create_service(
    State(app_state): State<AppState>,
    Json(payload): Json<UpsertServicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let service = app_state
        .service_repo
        .create(
            &payload.name,
            payload.description.as_deref(),
            payload.duration_minutes,
            payload.price,
            payload.active.unwrap_or(true),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(service)))
}

// PUT /api/services/{id}
#[utoipa::path(
    put,
    path = "/api/services/{id}",
    tag = "Serviços",
    params(("id" = Uuid, Path, description = "ID do serviço")),
    request_body = UpsertServicePayload,
    responses(
        (status = 200, description = "Serviço atualizado", body = Service),
        (status = 404, description = "Serviço não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_service(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpsertServicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let service = app_state
        .service_repo
        .update(
            id,
            &payload.name,
            payload.description.as_deref(),
            payload.duration_minutes,
            payload.price,
            payload.active,
        )
        .await?;

    Ok(Json(service))
}

// PATCH /api/services/{id}/activate
#[utoipa::path(
    patch,
    path = "/api/services/{id}/activate",
    tag = "Serviços",
    params(("id" = Uuid, Path, description = "ID do serviço")),
    request_body = ActivateServicePayload,
    responses((status = 200, description = "Serviço ativado/desativado", body = Service)),
    security(("api_jwt" = []))
)]
pub async fn activate_service(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ActivateServicePayload>,
) -> Result<impl IntoResponse, AppError> {
    let service = app_state.service_repo.set_active(id, payload.active).await?;
    Ok(Json(service))
}

// DELETE /api/services/{id} — leva junto agendamentos e depoimentos (FK)
#[utoipa::path(
    delete,
    path = "/api/services/{id}",
    tag = "Serviços",
    params(("id" = Uuid, Path, description = "ID do serviço")),
    responses((status = 200, description = "Serviço deletado")),
    security(("api_jwt" = []))
)]
pub async fn delete_service(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.service_repo.delete(id).await?;
    Ok(Json(json!({ "message": "Serviço deletado com sucesso" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn payload_exige_nome_e_duracao_positiva() {
        let payload = UpsertServicePayload {
            name: String::new(),
            description: None,
            duration_minutes: 0,
            price: Decimal::new(12000, 2),
            active: None,
        };

        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(errors.field_errors().contains_key("duration_minutes"));
    }
}
