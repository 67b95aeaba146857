// src/handlers/clients.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::client::{Client, ClientDetail, ClientPage, ListClientsQuery, UpsertClientPayload},
};

// GET /api/clients — paginado, com busca por nome ou telefone
#[utoipa::path(
    get,
    path = "/api/clients",
    tag = "Clientes",
    params(ListClientsQuery),
    responses((status = 200, description = "Página de clientes", body = ClientPage)),
    security(("api_jwt" = []))
)]
pub async fn list_clients(
    State(app_state): State<AppState>,
    Query(query): Query<ListClientsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let search = query.search.unwrap_or_default();

    let result = app_state
        .client_repo
        .list_paginated(page, per_page, &search)
        .await?;

    Ok(Json(result))
}

// GET /api/clients/{id} — com o histórico de agendamentos
#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Detalhe do cliente", body = ClientDetail),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_client(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let client = app_state
        .client_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Cliente não encontrado"))?;

    let appointments = app_state.appointment_repo.list_by_client(id).await?;

    Ok(Json(ClientDetail { client, appointments }))
}

// POST /api/clients
#[utoipa::path(
    post,
    path = "/api/clients",
    tag = "Clientes",
    request_body = UpsertClientPayload,
    responses((status = 201, description = "Cliente criado", body = Client)),
    security(("api_jwt" = []))
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    Json(payload): Json<UpsertClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let client = app_state
        .client_repo
        .create(&app_state.db_pool, &payload.name, &payload.phone)
        .await?;

    Ok((StatusCode::CREATED, Json(client)))
}

// PUT /api/clients/{id}
#[utoipa::path(
    put,
    path = "/api/clients/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    request_body = UpsertClientPayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = Client),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_client(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpsertClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let client = app_state
        .client_repo
        .update(id, &payload.name, &payload.phone)
        .await?;

    Ok(Json(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_exige_telefone_com_8_digitos() {
        let payload = UpsertClientPayload {
            name: "Maria".to_string(),
            phone: "1234567".to_string(),
        };

        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone"));
    }
}
