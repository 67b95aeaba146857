// src/handlers/settings.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::Value;

use crate::{
    common::error::AppError,
    config::AppState,
    models::settings::{PublicSettings, Settings, UpdateSettingsPayload},
};

// GET /api/settings/public — subconjunto para o site
#[utoipa::path(
    get,
    path = "/api/settings/public",
    tag = "Settings",
    responses((status = 200, description = "Configuração pública do site", body = PublicSettings))
)]
pub async fn get_public_settings(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let settings = app_state.settings_repo.get().await?;

    // Sem configuração gravada o site recebe null, como sempre recebeu
    match settings {
        Some(settings) => Ok(Json(serde_json::to_value(PublicSettings::from(settings))
            .map_err(anyhow::Error::from)?)),
        None => Ok(Json(Value::Null)),
    }
}

// GET /api/settings
#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "Settings",
    responses((status = 200, description = "Configuração completa", body = Settings)),
    security(("api_jwt" = []))
)]
pub async fn get_settings(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let settings = app_state.settings_repo.get().await?;

    match settings {
        Some(settings) => {
            Ok(Json(serde_json::to_value(settings).map_err(anyhow::Error::from)?))
        }
        None => Ok(Json(Value::Null)),
    }
}

// PUT /api/settings — upsert parcial da linha única
#[utoipa::path(
    put,
    path = "/api/settings",
    tag = "Settings",
    request_body = UpdateSettingsPayload,
    responses((status = 200, description = "Configuração gravada", body = Settings)),
    security(("api_jwt" = []))
)]
pub async fn update_settings(
    State(app_state): State<AppState>,
    Json(payload): Json<UpdateSettingsPayload>,
) -> Result<impl IntoResponse, AppError> {
    let settings = app_state
        .settings_repo
        .upsert(
            payload.opening_hours.as_ref(),
            payload.social_links.as_ref(),
            payload.texts.as_ref(),
        )
        .await?;

    Ok(Json(settings))
}
