// src/handlers/gallery.rs

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
    models::gallery::{AddGalleryImagePayload, AddServiceImagePayload, GalleryImage, ServiceImage},
};

// GET /api/gallery — público
#[utoipa::path(
    get,
    path = "/api/gallery",
    tag = "Galeria",
    responses((status = 200, description = "Fotos da galeria", body = Vec<GalleryImage>))
)]
pub async fn list_gallery(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let images = app_state.gallery_repo.list_gallery().await?;
    Ok(Json(images))
}

// POST /api/gallery
#[utoipa::path(
    post,
    path = "/api/gallery",
    tag = "Galeria",
    request_body = AddGalleryImagePayload,
    responses((status = 201, description = "Foto adicionada", body = GalleryImage)),
    security(("api_jwt" = []))
)]
pub async fn add_gallery_image(
    State(app_state): State<AppState>,
    Json(payload): Json<AddGalleryImagePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let image = app_state
        .gallery_repo
        .add_gallery_image(&payload.url, payload.alt.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(image)))
}

// DELETE /api/gallery/{id}
#[utoipa::path(
    delete,
    path = "/api/gallery/{id}",
    tag = "Galeria",
    params(("id" = Uuid, Path, description = "ID da foto")),
    responses((status = 200, description = "Foto deletada")),
    security(("api_jwt" = []))
)]
pub async fn delete_gallery_image(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.gallery_repo.delete_gallery_image(id).await?;
    Ok(Json(json!({ "message": "Imagem deletada com sucesso" })))
}

// GET /api/service-images/service/{serviceId} — fotos de um serviço
#[utoipa::path(
    get,
    path = "/api/service-images/service/{service_id}",
    tag = "Galeria",
    params(("service_id" = Uuid, Path, description = "ID do serviço")),
    responses((status = 200, description = "Fotos do serviço", body = Vec<ServiceImage>))
)]
pub async fn list_service_images(
    State(app_state): State<AppState>,
    Path(service_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let images = app_state.gallery_repo.list_service_images(service_id).await?;
    Ok(Json(images))
}

// POST /api/service-images — referencia a galeria ou traz URL própria
#[utoipa::path(
    post,
    path = "/api/service-images",
    tag = "Galeria",
    request_body = AddServiceImagePayload,
    responses((status = 201, description = "Foto vinculada", body = ServiceImage)),
    security(("api_jwt" = []))
)]
pub async fn add_service_image(
    State(app_state): State<AppState>,
    Json(payload): Json<AddServiceImagePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    if payload.gallery_id.is_none() && payload.url.is_none() {
        let mut errors = validator::ValidationErrors::new();
        let mut error = validator::ValidationError::new("required");
        error.message = Some("Informe galleryId ou url".into());
        errors.add("galleryId", error);
        return Err(AppError::ValidationError(errors));
    }

    let image = app_state
        .gallery_repo
        .add_service_image(
            payload.service_id,
            payload.gallery_id,
            payload.url.as_deref(),
            payload.alt.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(image)))
}

// DELETE /api/service-images/{id}
#[utoipa::path(
    delete,
    path = "/api/service-images/{id}",
    tag = "Galeria",
    params(("id" = Uuid, Path, description = "ID da foto do serviço")),
    responses((status = 200, description = "Foto desvinculada")),
    security(("api_jwt" = []))
)]
pub async fn delete_service_image(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.gallery_repo.delete_service_image(id).await?;
    Ok(Json(json!({ "message": "Imagem do serviço deletada com sucesso" })))
}
