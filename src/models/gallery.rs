// src/models/gallery.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: Uuid,
    #[schema(example = "https://cdn.estudio.com/fotos/unhas-01.jpg")]
    pub url: String,
    pub alt: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddGalleryImagePayload {
    #[validate(url(message = "URL inválida"))]
    #[schema(example = "https://cdn.estudio.com/fotos/unhas-01.jpg")]
    pub url: String,
    pub alt: Option<String>,
}

// Imagem vinculada a um serviço: referencia a galeria ou traz uma URL própria
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceImage {
    pub id: Uuid,
    pub service_id: Uuid,
    pub gallery_id: Option<Uuid>,
    pub url: Option<String>,
    pub alt: Option<String>,
    pub created_at: DateTime<Utc>,
    pub gallery: Option<GalleryImage>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddServiceImagePayload {
    pub service_id: Uuid,
    // Informe galleryId ou url
    pub gallery_id: Option<Uuid>,
    #[validate(url(message = "URL inválida"))]
    pub url: Option<String>,
    pub alt: Option<String>,
}
