// src/db/gallery_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::gallery::{GalleryImage, ServiceImage},
};

// Imagem de serviço com a foto da galeria embutida (LEFT JOIN)
#[derive(FromRow)]
struct ServiceImageRow {
    id: Uuid,
    service_id: Uuid,
    gallery_id: Option<Uuid>,
    url: Option<String>,
    alt: Option<String>,
    created_at: DateTime<Utc>,

    g_url: Option<String>,
    g_alt: Option<String>,
    g_created_at: Option<DateTime<Utc>>,
}

impl From<ServiceImageRow> for ServiceImage {
    fn from(row: ServiceImageRow) -> Self {
        let gallery = match (row.gallery_id, row.g_url, row.g_created_at) {
            (Some(id), Some(url), Some(created_at)) => Some(GalleryImage {
                id,
                url,
                alt: row.g_alt,
                created_at,
            }),
            _ => None,
        };

        ServiceImage {
            id: row.id,
            service_id: row.service_id,
            gallery_id: row.gallery_id,
            url: row.url,
            alt: row.alt,
            created_at: row.created_at,
            gallery,
        }
    }
}

const SERVICE_IMAGE_SELECT: &str = r#"
    SELECT
        si.id, si.service_id, si.gallery_id, si.url, si.alt, si.created_at,
        g.url AS g_url, g.alt AS g_alt, g.created_at AS g_created_at
    FROM service_images si
    LEFT JOIN gallery_images g ON g.id = si.gallery_id
"#;

#[derive(Clone)]
pub struct GalleryRepository {
    pool: PgPool,
}

impl GalleryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_gallery(&self) -> Result<Vec<GalleryImage>, AppError> {
        let images = sqlx::query_as::<_, GalleryImage>(
            "SELECT id, url, alt, created_at FROM gallery_images ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    pub async fn add_gallery_image(
        &self,
        url: &str,
        alt: Option<&str>,
    ) -> Result<GalleryImage, AppError> {
        let image = sqlx::query_as::<_, GalleryImage>(
            r#"
            INSERT INTO gallery_images (url, alt)
            VALUES ($1, $2)
            RETURNING id, url, alt, created_at
            "#,
        )
        .bind(url)
        .bind(alt)
        .fetch_one(&self.pool)
        .await?;

        Ok(image)
    }

    pub async fn delete_gallery_image(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM gallery_images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Imagem não encontrada"));
        }

        Ok(())
    }

    pub async fn list_service_images(&self, service_id: Uuid) -> Result<Vec<ServiceImage>, AppError> {
        let rows = sqlx::query_as::<_, ServiceImageRow>(&format!(
            "{SERVICE_IMAGE_SELECT} WHERE si.service_id = $1 ORDER BY si.created_at DESC"
        ))
        .bind(service_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ServiceImage::from).collect())
    }

    pub async fn add_service_image(
        &self,
        service_id: Uuid,
        gallery_id: Option<Uuid>,
        url: Option<&str>,
        alt: Option<&str>,
    ) -> Result<ServiceImage, AppError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO service_images (service_id, gallery_id, url, alt)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(service_id)
        .bind(gallery_id)
        .bind(url)
        .bind(alt)
        .fetch_one(&self.pool)
        .await?;

        let row = sqlx::query_as::<_, ServiceImageRow>(&format!(
            "{SERVICE_IMAGE_SELECT} WHERE si.id = $1"
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(ServiceImage::from(row))
    }

    pub async fn delete_service_image(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM service_images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Imagem do serviço não encontrada"));
        }

        Ok(())
    }
}
