// src/db/settings_repo.rs

use serde_json::Value;
use sqlx::PgPool;

use crate::{common::error::AppError, models::settings::Settings};

const SETTINGS_COLUMNS: &str = "id, opening_hours, social_links, texts, updated_at";

#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A configuração é uma linha única de id fixo; pode não existir ainda.
    pub async fn get(&self) -> Result<Option<Settings>, AppError> {
        let settings = sqlx::query_as::<_, Settings>(&format!(
            "SELECT {SETTINGS_COLUMNS} FROM settings WHERE id = TRUE"
        ))
        .fetch_optional(&self.pool)
        .await?;

        Ok(settings)
    }

    /// UPSERT parcial: campo ausente no payload preserva o valor gravado.
    pub async fn upsert(
        &self,
        opening_hours: Option<&Value>,
        social_links: Option<&Value>,
        texts: Option<&Value>,
    ) -> Result<Settings, AppError> {
        let settings = sqlx::query_as::<_, Settings>(&format!(
            r#"
            INSERT INTO settings (id, opening_hours, social_links, texts)
            VALUES (TRUE,
                    COALESCE($1, '{{}}'::jsonb),
                    COALESCE($2, '{{}}'::jsonb),
                    COALESCE($3, '{{}}'::jsonb))
            ON CONFLICT (id) DO UPDATE SET
                opening_hours = COALESCE($1, settings.opening_hours),
                social_links = COALESCE($2, settings.social_links),
                texts = COALESCE($3, settings.texts),
                updated_at = now()
            RETURNING {SETTINGS_COLUMNS}
            "#
        ))
        .bind(opening_hours)
        .bind(social_links)
        .bind(texts)
        .fetch_one(&self.pool)
        .await?;

        Ok(settings)
    }
}
