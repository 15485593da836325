use sqlx::{PgPool, types::Json};

use crate::{common::error::AppError, models::settings::AdminSettings};

#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_settings(&self) -> Result<AdminSettings, AppError> {
        // Se o documento ainda não existe, tratamos como "vazio".
        let document = sqlx::query_scalar::<_, Json<AdminSettings>>(
            "SELECT document FROM admin_settings WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(document.map(|Json(s)| s).unwrap_or_default())
    }

    // UPSERT (Insert or Update) do documento inteiro
    pub async fn save_settings(&self, settings: &AdminSettings) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO admin_settings (id, document)
            VALUES (1, $1)
            ON CONFLICT (id)
            DO UPDATE SET
                document = EXCLUDED.document,
                updated_at = NOW()
            "#,
        )
        .bind(Json(settings))
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
