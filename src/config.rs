// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use chrono::FixedOffset;
use sqlx::postgres::PgPoolOptions;

use crate::{
    db::{MemoryStore, PgStore, RecordStore},
    services::{
        auth::AuthService, dashboard_service::DashboardService, lead_service::LeadService,
        settings_service::SettingsService,
    },
};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_BUSINESS_NAME: &str = "Lingering Look";
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 6;

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub admin_password_hash: String,
    pub bind_addr: String,
    pub business_name: String,
    pub business_offset: FixedOffset,
    pub cors_allowed_origin: Option<String>,
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = optional("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        let admin_password_hash =
            optional("ADMIN_PASSWORD_HASH").context("ADMIN_PASSWORD_HASH deve ser definido")?;

        let offset_hours = match optional("BUSINESS_UTC_OFFSET_HOURS") {
            Some(raw) => raw
                .parse::<i32>()
                .with_context(|| format!("BUSINESS_UTC_OFFSET_HOURS inválido: {raw}"))?,
            None => DEFAULT_UTC_OFFSET_HOURS,
        };
        let business_offset = FixedOffset::east_opt(offset_hours * 3600)
            .with_context(|| format!("BUSINESS_UTC_OFFSET_HOURS fora do intervalo: {offset_hours}"))?;

        Ok(Self {
            database_url: optional("DATABASE_URL"),
            jwt_secret,
            admin_password_hash,
            bind_addr: optional("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            business_name: optional("BUSINESS_NAME")
                .unwrap_or_else(|| DEFAULT_BUSINESS_NAME.to_string()),
            business_offset,
            cors_allowed_origin: optional("CORS_ALLOWED_ORIGIN"),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth_service: AuthService,
    pub lead_service: LeadService,
    pub dashboard_service: DashboardService,
    pub settings_service: SettingsService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store: Arc<dyn RecordStore> = match &config.database_url {
            Some(database_url) => {
                let db_pool = PgPoolOptions::new()
                    .max_connections(5)
                    .acquire_timeout(Duration::from_secs(3))
                    .connect(database_url)
                    .await?;
                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

                sqlx::migrate!().run(&db_pool).await?;
                tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

                Arc::new(PgStore::new(db_pool))
            }
            None => {
                tracing::warn!("⚠️ DATABASE_URL ausente: usando armazenamento em memória");
                Arc::new(MemoryStore::new())
            }
        };

        Ok(Self::with_store(config, store))
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_store(config: Config, store: Arc<dyn RecordStore>) -> Self {
        let auth_service = AuthService::new(
            config.admin_password_hash.clone(),
            config.jwt_secret.clone(),
        );
        let lead_service = LeadService::new(store.clone(), config.business_offset);
        let dashboard_service = DashboardService::new(
            store.clone(),
            config.business_offset,
            config.business_name.clone(),
        );
        let settings_service = SettingsService::new(store);

        Self {
            config: Arc::new(config),
            auth_service,
            lead_service,
            dashboard_service,
            settings_service,
        }
    }
}
