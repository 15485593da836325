// src/db/pg_store.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{LeadRepository, SettingsRepository, VisitRepository, store::RecordStore},
    models::{lead::Lead, settings::AdminSettings, visit::Visit},
    services::retention::UpsertDecision,
};

/// `RecordStore` sobre Postgres: um repositório por tabela.
#[derive(Clone)]
pub struct PgStore {
    lead_repo: LeadRepository,
    settings_repo: SettingsRepository,
    visit_repo: VisitRepository,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            lead_repo: LeadRepository::new(pool.clone()),
            settings_repo: SettingsRepository::new(pool.clone()),
            visit_repo: VisitRepository::new(pool),
        }
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn list_leads(&self) -> Result<Vec<Lead>, AppError> {
        self.lead_repo.list().await
    }

    async fn find_lead(&self, id: &str) -> Result<Option<Lead>, AppError> {
        self.lead_repo.find_by_id(id).await
    }

    async fn upsert_lead(&self, lead: &Lead) -> Result<UpsertDecision, AppError> {
        self.lead_repo.upsert(lead).await
    }

    async fn overwrite_lead(&self, lead: &Lead) -> Result<bool, AppError> {
        self.lead_repo.overwrite(lead).await
    }

    async fn load_settings(&self) -> Result<AdminSettings, AppError> {
        self.settings_repo.get_settings().await
    }

    async fn store_settings(&self, settings: &AdminSettings) -> Result<(), AppError> {
        self.settings_repo.save_settings(settings).await
    }

    async fn append_visit(&self, visit: &Visit) -> Result<(), AppError> {
        self.visit_repo.append(visit).await
    }

    async fn list_visits(&self) -> Result<Vec<Visit>, AppError> {
        self.visit_repo.list().await
    }
}
