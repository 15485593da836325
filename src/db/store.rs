// src/db/store.rs

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    models::{lead::Lead, settings::AdminSettings, visit::Visit},
    services::retention::UpsertDecision,
};

/// Persistência de leads, configurações e visitas.
///
/// Sem controle de concorrência: toda escrita de lead é sobrescrita do
/// registro inteiro e a última escrita vence.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Leads do mais recente (`submitted_at`) para o mais antigo.
    async fn list_leads(&self) -> Result<Vec<Lead>, AppError>;

    async fn find_lead(&self, id: &str) -> Result<Option<Lead>, AppError>;

    /// Upsert por id. Um rascunho `Abandoned` nunca sobrescreve um lead que
    /// já saiu desse estado.
    async fn upsert_lead(&self, lead: &Lead) -> Result<UpsertDecision, AppError>;

    /// Sobrescreve um lead existente; `false` quando o id não existe.
    async fn overwrite_lead(&self, lead: &Lead) -> Result<bool, AppError>;

    /// Documento ausente vira o `Default`.
    async fn load_settings(&self) -> Result<AdminSettings, AppError>;

    async fn store_settings(&self, settings: &AdminSettings) -> Result<(), AppError>;

    async fn append_visit(&self, visit: &Visit) -> Result<(), AppError>;

    async fn list_visits(&self) -> Result<Vec<Visit>, AppError>;
}
