// src/services/lead_service.rs

use std::sync::Arc;

use chrono::{FixedOffset, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::{dates, error::AppError},
    db::RecordStore,
    models::lead::{FollowUpStatus, Lead, LeadStatus},
    services::{
        import::{self, ImportPayload},
        retention::{self, UpsertDecision},
    },
};

#[derive(Debug, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BulkStatusResult {
    pub updated: usize,
    // Ids inexistentes ou com transição proibida
    pub skipped: Vec<String>,
}

#[derive(Clone)]
pub struct LeadService {
    store: Arc<dyn RecordStore>,
    business_offset: FixedOffset,
}

impl LeadService {
    pub fn new(store: Arc<dyn RecordStore>, business_offset: FixedOffset) -> Self {
        Self {
            store,
            business_offset,
        }
    }

    pub fn today(&self) -> NaiveDate {
        dates::local_date(Utc::now(), self.business_offset)
    }

    pub async fn list_leads(&self) -> Result<Vec<Lead>, AppError> {
        self.store.list_leads().await
    }

    /// Gravação pública (formulário de reserva). Só aceita `New` e `Abandoned`;
    /// campos de retenção vindos do visitante são descartados.
    pub async fn save_lead(&self, mut lead: Lead) -> Result<UpsertDecision, AppError> {
        lead.validate()?;
        if !matches!(lead.status, LeadStatus::New | LeadStatus::Abandoned) {
            return Err(AppError::InvalidQuery(format!(
                "Bookings can only be saved as New or Abandoned, not {}.",
                lead.status.as_str()
            )));
        }
        lead.follow_up_date = None;
        lead.follow_up_status = None;
        lead.next_follow_up = None;
        lead.notes = None;

        let decision = self.store.upsert_lead(&lead).await?;
        match decision {
            UpsertDecision::Store => {
                tracing::info!("✅ Lead {} gravado como {}", lead.id, lead.status.as_str())
            }
            UpsertDecision::IgnoreStale => {
                tracing::debug!("Gravação pública ignorada para o lead {} (já trabalhado ou rascunho atrasado)", lead.id)
            }
        }
        Ok(decision)
    }

    /// Sobrescrita administrativa do registro inteiro.
    pub async fn update_lead(&self, lead: Lead) -> Result<Lead, AppError> {
        lead.validate()?;
        let current = self
            .store
            .find_lead(&lead.id)
            .await?
            .ok_or_else(|| AppError::LeadNotFound(lead.id.clone()))?;

        if !current.is_abandoned() && lead.is_abandoned() {
            return Err(AppError::InvalidTransition {
                from: current.status,
                action: "move back to Abandoned",
            });
        }

        self.overwrite(lead).await
    }

    async fn overwrite(&self, lead: Lead) -> Result<Lead, AppError> {
        if !self.store.overwrite_lead(&lead).await? {
            return Err(AppError::LeadNotFound(lead.id));
        }
        Ok(lead)
    }

    // Read-modify-write de um lead; a última escrita vence.
    async fn transition<F>(&self, id: &str, apply: F) -> Result<Lead, AppError>
    where
        F: FnOnce(&Lead) -> Result<Lead, AppError>,
    {
        let current = self
            .store
            .find_lead(id)
            .await?
            .ok_or_else(|| AppError::LeadNotFound(id.to_string()))?;
        let next = apply(&current)?;
        self.overwrite(next).await
    }

    pub async fn change_status(&self, id: &str, status: LeadStatus) -> Result<Lead, AppError> {
        let lead = self
            .transition(id, |l| retention::change_status(l, status))
            .await?;
        tracing::info!("Lead {} agora está {}", id, status.as_str());
        Ok(lead)
    }

    /// Sem data, agenda para hoje (horário do negócio) + 30 dias.
    pub async fn schedule_follow_up(
        &self,
        id: &str,
        date: Option<NaiveDate>,
    ) -> Result<Lead, AppError> {
        let date = date.unwrap_or_else(|| retention::default_follow_up_date(self.today()));
        self.transition(id, |l| retention::schedule_follow_up(l, date))
            .await
    }

    pub async fn record_outcome(&self, id: &str, outcome: FollowUpStatus) -> Result<Lead, AppError> {
        self.transition(id, |l| retention::record_outcome(l, outcome))
            .await
    }

    pub async fn attach_note(&self, id: &str, note: &str) -> Result<Lead, AppError> {
        self.transition(id, |l| Ok(retention::attach_note(l, note)))
            .await
    }

    /// Aplica a mesma mudança de status a cada lead selecionado, um por vez.
    pub async fn bulk_status(
        &self,
        ids: &[String],
        status: LeadStatus,
    ) -> Result<BulkStatusResult, AppError> {
        if ids.is_empty() {
            return Err(AppError::EmptySelection);
        }

        let mut result = BulkStatusResult {
            updated: 0,
            skipped: Vec::new(),
        };
        for id in ids {
            match self.change_status(id, status).await {
                Ok(_) => result.updated += 1,
                Err(e @ (AppError::LeadNotFound(_) | AppError::InvalidTransition { .. })) => {
                    tracing::warn!("Lead {} ignorado na ação em massa: {}", id, e);
                    result.skipped.push(id.clone());
                }
                Err(e) => return Err(e),
            }
        }
        Ok(result)
    }

    /// Importação em massa; devolve quantos leads foram gravados.
    pub async fn import(&self, payload: &ImportPayload) -> Result<usize, AppError> {
        payload.validate()?;
        let leads = import::parse_import(&payload.data, payload.service_id, Utc::now());

        let mut processed = 0;
        for lead in &leads {
            if self.store.upsert_lead(lead).await? == UpsertDecision::Store {
                processed += 1;
            }
        }
        tracing::info!("✅ {} leads importados", processed);
        Ok(processed)
    }
}
