// src/db/memory_store.rs

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    common::error::AppError,
    db::store::RecordStore,
    models::{lead::Lead, settings::AdminSettings, visit::Visit},
    services::retention::{self, UpsertDecision},
};

/// `RecordStore` em memória: usado sem `DATABASE_URL` e nos testes.
#[derive(Default)]
pub struct MemoryStore {
    leads: RwLock<HashMap<String, Lead>>,
    settings: RwLock<Option<AdminSettings>>,
    visits: RwLock<Vec<Visit>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_leads(&self) -> Result<Vec<Lead>, AppError> {
        let mut leads: Vec<Lead> = self.leads.read().await.values().cloned().collect();
        leads.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at).then_with(|| a.id.cmp(&b.id)));
        Ok(leads)
    }

    async fn find_lead(&self, id: &str) -> Result<Option<Lead>, AppError> {
        Ok(self.leads.read().await.get(id).cloned())
    }

    async fn upsert_lead(&self, lead: &Lead) -> Result<UpsertDecision, AppError> {
        let mut leads = self.leads.write().await;
        let decision = retention::upsert_decision(leads.get(&lead.id), lead);
        if decision == UpsertDecision::Store {
            leads.insert(lead.id.clone(), lead.clone());
        }
        Ok(decision)
    }

    async fn overwrite_lead(&self, lead: &Lead) -> Result<bool, AppError> {
        let mut leads = self.leads.write().await;
        match leads.get_mut(&lead.id) {
            Some(current) => {
                *current = lead.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn load_settings(&self) -> Result<AdminSettings, AppError> {
        Ok(self.settings.read().await.clone().unwrap_or_default())
    }

    async fn store_settings(&self, settings: &AdminSettings) -> Result<(), AppError> {
        *self.settings.write().await = Some(settings.clone());
        Ok(())
    }

    async fn append_visit(&self, visit: &Visit) -> Result<(), AppError> {
        self.visits.write().await.push(visit.clone());
        Ok(())
    }

    async fn list_visits(&self) -> Result<Vec<Visit>, AppError> {
        Ok(self.visits.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lead::LeadStatus;
    use chrono::{Duration, TimeZone, Utc};

    fn lead(id: &str, status: LeadStatus, minutes: i64) -> Lead {
        Lead {
            id: id.into(),
            name: "Mitu".into(),
            phone: "01712345678".into(),
            offer_id: 3,
            branch_name: "Dhanmondi".into(),
            appointment_date: "2026-10-20".into(),
            appointment_time: "12:00".into(),
            submitted_at: Utc.with_ymd_and_hms(2026, 10, 17, 8, 0, 0).unwrap()
                + Duration::minutes(minutes),
            status,
            follow_up_date: None,
            follow_up_status: None,
            next_follow_up: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn draft_then_submission_is_one_record() {
        let store = MemoryStore::new();
        store.upsert_lead(&lead("x", LeadStatus::Abandoned, 0)).await.unwrap();
        store.upsert_lead(&lead("x", LeadStatus::New, 1)).await.unwrap();

        // Rascunho atrasado não derruba o lead enviado
        let late = store.upsert_lead(&lead("x", LeadStatus::Abandoned, 2)).await.unwrap();
        assert_eq!(late, UpsertDecision::IgnoreStale);

        let leads = store.list_leads().await.unwrap();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].status, LeadStatus::New);
    }

    #[tokio::test]
    async fn lists_newest_first_and_overwrites_only_existing() {
        let store = MemoryStore::new();
        store.upsert_lead(&lead("old", LeadStatus::New, 0)).await.unwrap();
        store.upsert_lead(&lead("new", LeadStatus::New, 10)).await.unwrap();

        let ids: Vec<String> = store.list_leads().await.unwrap().into_iter().map(|l| l.id).collect();
        assert_eq!(ids, ["new", "old"]);

        assert!(!store.overwrite_lead(&lead("ghost", LeadStatus::New, 0)).await.unwrap());
        assert!(store.overwrite_lead(&lead("old", LeadStatus::Contacted, 0)).await.unwrap());
        assert_eq!(
            store.find_lead("old").await.unwrap().map(|l| l.status),
            Some(LeadStatus::Contacted)
        );
    }

    #[tokio::test]
    async fn missing_settings_document_is_empty() {
        let store = MemoryStore::new();
        assert_eq!(store.load_settings().await.unwrap(), AdminSettings::default());
    }
}
