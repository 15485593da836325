// src/services/drafts.rs

//! Captura de rascunhos do formulário de reserva.
//!
//! Quando o telefone já permite contato e a reserva ainda não foi enviada,
//! cada alteração rearma um timer de 1,5 s; se o visitante parar de digitar,
//! o estado atual é gravado como lead `Abandoned` com o id da sessão. O envio
//! real grava o mesmo id como `New` (upsert), substituindo o rascunho.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use tokio::task::JoinHandle;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    catalog::{self, OFFERS},
    common::error::AppError,
    db::store::RecordStore,
    models::lead::{Lead, LeadStatus},
};

/// Tamanho mínimo do telefone para o rascunho valer a pena.
pub const PHONE_MIN_LEN: usize = 11;
pub const DRAFT_IDLE: Duration = Duration::from_millis(1500);
pub const ANONYMOUS_NAME: &str = "Anonymous User";

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingForm {
    #[validate(length(min = 1, message = "required"))]
    pub name: String,
    #[validate(length(min = 1, message = "required"))]
    pub phone: String,
    pub branch: String,
    #[validate(custom(function = "validate_known_offer"))]
    pub offer_id: i32,
    #[validate(length(min = 1, message = "required"))]
    pub date: String,
    #[validate(length(min = 1, message = "required"))]
    pub time: String,
}

fn validate_known_offer(id: i32) -> Result<(), ValidationError> {
    if catalog::find_offer(OFFERS, id).is_none() {
        let mut err = ValidationError::new("unknown_offer");
        err.message = Some("Please choose one of the listed offers.".into());
        return Err(err);
    }
    Ok(())
}

impl BookingForm {
    /// Campos sem espaços nas pontas; é sobre esta cópia que se valida e grava.
    fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            branch: self.branch.trim().to_string(),
            offer_id: self.offer_id,
            date: self.date.trim().to_string(),
            time: self.time.trim().to_string(),
        }
    }

    fn is_contactable(&self) -> bool {
        self.phone.chars().count() >= PHONE_MIN_LEN
    }

    fn to_lead(&self, id: &str, status: LeadStatus) -> Lead {
        let name = match self.name.as_str() {
            "" if status == LeadStatus::Abandoned => ANONYMOUS_NAME.to_string(),
            name => name.to_string(),
        };
        Lead {
            id: id.to_string(),
            name,
            phone: self.phone.clone(),
            offer_id: self.offer_id,
            branch_name: self.branch.clone(),
            appointment_date: self.date.clone(),
            appointment_time: self.time.clone(),
            submitted_at: Utc::now(),
            status,
            follow_up_date: None,
            follow_up_status: None,
            next_follow_up: None,
            notes: None,
        }
    }
}

/// Destino das gravações do formulário. `true` quando o lead foi aceito.
#[async_trait]
pub trait LeadSink: Send + Sync + 'static {
    async fn save_lead(&self, lead: &Lead) -> bool;
}

/// Grava direto no `RecordStore` (usado quando o formulário roda no mesmo processo).
pub struct StoreSink(pub Arc<dyn RecordStore>);

#[async_trait]
impl LeadSink for StoreSink {
    async fn save_lead(&self, lead: &Lead) -> bool {
        match self.0.upsert_lead(lead).await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("🔥 Falha ao gravar lead {}: {}", lead.id, e);
                false
            }
        }
    }
}

pub struct DraftCapture<S: LeadSink> {
    session_id: String,
    sink: Arc<S>,
    pending: Option<JoinHandle<()>>,
    submitted: Arc<AtomicBool>,
}

impl<S: LeadSink> DraftCapture<S> {
    /// Um id por montagem do formulário; estável até o envio.
    pub fn new(sink: Arc<S>) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            sink,
            pending: None,
            submitted: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted.load(Ordering::SeqCst)
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Chamado a cada alteração dos campos observados (debounce).
    pub fn on_change(&mut self, form: &BookingForm) {
        self.cancel_pending();
        let form = form.trimmed();
        if self.is_submitted() || !form.is_contactable() {
            return;
        }

        let draft = form.to_lead(&self.session_id, LeadStatus::Abandoned);
        let sink = Arc::clone(&self.sink);
        let submitted = Arc::clone(&self.submitted);

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(DRAFT_IDLE).await;
            if submitted.load(Ordering::SeqCst) {
                return;
            }
            // Best-effort: falha aqui nunca chega ao visitante
            if !sink.save_lead(&draft).await {
                tracing::debug!("Rascunho {} não foi gravado", draft.id);
            }
        }));
    }

    /// Envio real. Em caso de falha o visitante recebe o pedido para tentar de novo.
    pub async fn submit(&mut self, form: &BookingForm) -> Result<Lead, AppError> {
        let form = form.trimmed();
        form.validate()?;
        self.cancel_pending();

        let lead = form.to_lead(&self.session_id, LeadStatus::New);
        if !self.sink.save_lead(&lead).await {
            return Err(AppError::SubmissionFailed);
        }
        self.submitted.store(true, Ordering::SeqCst);
        tracing::info!("✅ Reserva {} enviada", lead.id);
        Ok(lead)
    }
}

impl<S: LeadSink> Drop for DraftCapture<S> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
