// src/services/dashboard_service.rs

use std::sync::Arc;

use chrono::{Datelike, FixedOffset, NaiveDate, Utc};

use crate::{
    catalog,
    common::{dates, error::AppError},
    db::RecordStore,
    models::{
        dashboard::{
            CalendarMonth, DayView, FinancialSummary, OfferActiveCount, PhoneList, Timeframe,
            TrafficSummary, ViewMode,
        },
        visit::{TrackVisitPayload, Visit},
    },
    services::{
        analytics::{self, UNKNOWN_LOCATION},
        ledger::LeadLedger,
        messaging::{self, WhatsAppLink},
        selection::{self, ViewState},
    },
};

/// Painel administrativo: carrega os registros do store e delega os cálculos
/// às funções puras do ledger, com "hoje" no fuso do negócio.
#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn RecordStore>,
    business_offset: FixedOffset,
    business_name: String,
}

impl DashboardService {
    pub fn new(store: Arc<dyn RecordStore>, business_offset: FixedOffset, business_name: String) -> Self {
        Self {
            store,
            business_offset,
            business_name,
        }
    }

    pub fn today(&self) -> NaiveDate {
        dates::local_date(Utc::now(), self.business_offset)
    }

    pub async fn active_counts(&self, view: ViewMode) -> Result<Vec<OfferActiveCount>, AppError> {
        let leads = self.store.list_leads().await?;
        Ok(LeadLedger::new(&leads, catalog::OFFERS).active_counts(view))
    }

    /// `month` no formato `YYYY-MM`; sem ele, o mês corrente.
    pub async fn calendar(&self, view: ViewMode, month: Option<&str>) -> Result<CalendarMonth, AppError> {
        let first_day = match month {
            Some(raw) => dates::parse_month(raw).ok_or_else(|| {
                AppError::InvalidQuery(format!("Invalid month '{raw}', expected YYYY-MM."))
            })?,
            None => {
                let today = self.today();
                today.with_day(1).unwrap_or(today)
            }
        };

        let leads = self.store.list_leads().await?;
        Ok(LeadLedger::new(&leads, catalog::OFFERS).calendar_month(first_day, view))
    }

    pub async fn financials(
        &self,
        timeframe: Timeframe,
        as_of: Option<&str>,
    ) -> Result<FinancialSummary, AppError> {
        let today = match as_of {
            Some(raw) => dates::parse_iso_date(raw).ok_or_else(|| {
                AppError::InvalidQuery(format!("Invalid date '{raw}', expected YYYY-MM-DD."))
            })?,
            None => self.today(),
        };

        let leads = self.store.list_leads().await?;
        Ok(LeadLedger::new(&leads, catalog::OFFERS).financials(timeframe, today))
    }

    pub async fn traffic(&self) -> Result<TrafficSummary, AppError> {
        let visits = self.store.list_visits().await?;
        Ok(analytics::traffic_summary(&visits, Utc::now(), self.business_offset))
    }

    pub async fn list_visits(&self) -> Result<Vec<Visit>, AppError> {
        self.store.list_visits().await
    }

    /// Completa a visita parcial: horário do servidor, origem pelo referrer,
    /// localização "Unknown".
    pub async fn track_visit(
        &self,
        payload: TrackVisitPayload,
        referrer: Option<&str>,
    ) -> Result<Visit, AppError> {
        let visit = Visit {
            timestamp: payload.timestamp.unwrap_or_else(Utc::now),
            source: analytics::classify_source(payload.source.as_deref(), referrer),
            location: Some(
                payload
                    .location
                    .filter(|l| !l.trim().is_empty())
                    .unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
            ),
        };
        self.store.append_visit(&visit).await?;
        tracing::debug!("Visita registrada de '{}'", visit.source);
        Ok(visit)
    }

    pub async fn day_view(&self, state: &ViewState) -> Result<DayView, AppError> {
        let leads = self.store.list_leads().await?;
        let ledger = LeadLedger::new(&leads, catalog::OFFERS);
        let visible = state.visible(&ledger);
        let selected_count = visible.iter().filter(|l| state.selected.contains(&l.id)).count();

        Ok(DayView {
            date: state.selected_date,
            view: state.view,
            leads: visible.into_iter().cloned().collect(),
            selected_count,
        })
    }

    /// `(nome do arquivo, conteúdo CSV)`.
    pub async fn export_csv(&self, state: &ViewState) -> Result<(String, String), AppError> {
        let leads = self.store.list_leads().await?;
        let ledger = LeadLedger::new(&leads, catalog::OFFERS);
        let visible = state.visible(&ledger);
        let rows = state.export_rows(&visible)?;

        let csv = selection::to_csv(&rows, catalog::OFFERS, state.view);
        tracing::info!("Exportando {} leads em CSV", rows.len());
        Ok((state.export_filename(), csv))
    }

    pub async fn copy_phones(&self, state: &ViewState) -> Result<PhoneList, AppError> {
        let leads = self.store.list_leads().await?;
        let ledger = LeadLedger::new(&leads, catalog::OFFERS);
        let visible = state.visible(&ledger);
        let (phones, count) = state.copy_phones(&visible)?;
        Ok(PhoneList { phones, count })
    }

    /// Sem template: lembrete do agendamento. Com template: `{name}` preenchido.
    pub async fn whatsapp_link(
        &self,
        lead_id: &str,
        template: Option<&str>,
    ) -> Result<WhatsAppLink, AppError> {
        let lead = self
            .store
            .find_lead(lead_id)
            .await?
            .ok_or_else(|| AppError::LeadNotFound(lead_id.to_string()))?;

        let message = match template {
            Some(t) => messaging::fill_template(t, &lead.name),
            None => messaging::reminder_message(&lead, &self.business_name),
        };
        messaging::whatsapp_link(&lead.phone, &message)
    }
}
