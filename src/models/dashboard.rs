// src/models/dashboard.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::lead::Lead;

/// A "lente" ativa do painel: muda quais status contam como ativos.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Rascunhos abandonados
    Incomplete,
    /// Pipeline aberto (New + Contacted)
    #[default]
    Incoming,
    /// Concluídos, elegíveis para follow-up
    Retention,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    #[default]
    ThisMonth,
    AllTime,
}

// 1. Contagem por oferta (cards da barra lateral de serviços)
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OfferActiveCount {
    pub offer_id: i32,
    pub buy_item: &'static str,
    pub active_count: usize,
    pub total_count: usize,
}

// 2. Calendário
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMonth {
    #[schema(example = "2026-10")]
    pub month: String,
    pub view: ViewMode,
    // Dias vazios antes do dia 1 numa grade começando no domingo
    pub leading_blank_days: u32,
    pub days: Vec<CalendarDay>,
}

// 3. Visão financeira
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OfferFinancials {
    pub offer_id: i32,
    pub buy_item: &'static str,
    pub buy_price: &'static str,
    pub avg_price: Decimal,
    pub total_count: usize,
    pub completed_count: usize,
    pub lost_count: usize,
    pub pending_count: usize,
    pub potential_revenue: Decimal,
    pub actual_revenue: Decimal,
    pub lost_revenue: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub timeframe: Timeframe,
    #[schema(value_type = String, format = Date)]
    pub reference_date: NaiveDate,
    pub total_potential: Decimal,
    pub total_actual: Decimal,
    pub total_loss: Decimal,
    pub breakdown: Vec<OfferFinancials>,
}

// 4. Tráfego
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrafficSummary {
    pub visits_today: usize,
    pub visits_last_30_days: usize,
    pub total: usize,
    pub sources: Vec<LabelCount>,
    pub locations: Vec<LabelCount>,
}

// 5. Lista do dia selecionado
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayView {
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    pub view: ViewMode,
    pub leads: Vec<Lead>,
    pub selected_count: usize,
}

// 6. Cópia de telefones da seleção
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct PhoneList {
    #[schema(example = "01712345678,01898765432")]
    pub phones: String,
    pub count: usize,
}
