// src/handlers/dashboard.rs

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedAdmin,
    models::dashboard::{
        CalendarMonth, DayView, FinancialSummary, OfferActiveCount, Timeframe, TrafficSummary,
        ViewMode,
    },
    services::selection::ViewState,
};

// --- Query params ---

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ViewQuery {
    /// incomplete | incoming | retention (padrão: incoming)
    #[serde(default)]
    pub view: ViewMode,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CalendarQuery {
    #[serde(default)]
    pub view: ViewMode,
    /// YYYY-MM (padrão: mês corrente)
    pub month: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct FinancialsQuery {
    /// this_month | all_time (padrão: this_month)
    #[serde(default)]
    pub timeframe: Timeframe,
    /// YYYY-MM-DD (padrão: hoje no fuso do negócio)
    pub as_of: Option<String>,
}

// GET /api/admin/ledger/active-counts
#[utoipa::path(
    get,
    path = "/api/admin/ledger/active-counts",
    tag = "Dashboard",
    params(ViewQuery),
    responses((status = 200, body = Vec<OfferActiveCount>)),
    security(("api_jwt" = []))
)]
pub async fn get_active_counts(
    State(app_state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Query(query): Query<ViewQuery>,
) -> Result<Json<Vec<OfferActiveCount>>, AppError> {
    let counts = app_state.dashboard_service.active_counts(query.view).await?;
    Ok(Json(counts))
}

// GET /api/admin/ledger/calendar
#[utoipa::path(
    get,
    path = "/api/admin/ledger/calendar",
    tag = "Dashboard",
    params(CalendarQuery),
    responses(
        (status = 200, body = CalendarMonth),
        (status = 400, description = "Invalid month")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_calendar(
    State(app_state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarMonth>, AppError> {
    let calendar = app_state
        .dashboard_service
        .calendar(query.view, query.month.as_deref())
        .await?;
    Ok(Json(calendar))
}

// GET /api/admin/ledger/financials
#[utoipa::path(
    get,
    path = "/api/admin/ledger/financials",
    tag = "Dashboard",
    params(FinancialsQuery),
    responses(
        (status = 200, body = FinancialSummary),
        (status = 400, description = "Invalid asOf date")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_financials(
    State(app_state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Query(query): Query<FinancialsQuery>,
) -> Result<Json<FinancialSummary>, AppError> {
    let summary = app_state
        .dashboard_service
        .financials(query.timeframe, query.as_of.as_deref())
        .await?;
    Ok(Json(summary))
}

// GET /api/admin/analytics
#[utoipa::path(
    get,
    path = "/api/admin/analytics",
    tag = "Dashboard",
    responses((status = 200, body = TrafficSummary)),
    security(("api_jwt" = []))
)]
pub async fn get_analytics(
    State(app_state): State<AppState>,
    _admin: AuthenticatedAdmin,
) -> Result<Json<TrafficSummary>, AppError> {
    let summary = app_state.dashboard_service.traffic().await?;
    Ok(Json(summary))
}

// POST /api/admin/leads/view
#[utoipa::path(
    post,
    path = "/api/admin/leads/view",
    tag = "Dashboard",
    request_body = ViewState,
    responses((status = 200, body = DayView)),
    security(("api_jwt" = []))
)]
pub async fn get_day_view(
    State(app_state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Json(state): Json<ViewState>,
) -> Result<Json<DayView>, AppError> {
    let day = app_state.dashboard_service.day_view(&state).await?;
    Ok(Json(day))
}
