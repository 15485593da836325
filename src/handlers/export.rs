// src/handlers/export.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedAdmin,
    models::dashboard::PhoneList,
    services::{messaging::WhatsAppLink, selection::ViewState},
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct WhatsAppQuery {
    /// Regra de automação cujo template será usado; sem ela, lembrete do agendamento
    pub rule_id: Option<String>,
}

// POST /api/admin/export/csv
#[utoipa::path(
    post,
    path = "/api/admin/export/csv",
    tag = "Export",
    request_body = ViewState,
    responses(
        (status = 200, description = "CSV attachment", content_type = "text/csv", body = String),
        (status = 400, description = "No data to download")
    ),
    security(("api_jwt" = []))
)]
pub async fn export_csv(
    State(app_state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Json(state): Json<ViewState>,
) -> Result<impl IntoResponse, AppError> {
    let (filename, csv) = app_state.dashboard_service.export_csv(&state).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    ))
}

// POST /api/admin/export/phones
#[utoipa::path(
    post,
    path = "/api/admin/export/phones",
    tag = "Export",
    request_body = ViewState,
    responses(
        (status = 200, body = PhoneList),
        (status = 400, description = "No leads selected")
    ),
    security(("api_jwt" = []))
)]
pub async fn copy_phones(
    State(app_state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Json(state): Json<ViewState>,
) -> Result<Json<PhoneList>, AppError> {
    let phones = app_state.dashboard_service.copy_phones(&state).await?;
    Ok(Json(phones))
}

// GET /api/admin/leads/{id}/whatsapp
#[utoipa::path(
    get,
    path = "/api/admin/leads/{id}/whatsapp",
    tag = "Export",
    params(("id" = String, Path, description = "Lead id"), WhatsAppQuery),
    responses(
        (status = 200, body = WhatsAppLink),
        (status = 404, description = "Lead or rule not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn whatsapp_link(
    State(app_state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Path(id): Path<String>,
    Query(query): Query<WhatsAppQuery>,
) -> Result<Json<WhatsAppLink>, AppError> {
    let template = match query.rule_id.as_deref() {
        Some(rule_id) => Some(app_state.settings_service.find_rule(rule_id).await?.message_template),
        None => None,
    };

    let link = app_state
        .dashboard_service
        .whatsapp_link(&id, template.as_deref())
        .await?;
    Ok(Json(link))
}
