// src/handlers/retention.rs

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedAdmin,
    models::lead::{FollowUpStatus, Lead, LeadStatus},
    services::{import::ImportPayload, lead_service::BulkStatusResult},
};

// --- Payloads ---

#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusPayload {
    /// Contacted | Completed
    pub status: LeadStatus,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct FollowUpPayload {
    /// Padrão: hoje + 30 dias
    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date, example = "2026-11-16")]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OutcomePayload {
    /// Called | Converted | Missed
    pub outcome: FollowUpStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NotesPayload {
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkStatusPayload {
    pub ids: Vec<String>,
    pub status: LeadStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImportResponse {
    pub processed: usize,
}

// POST /api/admin/leads/{id}/status
#[utoipa::path(
    post,
    path = "/api/admin/leads/{id}/status",
    tag = "Retention",
    params(("id" = String, Path, description = "Lead id")),
    request_body = StatusPayload,
    responses(
        (status = 200, body = Lead),
        (status = 404, description = "Lead not found"),
        (status = 409, description = "Transition not allowed")
    ),
    security(("api_jwt" = []))
)]
pub async fn change_status(
    State(app_state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Path(id): Path<String>,
    Json(payload): Json<StatusPayload>,
) -> Result<Json<Lead>, AppError> {
    let lead = app_state
        .lead_service
        .change_status(&id, payload.status)
        .await?;
    Ok(Json(lead))
}

// POST /api/admin/leads/{id}/follow-up
#[utoipa::path(
    post,
    path = "/api/admin/leads/{id}/follow-up",
    tag = "Retention",
    params(("id" = String, Path, description = "Lead id")),
    request_body = FollowUpPayload,
    responses(
        (status = 200, body = Lead),
        (status = 404, description = "Lead not found"),
        (status = 409, description = "Lead is an abandoned draft")
    ),
    security(("api_jwt" = []))
)]
pub async fn schedule_follow_up(
    State(app_state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Path(id): Path<String>,
    Json(payload): Json<FollowUpPayload>,
) -> Result<Json<Lead>, AppError> {
    let lead = app_state
        .lead_service
        .schedule_follow_up(&id, payload.date)
        .await?;
    Ok(Json(lead))
}

// POST /api/admin/leads/{id}/outcome
#[utoipa::path(
    post,
    path = "/api/admin/leads/{id}/outcome",
    tag = "Retention",
    params(("id" = String, Path, description = "Lead id")),
    request_body = OutcomePayload,
    responses(
        (status = 200, body = Lead),
        (status = 404, description = "Lead not found"),
        (status = 409, description = "No follow-up scheduled")
    ),
    security(("api_jwt" = []))
)]
pub async fn record_outcome(
    State(app_state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Path(id): Path<String>,
    Json(payload): Json<OutcomePayload>,
) -> Result<Json<Lead>, AppError> {
    let lead = app_state
        .lead_service
        .record_outcome(&id, payload.outcome)
        .await?;
    Ok(Json(lead))
}

// PUT /api/admin/leads/{id}/notes
#[utoipa::path(
    put,
    path = "/api/admin/leads/{id}/notes",
    tag = "Retention",
    params(("id" = String, Path, description = "Lead id")),
    request_body = NotesPayload,
    responses(
        (status = 200, body = Lead),
        (status = 404, description = "Lead not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn attach_note(
    State(app_state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Path(id): Path<String>,
    Json(payload): Json<NotesPayload>,
) -> Result<Json<Lead>, AppError> {
    let lead = app_state
        .lead_service
        .attach_note(&id, &payload.notes)
        .await?;
    Ok(Json(lead))
}

// POST /api/admin/leads/bulk-status
#[utoipa::path(
    post,
    path = "/api/admin/leads/bulk-status",
    tag = "Retention",
    request_body = BulkStatusPayload,
    responses(
        (status = 200, body = BulkStatusResult),
        (status = 400, description = "No leads selected")
    ),
    security(("api_jwt" = []))
)]
pub async fn bulk_status(
    State(app_state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Json(payload): Json<BulkStatusPayload>,
) -> Result<Json<BulkStatusResult>, AppError> {
    let result = app_state
        .lead_service
        .bulk_status(&payload.ids, payload.status)
        .await?;
    Ok(Json(result))
}

// POST /api/admin/leads/import
#[utoipa::path(
    post,
    path = "/api/admin/leads/import",
    tag = "Retention",
    request_body = ImportPayload,
    responses((status = 200, body = ImportResponse)),
    security(("api_jwt" = []))
)]
pub async fn import_leads(
    State(app_state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Json(payload): Json<ImportPayload>,
) -> Result<Json<ImportResponse>, AppError> {
    let processed = app_state.lead_service.import(&payload).await?;
    Ok(Json(ImportResponse { processed }))
}
