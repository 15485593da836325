// src/handlers/settings.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedAdmin,
    models::settings::{AutomationRule, NewRulePayload},
};

// GET /api/admin/automation-rules
#[utoipa::path(
    get,
    path = "/api/admin/automation-rules",
    tag = "Settings",
    responses((status = 200, body = Vec<AutomationRule>)),
    security(("api_jwt" = []))
)]
pub async fn list_rules(
    State(app_state): State<AppState>,
    _admin: AuthenticatedAdmin,
) -> Result<impl IntoResponse, AppError> {
    let rules = app_state.settings_service.list_rules().await?;
    Ok((StatusCode::OK, Json(rules)))
}

// POST /api/admin/automation-rules
#[utoipa::path(
    post,
    path = "/api/admin/automation-rules",
    tag = "Settings",
    request_body = NewRulePayload,
    responses(
        (status = 201, body = AutomationRule),
        (status = 400, description = "Name and message template are required")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_rule(
    State(app_state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Json(payload): Json<NewRulePayload>,
) -> Result<impl IntoResponse, AppError> {
    let rule = app_state.settings_service.add_rule(payload).await?;
    Ok((StatusCode::CREATED, Json(rule)))
}

// DELETE /api/admin/automation-rules/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/automation-rules/{id}",
    tag = "Settings",
    params(("id" = String, Path, description = "Rule id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Rule not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_rule(
    State(app_state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    app_state.settings_service.delete_rule(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
