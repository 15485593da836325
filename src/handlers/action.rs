// src/handlers/action.rs

//! Endpoint único endereçado por `?action=`, no formato que a landing page e
//! o painel já usam.

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::require_admin,
    models::{
        lead::Lead,
        settings::{AdminSettings, PublicSettings},
        visit::{TrackVisitPayload, Visit},
    },
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ActionQuery {
    /// get_leads | save_lead | update_lead | get_settings | save_settings | track_visit | get_visits
    pub action: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    GetLeads,
    SaveLead,
    UpdateLead,
    GetSettings,
    SaveSettings,
    TrackVisit,
    GetVisits,
}

impl Action {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "get_leads" => Some(Self::GetLeads),
            "save_lead" => Some(Self::SaveLead),
            "update_lead" => Some(Self::UpdateLead),
            "get_settings" => Some(Self::GetSettings),
            "save_settings" => Some(Self::SaveSettings),
            "track_visit" => Some(Self::TrackVisit),
            "get_visits" => Some(Self::GetVisits),
            _ => None,
        }
    }

    fn is_public(self) -> bool {
        matches!(self, Self::SaveLead | Self::TrackVisit | Self::GetSettings)
    }
}

fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    Ok(serde_json::from_slice(body)?)
}

fn success() -> Response {
    Json(json!({ "success": true })).into_response()
}

// GET|POST /api.php?action=...
#[utoipa::path(
    method(get, post),
    path = "/api.php",
    tag = "Actions",
    params(ActionQuery),
    request_body(content = Lead, description = "Lead, AdminSettings or partial Visit, depending on the action"),
    responses(
        (status = 200, description = "Lead list, settings (tracking ids only without a token), visit list or { success }"),
        (status = 400, description = "Unknown action or malformed body"),
        (status = 401, description = "Admin action without a valid token")
    ),
    security((), ("api_jwt" = []))
)]
pub async fn dispatch(
    State(app_state): State<AppState>,
    Query(query): Query<ActionQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let raw = query.action.unwrap_or_default();
    let action = Action::parse(&raw).ok_or(AppError::UnknownAction(raw))?;
    if !action.is_public() {
        require_admin(&app_state, &headers)?;
    }

    match action {
        Action::GetLeads => {
            let leads = app_state.lead_service.list_leads().await?;
            Ok(Json(leads).into_response())
        }
        Action::SaveLead => Ok(save_lead(&app_state, &body).await),
        Action::UpdateLead => {
            let lead: Lead = parse_body(&body)?;
            app_state.lead_service.update_lead(lead).await?;
            Ok(success())
        }
        Action::GetSettings => {
            let settings = app_state.settings_service.get_settings().await?;
            // Sem token: só os ids de rastreamento; token inválido continua 401
            if headers.contains_key(header::AUTHORIZATION) {
                require_admin(&app_state, &headers)?;
                Ok(Json(settings).into_response())
            } else {
                Ok(Json(PublicSettings::from(settings)).into_response())
            }
        }
        Action::SaveSettings => {
            let settings: AdminSettings = parse_body(&body)?;
            app_state.settings_service.save_settings(&settings).await?;
            Ok(success())
        }
        Action::TrackVisit => {
            // Corpo vazio = visita sem nenhum dado do cliente
            let payload: TrackVisitPayload = if body.is_empty() {
                TrackVisitPayload::default()
            } else {
                parse_body(&body)?
            };
            let referrer = headers
                .get(header::REFERER)
                .and_then(|v| v.to_str().ok());
            app_state
                .dashboard_service
                .track_visit(payload, referrer)
                .await?;
            Ok(success())
        }
        Action::GetVisits => {
            let visits: Vec<Visit> = app_state.dashboard_service.list_visits().await?;
            Ok(Json(visits).into_response())
        }
    }
}

// save_lead sempre responde com { success }, inclusive nas falhas
async fn save_lead(app_state: &AppState, body: &Bytes) -> Response {
    let result = match parse_body::<Lead>(body) {
        Ok(lead) => app_state.lead_service.save_lead(lead).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(_) => success(),
        Err(e) => {
            let (status, message) = e.status_and_message();
            tracing::warn!("save_lead falhou: {}", e);
            (status, Json(json!({ "success": false, "error": message }))).into_response()
        }
    }
}
