// src/models/visit.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Visita à landing page. Append-only, nunca alterada.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    #[sqlx(rename = "visited_at")]
    pub timestamp: DateTime<Utc>,

    // Classificação livre da origem do tráfego
    #[schema(example = "Facebook (Organic)")]
    pub source: String,

    // Geolocalização best-effort
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Dhaka, Dhaka Division")]
    pub location: Option<String>,
}

/// Corpo aceito por `track_visit`: qualquer campo ausente é completado no servidor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackVisitPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}
