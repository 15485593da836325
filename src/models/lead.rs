// src/models/lead.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::dates;

// --- ENUMS ---

// Mapeia o CREATE TYPE lead_status do banco
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash, ToSchema)]
#[sqlx(type_name = "lead_status")]
pub enum LeadStatus {
    New,
    Contacted,
    Completed,
    Abandoned,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Completed => "Completed",
            LeadStatus::Abandoned => "Abandoned",
        }
    }
}

// Mapeia o CREATE TYPE follow_up_status do banco
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash, ToSchema)]
#[sqlx(type_name = "follow_up_status")]
pub enum FollowUpStatus {
    Pending,
    Called,
    Converted,
    Missed,
}

impl FollowUpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FollowUpStatus::Pending => "Pending",
            FollowUpStatus::Called => "Called",
            FollowUpStatus::Converted => "Converted",
            FollowUpStatus::Missed => "Missed",
        }
    }
}

// --- LEAD (uma tentativa de reserva/contato) ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Validate, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    // Gerado no cliente; o mesmo id liga o rascunho abandonado à reserva final
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "4f1c2a9e-7d1b-4c55-9f0e-0a3c1b2d4e5f")]
    pub id: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Nusrat Jahan")]
    pub name: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "01712345678")]
    pub phone: String,

    // Não é validado contra o catálogo
    #[schema(example = 1)]
    pub offer_id: i32,

    #[schema(example = "Dhanmondi")]
    pub branch_name: String,

    // YYYY-MM-DD ou o sentinela "N/A"
    #[schema(example = "2026-10-20")]
    pub appointment_date: String,

    #[schema(example = "15:30")]
    pub appointment_time: String,

    pub submitted_at: DateTime<Utc>,

    pub status: LeadStatus,

    // --- Retenção ---
    // Vazio ou inválido vira None (registros legados)
    #[serde(
        default,
        deserialize_with = "dates::deserialize_lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, format = Date, example = "2026-11-19")]
    pub follow_up_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_status: Option<FollowUpStatus>,

    // Legado, mantido só por compatibilidade
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_follow_up: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Lead {
    /// Data do agendamento, se for uma data ISO válida (sentinelas viram `None`).
    pub fn appointment_day(&self) -> Option<NaiveDate> {
        dates::parse_iso_date(&self.appointment_date)
    }

    pub fn is_abandoned(&self) -> bool {
        self.status == LeadStatus::Abandoned
    }

    /// Resultado da ligação de retenção, "Pending" quando ainda não há um.
    pub fn outcome_label(&self) -> &'static str {
        self.follow_up_status
            .map(|s| s.as_str())
            .unwrap_or(FollowUpStatus::Pending.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_wire_format_without_optional_fields() {
        let lead: Lead = serde_json::from_value(json!({
            "id": "abc",
            "name": "Rina",
            "phone": "01712345678",
            "offerId": 2,
            "branchName": "Mohammadpur",
            "appointmentDate": "N/A",
            "appointmentTime": "N/A",
            "submittedAt": "2026-10-01T09:00:00.000Z",
            "status": "Abandoned"
        }))
        .unwrap();

        assert_eq!(lead.status, LeadStatus::Abandoned);
        assert_eq!(lead.follow_up_date, None);
        assert_eq!(lead.appointment_day(), None);
        assert_eq!(lead.outcome_label(), "Pending");
    }

    #[test]
    fn blank_or_garbage_follow_up_dates_are_tolerated() {
        for raw in [json!(""), json!("N/A"), json!("19/11/2026"), json!(20261119), json!(null)] {
            let lead: Lead = serde_json::from_value(json!({
                "id": "abc",
                "name": "Rina",
                "phone": "01712345678",
                "offerId": 2,
                "branchName": "Mohammadpur",
                "appointmentDate": "2026-10-01",
                "appointmentTime": "10:00",
                "submittedAt": "2026-10-01T09:00:00Z",
                "status": "Completed",
                "followUpDate": raw
            }))
            .unwrap();
            assert_eq!(lead.follow_up_date, None);
        }
    }

    #[test]
    fn serializes_follow_up_fields_in_camel_case() {
        let lead: Lead = serde_json::from_value(json!({
            "id": "abc",
            "name": "Rina",
            "phone": "01712345678",
            "offerId": 2,
            "branchName": "Mohammadpur",
            "appointmentDate": "2026-10-01",
            "appointmentTime": "10:00",
            "submittedAt": "2026-10-01T09:00:00Z",
            "status": "Completed",
            "followUpDate": "2026-10-31",
            "followUpStatus": "Converted"
        }))
        .unwrap();

        let value = serde_json::to_value(&lead).unwrap();
        assert_eq!(value["followUpDate"], "2026-10-31");
        assert_eq!(value["followUpStatus"], "Converted");
        assert!(value.get("notes").is_none());
        assert_eq!(lead.outcome_label(), "Converted");
    }
}
