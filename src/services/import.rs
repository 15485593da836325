// src/services/import.rs

use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::lead::{Lead, LeadStatus};

pub const IMPORTED_NAME: &str = "Imported Customer";
pub const IMPORTED_BRANCH: &str = "Imported";
pub const NO_SLOT: &str = "N/A";

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportPayload {
    #[schema(example = 1)]
    pub service_id: i32,
    // Uma linha por cliente: "nome, telefone" ou só "telefone"
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Farzana, 01712345678\n01898765432")]
    pub data: String,
}

/// Converte o texto colado em leads `New` sem horário marcado.
/// Linhas sem telefone são ignoradas.
pub fn parse_import(data: &str, service_id: i32, now: DateTime<Utc>) -> Vec<Lead> {
    data.lines()
        .filter_map(|line| {
            let mut parts = line.split(',');
            let first = parts.next().unwrap_or_default().trim();
            let (name, phone) = match parts.next() {
                Some(second) => (first, second.trim()),
                None => (IMPORTED_NAME, first),
            };
            if phone.is_empty() {
                return None;
            }

            Some(Lead {
                id: Uuid::new_v4().to_string(),
                name: name.to_string(),
                phone: phone.to_string(),
                offer_id: service_id,
                branch_name: IMPORTED_BRANCH.to_string(),
                appointment_date: NO_SLOT.to_string(),
                appointment_time: NO_SLOT.to_string(),
                submitted_at: now,
                status: LeadStatus::New,
                follow_up_date: None,
                follow_up_status: None,
                next_follow_up: None,
                notes: None,
            })
        })
        .collect()
}
