// src/models/settings.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum RuleType {
    Manual,
    #[default]
    Service,
}

/// Regra de campanha de WhatsApp. Só configuração: nada dispara essas regras.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AutomationRule {
    pub id: String,
    #[schema(example = "Facial 30-day rebook")]
    pub name: String,
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_service_id: Option<i32>,
    // Texto cru com números, como o operador colou
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_numbers: Option<String>,
    pub interval_days: u32,
    // Contém o placeholder {name}
    #[schema(example = "Hi {name}, it's time for your next facial!")]
    pub message_template: String,
    pub active: bool,
}

/// Documento singleton de configurações, sempre regravado inteiro.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminSettings {
    #[serde(default)]
    #[schema(example = "G-XXXXXXXXXX")]
    pub google_analytics_id: String,
    #[serde(default)]
    pub facebook_pixel_id: String,
    #[serde(default)]
    pub automation_rules: Vec<AutomationRule>,
}

/// O que a landing page enxerga: só os ids de rastreamento, nunca as regras
/// (que carregam listas de telefones de clientes).
#[derive(Debug, Clone, Default, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicSettings {
    pub google_analytics_id: String,
    pub facebook_pixel_id: String,
}

impl From<AdminSettings> for PublicSettings {
    fn from(settings: AdminSettings) -> Self {
        Self {
            google_analytics_id: settings.google_analytics_id,
            facebook_pixel_id: settings.facebook_pixel_id,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewRulePayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: String,
    #[serde(default, rename = "type")]
    pub rule_type: Option<RuleType>,
    pub target_service_id: Option<i32>,
    pub manual_numbers: Option<String>,
    #[validate(range(min = 1, message = "must_be_positive"))]
    pub interval_days: Option<u32>,
    #[validate(length(min = 1, message = "required"))]
    pub message_template: String,
}
