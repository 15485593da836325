// src/services/settings_service.rs

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::RecordStore,
    models::settings::{AdminSettings, AutomationRule, NewRulePayload},
};

pub const DEFAULT_INTERVAL_DAYS: u32 = 7;

#[derive(Clone)]
pub struct SettingsService {
    store: Arc<dyn RecordStore>,
}

impl SettingsService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn get_settings(&self) -> Result<AdminSettings, AppError> {
        self.store.load_settings().await
    }

    pub async fn save_settings(&self, settings: &AdminSettings) -> Result<(), AppError> {
        self.store.store_settings(settings).await?;
        tracing::info!("✅ Configurações salvas");
        Ok(())
    }

    pub async fn list_rules(&self) -> Result<Vec<AutomationRule>, AppError> {
        Ok(self.store.load_settings().await?.automation_rules)
    }

    // Lê o documento, altera a lista e regrava tudo (última escrita vence)
    pub async fn add_rule(&self, payload: NewRulePayload) -> Result<AutomationRule, AppError> {
        payload.validate()?;

        let rule = AutomationRule {
            id: Uuid::new_v4().to_string(),
            name: payload.name,
            rule_type: payload.rule_type.unwrap_or_default(),
            target_service_id: payload.target_service_id,
            manual_numbers: payload.manual_numbers,
            interval_days: payload.interval_days.unwrap_or(DEFAULT_INTERVAL_DAYS),
            message_template: payload.message_template,
            active: true,
        };

        let mut settings = self.store.load_settings().await?;
        settings.automation_rules.push(rule.clone());
        self.store.store_settings(&settings).await?;

        tracing::info!("✅ Regra de automação '{}' criada", rule.name);
        Ok(rule)
    }

    pub async fn delete_rule(&self, id: &str) -> Result<(), AppError> {
        let mut settings = self.store.load_settings().await?;
        let before = settings.automation_rules.len();
        settings.automation_rules.retain(|r| r.id != id);
        if settings.automation_rules.len() == before {
            return Err(AppError::RuleNotFound(id.to_string()));
        }
        self.store.store_settings(&settings).await
    }

    pub async fn find_rule(&self, id: &str) -> Result<AutomationRule, AppError> {
        self.list_rules()
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::RuleNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::settings::RuleType;

    fn payload(name: &str) -> NewRulePayload {
        NewRulePayload {
            name: name.into(),
            rule_type: None,
            target_service_id: Some(1),
            manual_numbers: None,
            interval_days: None,
            message_template: "Hi {name}!".into(),
        }
    }

    #[tokio::test]
    async fn rules_are_added_with_defaults_and_deleted() {
        let service = SettingsService::new(Arc::new(MemoryStore::new()));

        let rule = service.add_rule(payload("Facial rebook")).await.unwrap();
        assert_eq!(rule.rule_type, RuleType::Service);
        assert_eq!(rule.interval_days, DEFAULT_INTERVAL_DAYS);
        assert!(rule.active);
        assert_eq!(service.find_rule(&rule.id).await.unwrap(), rule);

        service.delete_rule(&rule.id).await.unwrap();
        assert!(service.list_rules().await.unwrap().is_empty());
        assert!(matches!(
            service.delete_rule(&rule.id).await,
            Err(AppError::RuleNotFound(_))
        ));
    }

    #[tokio::test]
    async fn rule_requires_name_and_template() {
        let service = SettingsService::new(Arc::new(MemoryStore::new()));
        let mut bad = payload("");
        bad.message_template = String::new();
        assert!(matches!(
            service.add_rule(bad).await,
            Err(AppError::ValidationError(_))
        ));
    }
}
