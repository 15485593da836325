// src/client.rs

//! Cliente best-effort do endpoint de ações. Nenhuma falha de rede sobe para
//! quem chama: leituras viram valores vazios, escritas são engolidas, e tudo
//! é logado.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use url::Url;

use crate::{
    models::{
        lead::Lead,
        settings::AdminSettings,
        visit::{TrackVisitPayload, Visit},
    },
    services::drafts::LeadSink,
};

#[derive(Clone)]
pub struct StorageClient {
    http: Client,
    endpoint: Url,
    token: Option<String>,
}

impl StorageClient {
    /// `endpoint` é a URL completa do endpoint (ex.: `https://host/api.php`).
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: Client::new(),
            endpoint,
            token: None,
        }
    }

    /// Token do painel, enviado nas ações administrativas.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn action_url(&self, action: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().clear().append_pair("action", action);
        url
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get<T: DeserializeOwned>(&self, action: &str) -> reqwest::Result<T> {
        self.authorize(self.http.get(self.action_url(action)))
            .send()
            .await?
            .error_for_status()?
            .json::<T>()
            .await
    }

    async fn post<B: Serialize + ?Sized>(&self, action: &str, body: &B) -> reqwest::Result<Value> {
        self.authorize(self.http.post(self.action_url(action)))
            .json(body)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await
    }

    pub async fn get_leads(&self) -> Vec<Lead> {
        self.get("get_leads").await.unwrap_or_else(|e| {
            tracing::error!("🔥 get_leads falhou: {}", e);
            Vec::new()
        })
    }

    pub async fn save_lead(&self, lead: &Lead) -> bool {
        match self.post("save_lead", lead).await {
            Ok(body) => body.get("success").and_then(Value::as_bool).unwrap_or(false),
            Err(e) => {
                tracing::error!("🔥 save_lead falhou: {}", e);
                false
            }
        }
    }

    pub async fn update_lead(&self, lead: &Lead) {
        if let Err(e) = self.post("update_lead", lead).await {
            tracing::error!("🔥 update_lead falhou: {}", e);
        }
    }

    pub async fn get_settings(&self) -> AdminSettings {
        self.get("get_settings").await.unwrap_or_else(|e| {
            tracing::error!("🔥 get_settings falhou: {}", e);
            AdminSettings::default()
        })
    }

    pub async fn save_settings(&self, settings: &AdminSettings) {
        if let Err(e) = self.post("save_settings", settings).await {
            tracing::error!("🔥 save_settings falhou: {}", e);
        }
    }

    pub async fn track_visit(&self, visit: &TrackVisitPayload) {
        if let Err(e) = self.post("track_visit", visit).await {
            tracing::error!("🔥 track_visit falhou: {}", e);
        }
    }

    pub async fn get_visits(&self) -> Vec<Visit> {
        self.get("get_visits").await.unwrap_or_else(|e| {
            tracing::error!("🔥 get_visits falhou: {}", e);
            Vec::new()
        })
    }
}

#[async_trait]
impl LeadSink for StorageClient {
    async fn save_lead(&self, lead: &Lead) -> bool {
        StorageClient::save_lead(self, lead).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_replaces_existing_query() {
        let client = StorageClient::new(Url::parse("https://salon.example/api.php?action=old").unwrap());
        assert_eq!(
            client.action_url("get_leads").as_str(),
            "https://salon.example/api.php?action=get_leads"
        );
    }

    #[tokio::test]
    async fn unreachable_endpoint_degrades_to_defaults() {
        // Porta 9 (discard) em loopback: conexão recusada
        let client = StorageClient::new(Url::parse("http://127.0.0.1:9/api.php").unwrap());
        assert!(client.get_leads().await.is_empty());
        assert!(client.get_visits().await.is_empty());
        assert_eq!(client.get_settings().await, AdminSettings::default());
        assert!(!client.save_lead(&sample_lead()).await);
        client.update_lead(&sample_lead()).await;
    }

    fn sample_lead() -> Lead {
        Lead {
            id: "x".into(),
            name: "Rina".into(),
            phone: "01712345678".into(),
            offer_id: 1,
            branch_name: "Dhanmondi".into(),
            appointment_date: "2026-10-20".into(),
            appointment_time: "10:00".into(),
            submitted_at: chrono::Utc::now(),
            status: crate::models::lead::LeadStatus::New,
            follow_up_date: None,
            follow_up_status: None,
            next_follow_up: None,
            notes: None,
        }
    }
}
