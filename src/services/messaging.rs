// src/services/messaging.rs

use serde::Serialize;
use url::Url;
use utoipa::ToSchema;

use crate::{common::error::AppError, models::lead::Lead};

const WHATSAPP_BASE: &str = "https://wa.me/";

#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct WhatsAppLink {
    pub url: String,
    pub message: String,
}

/// Substitui todas as ocorrências de `{name}`.
pub fn fill_template(template: &str, name: &str) -> String {
    template.replace("{name}", name)
}

pub fn reminder_message(lead: &Lead, business_name: &str) -> String {
    format!(
        "Hi {}, this is a reminder for your appointment at {} on {} at {}. See you soon!",
        lead.name, business_name, lead.appointment_date, lead.appointment_time
    )
}

/// Link `wa.me` com o texto já codificado. Sem confirmação de entrega:
/// o link só abre a conversa.
pub fn whatsapp_link(phone: &str, message: &str) -> Result<WhatsAppLink, AppError> {
    // wa.me só aceita dígitos (sem "+", espaços ou hífens)
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(AppError::InvalidQuery(format!(
            "Phone '{phone}' has no digits for a WhatsApp link."
        )));
    }
    let mut url = Url::parse(&format!("{WHATSAPP_BASE}{digits}"))
        .map_err(|e| AppError::InvalidQuery(format!("Invalid WhatsApp link: {e}")))?;
    url.query_pairs_mut().append_pair("text", message);

    Ok(WhatsAppLink {
        url: url.to_string(),
        message: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lead::LeadStatus;
    use chrono::{TimeZone, Utc};

    #[test]
    fn template_fills_every_placeholder() {
        assert_eq!(
            fill_template("Hi {name}! {name}, we miss you.", "Tania"),
            "Hi Tania! Tania, we miss you."
        );
        assert_eq!(fill_template("No placeholder", "Tania"), "No placeholder");
    }

    #[test]
    fn reminder_link_is_encoded() {
        let lead = Lead {
            id: "1".into(),
            name: "Tania & Co".into(),
            phone: "8801712345678".into(),
            offer_id: 1,
            branch_name: "Dhanmondi".into(),
            appointment_date: "2026-10-20".into(),
            appointment_time: "15:30".into(),
            submitted_at: Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap(),
            status: LeadStatus::New,
            follow_up_date: None,
            follow_up_status: None,
            next_follow_up: None,
            notes: None,
        };
        let message = reminder_message(&lead, "Lingering Look");
        assert_eq!(
            message,
            "Hi Tania & Co, this is a reminder for your appointment at Lingering Look on 2026-10-20 at 15:30. See you soon!"
        );

        let link = whatsapp_link(&lead.phone, &message).unwrap();
        assert!(link.url.starts_with("https://wa.me/8801712345678?text=Hi+Tania+%26+Co%2C"));
        assert_eq!(link.message, message);

        let dashed = whatsapp_link("+880 1712-345678", "Hi").unwrap();
        assert_eq!(dashed.url, "https://wa.me/8801712345678?text=Hi");
        assert!(whatsapp_link("n/a", "Hi").is_err());
    }
}
