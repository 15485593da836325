// tests/draft_capture.rs

use std::{sync::Arc, time::Duration};

use salon_leads::{
    db::{MemoryStore, RecordStore},
    models::lead::LeadStatus,
    services::drafts::{BookingForm, DraftCapture, StoreSink},
};

fn form(name: &str, phone: &str) -> BookingForm {
    BookingForm {
        name: name.into(),
        phone: phone.into(),
        branch: "Mohammadpur".into(),
        offer_id: 4,
        date: "2026-10-22".into(),
        time: "17:00".into(),
    }
}

#[tokio::test(start_paused = true)]
async fn stalled_form_becomes_a_draft_and_graduates_on_submit() {
    let store = Arc::new(MemoryStore::new());
    let sink = Arc::new(StoreSink(store.clone()));
    let mut capture = DraftCapture::new(sink);

    capture.on_change(&form("", "01712345678"));
    tokio::time::sleep(Duration::from_millis(1600)).await;

    let leads = store.list_leads().await.unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].status, LeadStatus::Abandoned);
    assert_eq!(leads[0].name, "Anonymous User");

    // Visitante volta e conclui a reserva na mesma sessão
    capture.submit(&form("Sadia", "01712345678")).await.unwrap();

    let leads = store.list_leads().await.unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].id, capture.session_id());
    assert_eq!(leads[0].status, LeadStatus::New);
    assert_eq!(leads[0].name, "Sadia");
}

#[tokio::test(start_paused = true)]
async fn quick_submission_never_writes_a_draft() {
    let store = Arc::new(MemoryStore::new());
    let mut capture = DraftCapture::new(Arc::new(StoreSink(store.clone())));

    capture.on_change(&form("Sadia", "01712345678"));
    tokio::time::sleep(Duration::from_millis(700)).await;
    capture.submit(&form("Sadia", "01712345678")).await.unwrap();
    tokio::time::sleep(Duration::from_secs(5)).await;

    let leads = store.list_leads().await.unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].status, LeadStatus::New);
}

#[tokio::test(start_paused = true)]
async fn incomplete_form_cannot_be_submitted() {
    let store = Arc::new(MemoryStore::new());
    let mut capture = DraftCapture::new(Arc::new(StoreSink(store.clone())));

    assert!(capture.submit(&form("", "01712345678")).await.is_err());
    assert!(!capture.is_submitted());
    assert!(store.list_leads().await.unwrap().is_empty());
}
