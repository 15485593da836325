// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Actions ---
        handlers::action::dispatch,

        // --- Auth ---
        handlers::auth::login,

        // --- Catalog ---
        handlers::catalog::list_offers,
        handlers::catalog::list_branches,

        // --- Dashboard ---
        handlers::dashboard::get_active_counts,
        handlers::dashboard::get_calendar,
        handlers::dashboard::get_financials,
        handlers::dashboard::get_analytics,
        handlers::dashboard::get_day_view,

        // --- Retention ---
        handlers::retention::change_status,
        handlers::retention::schedule_follow_up,
        handlers::retention::record_outcome,
        handlers::retention::attach_note,
        handlers::retention::bulk_status,
        handlers::retention::import_leads,

        // --- Export ---
        handlers::export::export_csv,
        handlers::export::copy_phones,
        handlers::export::whatsapp_link,

        // --- Settings ---
        handlers::settings::list_rules,
        handlers::settings::create_rule,
        handlers::settings::delete_rule,
    ),
    components(
        schemas(
            // --- Leads ---
            models::lead::LeadStatus,
            models::lead::FollowUpStatus,
            models::lead::Lead,
            models::visit::Visit,
            models::visit::TrackVisitPayload,

            // --- Catalog ---
            models::offer::Offer,
            models::offer::Branch,
            handlers::catalog::BranchDirectory,

            // --- Dashboard ---
            models::dashboard::ViewMode,
            models::dashboard::Timeframe,
            models::dashboard::OfferActiveCount,
            models::dashboard::CalendarDay,
            models::dashboard::CalendarMonth,
            models::dashboard::OfferFinancials,
            models::dashboard::FinancialSummary,
            models::dashboard::LabelCount,
            models::dashboard::TrafficSummary,
            models::dashboard::DayView,
            models::dashboard::PhoneList,
            services::selection::ViewState,
            services::messaging::WhatsAppLink,

            // --- Auth ---
            models::auth::LoginPayload,
            models::auth::AuthResponse,

            // --- Settings ---
            models::settings::RuleType,
            models::settings::AutomationRule,
            models::settings::AdminSettings,
            models::settings::PublicSettings,
            models::settings::NewRulePayload,

            // --- Payloads ---
            handlers::retention::StatusPayload,
            handlers::retention::FollowUpPayload,
            handlers::retention::OutcomePayload,
            handlers::retention::NotesPayload,
            handlers::retention::BulkStatusPayload,
            handlers::retention::ImportResponse,
            services::lead_service::BulkStatusResult,
            services::import::ImportPayload,
            services::drafts::BookingForm,
        )
    ),
    tags(
        (name = "Actions", description = "Endpoint de ações (landing page e painel)"),
        (name = "Auth", description = "Login da equipe"),
        (name = "Catalog", description = "Ofertas e filiais"),
        (name = "Dashboard", description = "Métricas do ledger e tráfego"),
        (name = "Retention", description = "Ciclo de vida dos leads e follow-up"),
        (name = "Export", description = "CSV, telefones e links de WhatsApp"),
        (name = "Settings", description = "Regras de automação")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
