pub mod analytics;
pub mod auth;
pub mod dashboard_service;
pub mod drafts;
pub mod import;
pub mod lead_service;
pub mod ledger;
pub mod messaging;
pub mod price;
pub mod retention;
pub mod selection;
pub mod settings_service;
