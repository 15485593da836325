pub mod store;
pub use store::RecordStore;
pub mod lead_repo;
pub use lead_repo::LeadRepository;
pub mod settings_repo;
pub use settings_repo::SettingsRepository;
pub mod visit_repo;
pub use visit_repo::VisitRepository;
pub mod pg_store;
pub use pg_store::PgStore;
pub mod memory_store;
pub use memory_store::MemoryStore;
