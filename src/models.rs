pub mod auth;
pub mod dashboard;
pub mod lead;
pub mod offer;
pub mod settings;
pub mod visit;
