pub mod action;
pub mod auth;
pub mod catalog;
pub mod dashboard;
pub mod export;
pub mod retention;
pub mod settings;
