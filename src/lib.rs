pub mod accounts;
pub mod activity;
pub mod config;
pub mod listings;
pub mod models;
pub mod store;
