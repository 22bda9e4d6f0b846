//! renewal-service: company renewal lifecycle calculations behind a JSON API.
pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
