// src/lib.rs

// Mensagens em locales/*.yml; chaves ausentes caem no português
rust_i18n::i18n!("locales", fallback = "pt");

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
