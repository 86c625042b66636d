// src/handlers/mod.rs
pub mod auth;
pub mod chat;
pub mod health;
pub mod mood;
pub mod support;
pub mod users;
