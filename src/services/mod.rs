// src/services/mod.rs
pub mod conversation;
pub mod gemini;
pub mod metrics_manager;
pub mod profile;
pub mod relay;
