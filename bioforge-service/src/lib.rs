//! BioForge relay: turns a desired biological effect into a templated LLM
//! prompt and a web-search query, forwarding each to a hosted provider.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
