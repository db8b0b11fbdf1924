//! Core use-case services.
//!
//! # Responsibility
//! - Validate inbound contact records before any store interaction.
//! - Translate store outcomes into the HTTP-facing result taxonomy.

pub mod contact_service;
