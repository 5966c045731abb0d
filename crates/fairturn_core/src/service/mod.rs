//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate engine calls and snapshot persistence into command APIs.
//! - Keep interface layers decoupled from storage details.

pub mod rotation_service;
