//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate backend calls into the caller-facing store surface.
//! - Keep boundary layers decoupled from storage details.

pub mod slide_store;
