//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the backend capability contract the store facade consumes.
//! - Isolate storage details (in-process map, SQLite) from orchestration.
//!
//! # Invariants
//! - Adapter writes must enforce `Slide::validate()` before persistence.
//! - Both adapters produce identical record shapes for the same data.

pub mod memory;
pub mod slide_repo;
pub mod sqlite;
