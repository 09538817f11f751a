//! # Schedulr API
//!
//! Application layer - commands and dependency wiring.
//!
//! This crate contains:
//! - Commands (client → engine bridge), one per operation
//! - Application context (dependency injection)
//! - Tracing initialisation and command logging
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Owner-scoped commands trust the `owner_id` they are given

pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
pub use utils::logging::init_tracing;
