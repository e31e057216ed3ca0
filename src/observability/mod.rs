//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via `tracing`; registry mutations emit events
//!   carrying the endpoint log projection
//! - Log level comes from config, the environment overrides it
//! - No metrics endpoint here; the embedding proxy owns that surface

pub mod logging;
