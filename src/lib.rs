//! Backend endpoint registry for a routing layer.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────┐
//!                 │                ROUTE REGISTRY                 │
//!  Discovery      │  ┌──────────┐     ┌──────────────────────┐   │
//!  feed ──────────┼─▶│  config  │────▶│      registry        │   │
//!  (records)      │  │ schema + │     │  pool ─▶ elem ─▶     │   │
//!                 │  │ loader   │     │  endpoint + tag +     │   │
//!                 │  └──────────┘     │  stats                │   │
//!                 │                   └──────────┬───────────┘   │
//!  Request        │                              │               │
//!  hot path ──────┼──── eligible() / connection counters ────────┼─▶ proxy
//!                 │                                              │
//!                 │  ┌────────────────────────────────────────┐  │
//!                 │  │        observability (tracing)          │  │
//!                 │  └────────────────────────────────────────┘  │
//!                 └──────────────────────────────────────────────┘
//! ```
//!
//! The crate owns the data structures a reverse proxy consults on every
//! request: one record per routable backend, a per-route candidate set, and
//! the conflict, overload and staleness rules that govern them. The network
//! listener, proxy pipeline, discovery feed and multi-route table are the
//! embedding system's business.

pub mod config;
pub mod observability;
pub mod registry;

pub use config::{load_config, ConfigError, RegistryConfig};
pub use registry::{
    Endpoint, EndpointElem, EndpointOpts, EndpointPool, ModificationTag, PutOutcome, Stats,
    Succession,
};
