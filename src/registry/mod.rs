//! Backend endpoint registry primitives.
//!
//! # Data Flow
//! ```text
//! Discovery feed produces endpoint records:
//!     → endpoint.rs (immutable identity + runtime stats)
//!     → tag.rs (ordering token deciding which record wins)
//!     → pool.rs (per-route candidate set)
//!         → elem.rs (table slot: overload / failure / staleness)
//!
//! Request hot path consumes:
//!     pool.eligible() → filter overloaded slots
//!     → increment/decrement connection counter around the request
//! ```
//!
//! # Design Decisions
//! - Endpoint identity is write-once; a newer description is a new value
//! - Only the stats counter block is mutated concurrently (atomics)
//! - The pool is `&mut`-only; the owning registry serializes writers
//! - Conflict resolution delegates to the tag's succession rule

pub mod elem;
pub mod endpoint;
pub mod pool;
pub mod stats;
pub mod tag;

pub use elem::EndpointElem;
pub use endpoint::{Endpoint, EndpointOpts};
pub use pool::{EndpointPool, PutOutcome};
pub use stats::{Counter, Stats};
pub use tag::{ModificationTag, Succession};
