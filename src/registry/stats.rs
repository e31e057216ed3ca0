//! Runtime counters shared across request threads.

use std::sync::atomic::{AtomicUsize, Ordering};

/// A lock-free counter scoped to exactly one contended value.
///
/// Increment, decrement and read are each constant-time and linearizable with
/// respect to one another. Decrementing below zero is a caller contract
/// violation and is not defended.
#[derive(Debug, Default)]
pub struct Counter(AtomicUsize);

impl Counter {
    pub const fn new() -> Self {
        Self(AtomicUsize::new(0))
    }

    pub fn increment(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn decrement(&self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }
}

/// Per-endpoint runtime counter block, zeroed at construction.
///
/// Owned by an endpoint but hammered concurrently by every request thread
/// that admits or releases a connection on it.
#[derive(Debug, Default)]
pub struct Stats {
    /// Connections currently open against the backend.
    pub number_connections: Counter,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }
}
