//! Per-route candidate set of backend endpoints.
//!
//! # Responsibilities
//! - Admit, refresh and evict endpoint slots keyed by canonical address
//! - Resolve conflicting records for one backend via tag succession
//! - Expose the overload filter consulted before routing
//!
//! # Design Decisions
//! - All mutation goes through `&mut self`; the owning registry serializes
//!   writers (one lock per route), readers share snapshots via `Arc<Endpoint>`
//! - Slots live in a vector with an address index for O(1) lookup and
//!   swap-removal; removal fixes up the moved slot's position
//! - A record carrying a stale tag never replaces a newer one, but it still
//!   refreshes the slot's staleness clock: the backend is being advertised

use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;

use crate::registry::elem::EndpointElem;
use crate::registry::endpoint::Endpoint;

/// Result of offering a record to the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// The backend was not present; a new slot was created.
    Added,
    /// The incumbent record was superseded and replaced.
    Updated,
    /// The record was stale or out of order; the incumbent stands.
    Unmodified,
}

#[derive(Debug, Default)]
pub struct EndpointPool {
    elems: Vec<EndpointElem>,
    by_addr: HashMap<String, usize>,
    max_conns_per_backend: usize,
}

impl EndpointPool {
    /// Create an empty pool. Every slot inherits the given connection
    /// ceiling; `0` means no ceiling.
    pub fn new(max_conns_per_backend: usize) -> Self {
        Self {
            elems: Vec::new(),
            by_addr: HashMap::new(),
            max_conns_per_backend,
        }
    }

    /// Offer a record to the pool. An unknown address is admitted; a known
    /// address is refreshed only when the incumbent is superseded.
    pub fn put(&mut self, endpoint: Endpoint) -> PutOutcome {
        let endpoint = Arc::new(endpoint);
        let now = SystemTime::now();

        if let Some(&slot) = self.by_addr.get(endpoint.canonical_addr()) {
            let elem = &mut self.elems[slot];
            let outcome = if elem.endpoint().superseded_by(&endpoint) {
                tracing::debug!(endpoint = ?endpoint.to_log_data(), "endpoint-refreshed");
                elem.replace(endpoint);
                PutOutcome::Updated
            } else {
                tracing::debug!(
                    endpoint = ?endpoint.to_log_data(),
                    "endpoint-update-out-of-order"
                );
                PutOutcome::Unmodified
            };
            elem.mark_updated(now);
            outcome
        } else {
            let slot = self.elems.len();
            self.by_addr
                .insert(endpoint.canonical_addr().to_string(), slot);
            tracing::info!(endpoint = ?endpoint.to_log_data(), "endpoint-registered");
            self.elems
                .push(EndpointElem::new(endpoint, slot, self.max_conns_per_backend));
            PutOutcome::Added
        }
    }

    /// Honor an explicit removal signal. The signal must carry a tag equal to
    /// or succeeding the incumbent's; an out-of-order removal is ignored.
    pub fn remove(&mut self, endpoint: &Endpoint) -> bool {
        if let Some(&slot) = self.by_addr.get(endpoint.canonical_addr()) {
            if self.elems[slot].endpoint().superseded_by(endpoint) {
                let elem = self.remove_slot(slot);
                tracing::info!(endpoint = ?elem.endpoint().to_log_data(), "endpoint-unregistered");
                return true;
            }
        }
        false
    }

    /// Evict every slot that has gone unrefreshed past its endpoint's stale
    /// threshold, returning the evicted endpoints.
    pub fn prune_stale(&mut self, now: SystemTime) -> Vec<Arc<Endpoint>> {
        let mut pruned = Vec::new();
        let mut slot = 0;
        while slot < self.elems.len() {
            if self.elems[slot].is_stale(now) {
                let elem = self.remove_slot(slot);
                tracing::info!(endpoint = ?elem.endpoint().to_log_data(), "pruned-stale-endpoint");
                pruned.push(Arc::clone(elem.endpoint()));
            } else {
                slot += 1;
            }
        }
        pruned
    }

    /// Record a failure against the backend at `addr`, if it is still pooled.
    pub fn endpoint_failed(&mut self, addr: &str) {
        if let Some(&slot) = self.by_addr.get(addr) {
            self.elems[slot].failed();
            tracing::warn!(addr = %addr, "endpoint-marked-failed");
        }
    }

    /// Endpoints currently eligible for new connections: every slot whose
    /// backend has not reached its ceiling.
    pub fn eligible(&self) -> impl Iterator<Item = Arc<Endpoint>> + '_ {
        self.elems
            .iter()
            .filter(|elem| !elem.is_overloaded())
            .map(|elem| Arc::clone(elem.endpoint()))
    }

    pub fn get(&self, addr: &str) -> Option<&EndpointElem> {
        self.by_addr.get(addr).map(|&slot| &self.elems[slot])
    }

    pub fn iter(&self) -> impl Iterator<Item = &EndpointElem> {
        self.elems.iter()
    }

    pub fn len(&self) -> usize {
        self.elems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    fn remove_slot(&mut self, slot: usize) -> EndpointElem {
        let elem = self.elems.swap_remove(slot);
        self.by_addr.remove(elem.endpoint().canonical_addr());

        // The former last slot now lives at `slot`.
        if let Some(moved) = self.elems.get_mut(slot) {
            moved.set_index(slot);
            let addr = moved.endpoint().canonical_addr().to_string();
            self.by_addr.insert(addr, slot);
        }
        elem
    }
}
