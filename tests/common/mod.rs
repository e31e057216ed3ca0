//! Shared builders for integration tests.

use route_registry::{Endpoint, EndpointOpts, ModificationTag};

pub fn endpoint(host: &str, port: u16) -> Endpoint {
    Endpoint::new(EndpointOpts {
        host: host.to_string(),
        port,
        stale_threshold_in_seconds: 120,
        ..EndpointOpts::default()
    })
}

#[allow(dead_code)]
pub fn tagged_endpoint(host: &str, port: u16, tag: ModificationTag) -> Endpoint {
    Endpoint::new(EndpointOpts {
        host: host.to_string(),
        port,
        stale_threshold_in_seconds: 120,
        modification_tag: tag,
        ..EndpointOpts::default()
    })
}
