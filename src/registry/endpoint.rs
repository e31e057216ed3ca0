//! The backend endpoint entity.
//!
//! # Responsibilities
//! - Carry the immutable identity of one routable backend
//! - Own the runtime counter block mutated on the request hot path
//! - Serialize to the address-centric wire shape external clients consume
//! - Decide whether a conflicting record for the same backend supersedes this one
//!
//! # Design Decisions
//! - Identity fields are write-once; an update is a new `Endpoint` value,
//!   never an in-place edit, so records are shareable across threads as
//!   `Arc<Endpoint>` without locking
//! - Synchronization lives inside [`Stats`] alone, scoped to the one value
//!   that is actually contended

use std::collections::HashMap;
use std::time::{Duration, SystemTime};

use serde::{Serialize, Serializer};

use crate::registry::stats::Stats;
use crate::registry::tag::{ModificationTag, Succession};

/// Construction options for an [`Endpoint`], as delivered by the discovery
/// feed. No field is validated beyond its type; a malformed host is opaque
/// here and only matters to downstream connection attempts.
#[derive(Debug, Clone)]
pub struct EndpointOpts {
    pub app_id: String,
    pub host: String,
    pub port: u16,
    pub server_cert_domain_san: String,
    pub private_instance_id: String,
    pub private_instance_index: String,
    pub tags: HashMap<String, String>,
    pub stale_threshold_in_seconds: u64,
    pub route_service_url: String,
    pub modification_tag: ModificationTag,
    pub isolation_segment: String,
    pub use_tls: bool,
    pub updated_at: SystemTime,
}

impl Default for EndpointOpts {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            host: String::new(),
            port: 0,
            server_cert_domain_san: String::new(),
            private_instance_id: String::new(),
            private_instance_index: String::new(),
            tags: HashMap::new(),
            stale_threshold_in_seconds: 0,
            route_service_url: String::new(),
            modification_tag: ModificationTag::default(),
            isolation_segment: String::new(),
            use_tls: false,
            updated_at: SystemTime::now(),
        }
    }
}

/// One routable backend: identity, metadata and live stats.
///
/// Empty strings in the identity fields mean "absent" and are omitted from
/// the wire shape.
#[derive(Debug)]
pub struct Endpoint {
    pub application_id: String,
    addr: String,
    pub tags: HashMap<String, String>,
    pub server_cert_domain_san: String,
    pub private_instance_id: String,
    pub private_instance_index: String,
    pub stale_threshold: Duration,
    pub route_service_url: String,
    pub modification_tag: ModificationTag,
    pub isolation_segment: String,
    use_tls: bool,
    pub updated_at: SystemTime,
    stats: Stats,
}

impl Endpoint {
    /// Build an endpoint from feed options. The canonical `host:port` address
    /// is fixed here; the stats block starts zeroed.
    pub fn new(opts: EndpointOpts) -> Self {
        Self {
            application_id: opts.app_id,
            addr: format!("{}:{}", opts.host, opts.port),
            tags: opts.tags,
            server_cert_domain_san: opts.server_cert_domain_san,
            private_instance_id: opts.private_instance_id,
            private_instance_index: opts.private_instance_index,
            stale_threshold: Duration::from_secs(opts.stale_threshold_in_seconds),
            route_service_url: opts.route_service_url,
            modification_tag: opts.modification_tag,
            isolation_segment: opts.isolation_segment,
            use_tls: opts.use_tls,
            updated_at: opts.updated_at,
            stats: Stats::new(),
        }
    }

    /// The canonical `host:port` address, the key for equality and logging.
    pub fn canonical_addr(&self) -> &str {
        &self.addr
    }

    pub fn is_tls(&self) -> bool {
        self.use_tls
    }

    /// The `component` tag value, if the feed set one.
    pub fn component(&self) -> Option<&str> {
        self.tags.get("component").map(String::as_str)
    }

    /// The runtime counter block for this backend.
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Return true if `other` is an acceptable replacement for this record:
    /// its tag is equal (a no-op refresh) or causally succeeds ours. Anything
    /// else is a stale or out-of-order update the caller should reject.
    pub fn superseded_by(&self, other: &Endpoint) -> bool {
        self.modification_tag == other.modification_tag
            || self.modification_tag.succeeded_by(&other.modification_tag)
    }

    /// Read-only snapshot of the fields worth logging.
    pub fn to_log_data(&self) -> EndpointLogData<'_> {
        EndpointLogData {
            application_id: &self.application_id,
            addr: &self.addr,
            tags: &self.tags,
            route_service_url: &self.route_service_url,
        }
    }
}

/// Structured-logging projection of an endpoint.
#[derive(Debug, Serialize)]
pub struct EndpointLogData<'a> {
    pub application_id: &'a str,
    pub addr: &'a str,
    pub tags: &'a HashMap<String, String>,
    pub route_service_url: &'a str,
}

/// The wire shape consumed by inspection clients: address-centric, with
/// runtime stats, modification tag and application id deliberately absent.
/// Omission of the optional keys is contractual; clients distinguish
/// "absent" from "empty".
#[derive(Serialize)]
struct WireEndpoint<'a> {
    address: &'a str,
    tls: bool,
    ttl: u64,
    #[serde(skip_serializing_if = "str::is_empty")]
    route_service_url: &'a str,
    tags: &'a HashMap<String, String>,
    #[serde(skip_serializing_if = "str::is_empty")]
    isolation_segment: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    private_instance_id: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    server_cert_domain_san: &'a str,
}

impl Serialize for Endpoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireEndpoint {
            address: &self.addr,
            tls: self.is_tls(),
            ttl: self.stale_threshold.as_secs(),
            route_service_url: &self.route_service_url,
            tags: &self.tags,
            isolation_segment: &self.isolation_segment,
            private_instance_id: &self.private_instance_id,
            server_cert_domain_san: &self.server_cert_domain_san,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn opts(host: &str, port: u16) -> EndpointOpts {
        EndpointOpts {
            host: host.to_string(),
            port,
            ..EndpointOpts::default()
        }
    }

    #[test]
    fn test_canonical_addr() {
        let endpoint = Endpoint::new(opts("10.0.4.7", 8080));
        assert_eq!(endpoint.canonical_addr(), "10.0.4.7:8080");
    }

    #[test]
    fn test_tls_passthrough() {
        for use_tls in [true, false] {
            let endpoint = Endpoint::new(EndpointOpts {
                use_tls,
                ..opts("10.0.4.7", 443)
            });
            assert_eq!(endpoint.is_tls(), use_tls);
        }
    }

    #[test]
    fn test_component_tag() {
        let mut with_component = opts("10.0.4.7", 8080);
        with_component
            .tags
            .insert("component".to_string(), "router".to_string());

        assert_eq!(Endpoint::new(with_component).component(), Some("router"));
        assert_eq!(Endpoint::new(opts("10.0.4.7", 8080)).component(), None);
    }

    #[test]
    fn test_wire_shape_omits_empty_fields() {
        let endpoint = Endpoint::new(EndpointOpts {
            stale_threshold_in_seconds: 30,
            ..opts("10.0.4.7", 8080)
        });

        let value = serde_json::to_value(&endpoint).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj["address"], "10.0.4.7:8080");
        assert_eq!(obj["tls"], false);
        assert_eq!(obj["ttl"], 30);
        assert!(obj.contains_key("tags"));
        assert!(!obj.contains_key("route_service_url"));
        assert!(!obj.contains_key("isolation_segment"));
        assert!(!obj.contains_key("private_instance_id"));
        assert!(!obj.contains_key("server_cert_domain_san"));
    }

    #[test]
    fn test_wire_shape_keeps_present_fields() {
        let endpoint = Endpoint::new(EndpointOpts {
            route_service_url: "https://rs.example.com".to_string(),
            isolation_segment: "segment-1".to_string(),
            private_instance_id: "instance-guid".to_string(),
            server_cert_domain_san: "san.example.com".to_string(),
            use_tls: true,
            ..opts("10.0.4.7", 8443)
        });

        let value = serde_json::to_value(&endpoint).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj["tls"], true);
        assert_eq!(obj["route_service_url"], "https://rs.example.com");
        assert_eq!(obj["isolation_segment"], "segment-1");
        assert_eq!(obj["private_instance_id"], "instance-guid");
        assert_eq!(obj["server_cert_domain_san"], "san.example.com");
    }

    #[test]
    fn test_wire_shape_excludes_runtime_state() {
        let endpoint = Endpoint::new(EndpointOpts {
            app_id: "app-guid".to_string(),
            modification_tag: ModificationTag::new("g1", 4),
            ..opts("10.0.4.7", 8080)
        });
        endpoint.stats().number_connections.increment();

        let value = serde_json::to_value(&endpoint).unwrap();
        let obj = value.as_object().unwrap();

        assert!(!obj.contains_key("modification_tag"));
        assert!(!obj.contains_key("application_id"));
        assert!(!obj.contains_key("stats"));
    }

    #[test]
    fn test_supersedes_on_equal_tag() {
        let a = Endpoint::new(EndpointOpts {
            modification_tag: ModificationTag::new("g1", 1),
            ..opts("10.0.4.7", 8080)
        });
        let b = Endpoint::new(EndpointOpts {
            modification_tag: ModificationTag::new("g1", 1),
            ..opts("10.0.4.7", 8080)
        });

        assert!(a.superseded_by(&b));
        assert!(a.superseded_by(&a));
    }

    #[test]
    fn test_supersedes_on_succession_only_forward() {
        let older = Endpoint::new(EndpointOpts {
            modification_tag: ModificationTag::new("g1", 1),
            ..opts("10.0.4.7", 8080)
        });
        let newer = Endpoint::new(EndpointOpts {
            modification_tag: ModificationTag::new("g1", 2),
            ..opts("10.0.4.7", 8080)
        });

        assert!(older.superseded_by(&newer));
        assert!(!newer.superseded_by(&older));
    }

    proptest! {
        #[test]
        fn canonical_addr_is_host_colon_port(
            host in "[a-z0-9.-]{1,24}",
            port in any::<u16>(),
        ) {
            let endpoint = Endpoint::new(opts(&host, port));
            prop_assert_eq!(endpoint.canonical_addr(), format!("{}:{}", host, port));
        }

        #[test]
        fn ttl_round_trips_whole_seconds(secs in 0u64..1_000_000) {
            let endpoint = Endpoint::new(EndpointOpts {
                stale_threshold_in_seconds: secs,
                ..opts("10.0.4.7", 8080)
            });
            let value = serde_json::to_value(&endpoint).unwrap();
            prop_assert_eq!(value["ttl"].as_u64(), Some(secs));
        }
    }
}
