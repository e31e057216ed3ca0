//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::collections::HashMap;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::registry::endpoint::EndpointOpts;
use crate::registry::tag::ModificationTag;

/// Root configuration for the endpoint registry.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Connection ceiling applied to every pooled backend. `0` disables it.
    pub max_conns_per_backend: usize,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Seed endpoint records admitted at startup, before the discovery feed
    /// takes over.
    pub endpoints: Vec<EndpointConfig>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_conns_per_backend: 0,
            observability: ObservabilityConfig::default(),
            endpoints: Vec::new(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// One backend endpoint record, shaped like the discovery feed delivers them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointConfig {
    /// Opaque owner identifier.
    #[serde(default)]
    pub app_id: String,

    /// Backend host.
    pub host: String,

    /// Backend port.
    pub port: u16,

    #[serde(default)]
    pub server_cert_domain_san: String,

    #[serde(default)]
    pub private_instance_id: String,

    #[serde(default)]
    pub private_instance_index: String,

    /// Metadata tags, e.g. the component name.
    #[serde(default)]
    pub tags: HashMap<String, String>,

    /// Seconds without a refresh before the record is considered stale.
    #[serde(default = "default_stale_threshold_secs")]
    pub stale_threshold_secs: u64,

    #[serde(default)]
    pub route_service_url: String,

    /// Ordering token from the origin of truth.
    #[serde(default)]
    pub modification_tag: ModificationTag,

    #[serde(default)]
    pub isolation_segment: String,

    #[serde(default)]
    pub use_tls: bool,
}

fn default_stale_threshold_secs() -> u64 {
    120
}

impl EndpointConfig {
    /// Convert into construction options, stamping the given refresh time.
    pub fn to_opts(&self, updated_at: SystemTime) -> EndpointOpts {
        EndpointOpts {
            app_id: self.app_id.clone(),
            host: self.host.clone(),
            port: self.port,
            server_cert_domain_san: self.server_cert_domain_san.clone(),
            private_instance_id: self.private_instance_id.clone(),
            private_instance_index: self.private_instance_index.clone(),
            tags: self.tags.clone(),
            stale_threshold_in_seconds: self.stale_threshold_secs,
            route_service_url: self.route_service_url.clone(),
            modification_tag: self.modification_tag.clone(),
            isolation_segment: self.isolation_segment.clone(),
            use_tls: self.use_tls,
            updated_at,
        }
    }
}
