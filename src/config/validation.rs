//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (non-empty host, non-zero port)
//! - Detect duplicate endpoint addresses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function over the parsed config
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;
use url::Url;

use crate::config::schema::RegistryConfig;

/// A single semantic problem found in a config.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("endpoint {position}: host must not be empty")]
    EmptyHost { position: usize },

    #[error("endpoint {position}: port must not be zero")]
    ZeroPort { position: usize },

    #[error("duplicate endpoint address: {addr}")]
    DuplicateAddress { addr: String },

    #[error("endpoint {position}: route service url is not a valid url: {reason}")]
    InvalidRouteServiceUrl { position: usize, reason: String },
}

/// Check a parsed config for semantic problems, collecting every error.
pub fn validate_config(config: &RegistryConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (position, endpoint) in config.endpoints.iter().enumerate() {
        if endpoint.host.is_empty() {
            errors.push(ValidationError::EmptyHost { position });
        }
        if endpoint.port == 0 {
            errors.push(ValidationError::ZeroPort { position });
        }

        let addr = format!("{}:{}", endpoint.host, endpoint.port);
        if !seen.insert(addr.clone()) {
            errors.push(ValidationError::DuplicateAddress { addr });
        }

        if !endpoint.route_service_url.is_empty() {
            if let Err(err) = Url::parse(&endpoint.route_service_url) {
                errors.push(ValidationError::InvalidRouteServiceUrl {
                    position,
                    reason: err.to_string(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::EndpointConfig;

    fn endpoint(host: &str, port: u16) -> EndpointConfig {
        toml::from_str(&format!("host = \"{}\"\nport = {}", host, port)).unwrap()
    }

    #[test]
    fn test_valid_config_passes() {
        let mut config = RegistryConfig::default();
        config.endpoints.push(endpoint("10.0.0.1", 8080));
        config.endpoints.push(endpoint("10.0.0.2", 8080));

        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_all_errors_are_collected() {
        let mut config = RegistryConfig::default();
        config.endpoints.push(endpoint("", 0));
        config.endpoints.push(endpoint("10.0.0.1", 8080));
        config.endpoints.push(endpoint("10.0.0.1", 8080));

        let mut bad_url = endpoint("10.0.0.2", 8080);
        bad_url.route_service_url = "not a url".to_string();
        config.endpoints.push(bad_url);

        let errors = validate_config(&config).unwrap_err();

        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::EmptyHost { position: 0 }));
        assert!(errors.contains(&ValidationError::ZeroPort { position: 0 }));
        assert!(errors.contains(&ValidationError::DuplicateAddress {
            addr: "10.0.0.1:8080".to_string()
        }));
        assert!(matches!(
            errors.last(),
            Some(ValidationError::InvalidRouteServiceUrl { position: 3, .. })
        ));
    }
}
