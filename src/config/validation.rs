//! Configuration validation.
//!
//! Serde covers syntax; this pass covers semantics. It is a pure function
//! over the parsed config and reports every violation, not just the first.

use std::fmt;
use std::net::SocketAddr;

use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic violation in a parsed configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A bind address did not parse as `host:port`.
    BindAddress { field: &'static str, value: String },

    /// A URL field did not parse.
    InvalidUrl { field: &'static str, value: String },

    /// `failure_probability` must lie in `[0.0, 1.0]`.
    FailureProbability(f64),

    /// A timeout that must be positive was zero.
    ZeroTimeout { field: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::BindAddress { field, value } => {
                write!(f, "{field}: '{value}' is not a valid bind address")
            }
            ValidationError::InvalidUrl { field, value } => {
                write!(f, "{field}: '{value}' is not a valid URL")
            }
            ValidationError::FailureProbability(p) => {
                write!(f, "failure_probability {p} is outside [0.0, 1.0]")
            }
            ValidationError::ZeroTimeout { field } => {
                write!(f, "{field} must be positive")
            }
        }
    }
}

/// Validate everything serde cannot express.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_bind(&mut errors, "server.bind_address", &config.server.bind_address);
    check_bind(&mut errors, "client.bind_address", &config.client.bind_address);
    check_bind(
        &mut errors,
        "observability.metrics_address",
        &config.observability.metrics_address,
    );

    let p = config.server.failure_probability;
    if !(0.0..=1.0).contains(&p) {
        errors.push(ValidationError::FailureProbability(p));
    }

    check_url(&mut errors, "client.server_url", &config.client.server_url);
    check_url(&mut errors, "client.blackhole_url", &config.client.blackhole_url);

    if config.client.request_timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "client.request_timeout_ms",
        });
    }
    if config.client.connect_timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "client.connect_timeout_ms",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_bind(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if Url::parse(value).is_err() {
        errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        });
    }
}
