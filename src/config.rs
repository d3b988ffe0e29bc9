//! Runtime configuration: which proxy to ask, which city to show, and how to pick the
//! latest reading.

use crate::error::AirMapError;
use crate::types::reading::LatestPolicy;
use bon::Builder;
use std::env;
use std::time::Duration;

/// Proxy endpoint serving the Essen data platform.
pub const DEFAULT_PROXY_URL: &str =
    "https://datenplattform-essen.netlify.app/.netlify/functions/ubaProxy";
pub const DEFAULT_CITY: &str = "Essen";

pub const ENV_PROXY_URL: &str = "AIRMAP_PROXY_URL";
pub const ENV_CITY: &str = "AIRMAP_CITY";
pub const ENV_LATEST_POLICY: &str = "AIRMAP_LATEST_POLICY";
pub const ENV_TIMEOUT_SECS: &str = "AIRMAP_TIMEOUT_SECS";

/// Configuration of an [`AirQualityController`](crate::AirQualityController).
///
/// # Examples
///
/// ```
/// use airmap::{AirMapConfig, LatestPolicy};
/// use std::time::Duration;
///
/// let config = AirMapConfig::builder()
///     .city("Essen")
///     .latest_policy(LatestPolicy::Chronological)
///     .request_timeout(Duration::from_secs(10))
///     .build();
/// assert_eq!(config.city, "Essen");
/// assert!(config.base_url.ends_with("ubaProxy"));
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct AirMapConfig {
    #[builder(into, default = DEFAULT_PROXY_URL.to_string())]
    pub base_url: String,
    /// Only stations whose city field equals this are shown.
    #[builder(into, default = DEFAULT_CITY.to_string())]
    pub city: String,
    #[builder(default)]
    pub latest_policy: LatestPolicy,
    /// Per-request timeout. Requests wait indefinitely when unset.
    pub request_timeout: Option<Duration>,
}

impl Default for AirMapConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl AirMapConfig {
    /// Reads the configuration from `AIRMAP_*` environment variables, falling back to the
    /// defaults for unset ones.
    pub fn from_env() -> Result<Self, AirMapError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Self, AirMapError> {
        let latest_policy = match lookup(ENV_LATEST_POLICY) {
            Some(value) => Some(value.parse::<LatestPolicy>().map_err(|_| {
                AirMapError::InvalidEnvValue {
                    name: ENV_LATEST_POLICY,
                    value,
                }
            })?),
            None => None,
        };

        let request_timeout = match lookup(ENV_TIMEOUT_SECS) {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(_) => {
                    return Err(AirMapError::InvalidEnvValue {
                        name: ENV_TIMEOUT_SECS,
                        value,
                    })
                }
            },
            None => None,
        };

        Ok(Self::builder()
            .maybe_base_url(lookup(ENV_PROXY_URL))
            .maybe_city(lookup(ENV_CITY))
            .maybe_latest_policy(latest_policy)
            .maybe_request_timeout(request_timeout)
            .build())
    }
}
