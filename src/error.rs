use crate::proxy::error::ProxyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AirMapError {
    #[error(transparent)]
    Proxy(#[from] ProxyError),

    #[error("Invalid value '{value}' for environment variable {name}")]
    InvalidEnvValue { name: &'static str, value: String },
}
