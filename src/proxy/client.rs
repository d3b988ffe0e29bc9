//! HTTP access to the air-quality proxy.

use crate::proxy::error::ProxyError;
use crate::proxy::query::ProxyQuery;
use log::{debug, warn};
use reqwest::Client;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

/// Anything that can answer proxy queries with a JSON document.
///
/// [`ProxyClient`] talks HTTP; other implementations can serve canned responses.
pub trait ProxySource {
    fn fetch(&self, query: &ProxyQuery) -> impl Future<Output = Result<Value, ProxyError>> + Send;
}

/// Client for the proxy endpoint. The operation is selected per request via query parameters.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    base_url: String,
    client: Client,
}

impl ProxyClient {
    /// Creates a client for `base_url`. Without a `timeout`, requests wait indefinitely.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ProxyError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ProxyError::ClientBuild)?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl ProxySource for ProxyClient {
    async fn fetch(&self, query: &ProxyQuery) -> Result<Value, ProxyError> {
        let request = self
            .client
            .get(&self.base_url)
            .query(&query.params())
            .build()
            .map_err(|e| ProxyError::NetworkRequest(self.base_url.clone(), e))?;
        let url = request.url().to_string();
        debug!("Requesting {}", url);

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| ProxyError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    ProxyError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    ProxyError::NetworkRequest(url, e)
                });
            }
        };

        response
            .json::<Value>()
            .await
            .map_err(|e| ProxyError::JsonParse(url, e))
    }
}
