//! MARTA real-time feed client
//!
//! Issues one GET per call against the configured feed endpoint and maps the
//! returned JSON array into typed arrivals. No retries and no caching.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::MartaConfig;
use crate::error::MartaError;
use crate::feed;
use crate::models::{BusArrival, TrainArrival};

/// Trait for MARTA real-time feed clients
#[async_trait]
pub trait MartaClient: Send + Sync {
    /// Fetch predicted arrivals for every rail station
    ///
    /// Transport errors returned from this call have their URL stripped so the
    /// API key never appears in an error message.
    async fn fetch_train_arrivals(&self, api_key: &str) -> Result<Vec<TrainArrival>, MartaError>;

    /// Fetch the latest position report of every bus in service
    async fn fetch_all_bus_arrivals(&self) -> Result<Vec<BusArrival>, MartaError>;

    /// Fetch the latest position reports for the buses of one route
    async fn fetch_bus_arrivals_by_route(&self, route: &str)
    -> Result<Vec<BusArrival>, MartaError>;
}

/// MARTA client backed by `reqwest`
#[derive(Debug)]
pub struct MartaRealtimeClient {
    client: Client,
    config: MartaConfig,
}

impl MartaRealtimeClient {
    /// Create a new MARTA client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &MartaConfig) -> Result<Self, MartaError> {
        config.validate().map_err(MartaError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| MartaError::ConfigurationError(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Build the per-route URL, percent-encoding the route as one path segment
    fn bus_route_url(&self, route: &str) -> Result<Url, MartaError> {
        let mut url = Url::parse(&self.config.bus_route_url)
            .map_err(|e| MartaError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| {
                MartaError::InvalidUrl(format!(
                    "{} cannot take path segments",
                    self.config.bus_route_url
                ))
            })?
            .pop_if_empty()
            .push(route);
        Ok(url)
    }

    /// Send the request and return the body of a successful response
    async fn fetch_body(&self, request: RequestBuilder) -> Result<String, MartaError> {
        let response = request.send().await.map_err(MartaError::ConnectionFailed)?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!(%status, "MARTA feed rate limit hit");
            return Err(MartaError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if !status.is_success() {
            warn!(%status, "MARTA feed returned an error status");
            return Err(MartaError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(MartaError::ConnectionFailed)
    }
}

#[async_trait]
impl MartaClient for MartaRealtimeClient {
    #[instrument(skip(self, api_key))]
    async fn fetch_train_arrivals(&self, api_key: &str) -> Result<Vec<TrainArrival>, MartaError> {
        let url = &self.config.train_arrivals_url;
        debug!(%url, "Fetching train arrivals");

        let request = self.client.get(url).query(&[("apikey", api_key)]);
        let body = self.fetch_body(request).await.map_err(redact_url)?;
        let arrivals = feed::parse_train_arrivals(&body)?;

        debug!(count = arrivals.len(), "Train arrivals received");
        Ok(arrivals)
    }

    #[instrument(skip(self))]
    async fn fetch_all_bus_arrivals(&self) -> Result<Vec<BusArrival>, MartaError> {
        let url = &self.config.bus_arrivals_url;
        debug!(%url, "Fetching all bus arrivals");

        let body = self.fetch_body(self.client.get(url)).await?;
        let arrivals = feed::parse_bus_arrivals(&body)?;

        debug!(count = arrivals.len(), "Bus arrivals received");
        Ok(arrivals)
    }

    #[instrument(skip(self))]
    async fn fetch_bus_arrivals_by_route(
        &self,
        route: &str,
    ) -> Result<Vec<BusArrival>, MartaError> {
        let url = self.bus_route_url(route)?;
        debug!(%url, "Fetching bus arrivals for route");

        let body = self.fetch_body(self.client.get(url)).await?;
        let arrivals = feed::parse_bus_arrivals(&body)?;

        debug!(count = arrivals.len(), "Route bus arrivals received");
        Ok(arrivals)
    }
}

/// Drop the request URL from transport errors whose URL carries the API key
fn redact_url(err: MartaError) -> MartaError {
    match err {
        MartaError::ConnectionFailed(e) => MartaError::ConnectionFailed(e.without_url()),
        other => other,
    }
}
