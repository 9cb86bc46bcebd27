use async_trait::async_trait;
use points_core::iata::MIN_REMOTE_PREFIX;
use points_core::repository::{AirportDirectory, FlightSearchClient};
use points_core::search::FlightSearchRequest;
use points_core::{CoreError, CoreResult};
use points_shared::Airport;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

use crate::app_config::ApiConfig;

/// HTTP client for the flight search service. All paths hang off one base URL.
#[derive(Clone)]
pub struct PointsApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PointsApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> CoreResult<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| CoreError::ValidationError(format!("Invalid API base URL {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(CoreError::ValidationError(format!("API base URL cannot be a base: {}", base_url)));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::InternalError(e.to_string()))?;
        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &ApiConfig) -> CoreResult<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_seconds))
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn read_json<T: DeserializeOwned>(what: &str, resp: reqwest::Response) -> CoreResult<T> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!("{} request failed: {} - {}", what, status, body);
            return Err(CoreError::UpstreamError { status: status.as_u16(), body });
        }
        resp.json::<T>().await.map_err(|e| {
            error!("{} response could not be decoded: {}", what, e);
            CoreError::MalformedRecord(format!("{} response: {}", what, e))
        })
    }
}

fn transport(what: &str, err: reqwest::Error) -> CoreError {
    error!("{} request failed: {}", what, err);
    CoreError::TransportError(err.to_string())
}

#[async_trait]
impl FlightSearchClient for PointsApiClient {
    async fn search_flights(
        &self,
        request: &FlightSearchRequest,
    ) -> CoreResult<Vec<serde_json::Value>> {
        let url = self.endpoint(&["flight", "search"]);
        debug!("POST {} {}->{}", url, request.origin_code, request.destination_code);
        let resp = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| transport("search", e))?;
        Self::read_json("search", resp).await
    }
}

#[async_trait]
impl AirportDirectory for PointsApiClient {
    async fn default_origin(&self) -> CoreResult<Airport> {
        let url = self.endpoint(&["flight", "default_origin"]);
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| transport("default_origin", e))?;
        Self::read_json("default_origin", resp).await
    }

    async fn predictive_cities(&self, prefix: &str) -> CoreResult<Vec<Airport>> {
        let prefix = prefix.trim();
        if prefix.chars().count() < MIN_REMOTE_PREFIX {
            return Ok(Vec::new());
        }
        let url = self.endpoint(&["flight", "predictive_cities", prefix]);
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| transport("predictive_cities", e))?;
        Self::read_json("predictive_cities", resp).await
    }
}
