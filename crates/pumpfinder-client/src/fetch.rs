//! Client for the pump service's two read-only endpoints.
//!
//! Each session issues exactly one request through [`PumpFetcher::fetch`];
//! there is no caching, retrying or deduplication here.

use pumpfinder_core::{Coordinate, NearestResult, PumpListResult, PumpResult, Variant};
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::http::HttpClient;

/// Queries `/nearest` or `/pumps` for a coordinate and decodes the result.
pub struct PumpFetcher<H> {
    http: H,
    base_url: Url,
}

impl<H: HttpClient> PumpFetcher<H> {
    /// Creates a fetcher for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` is not a valid URL.
    pub fn new(http: H, base_url: &str) -> Result<Self, ClientError> {
        // Exactly one trailing slash, so endpoint paths join under the base
        // path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ClientError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl {
                url: base_url.to_string(),
                reason: "URL cannot be a base".to_string(),
            });
        }
        Ok(Self {
            http,
            base_url: parsed,
        })
    }

    /// Builds the GET URL for `variant` at `coord`.
    ///
    /// `lat`/`lon` use the shortest representation that round-trips the
    /// `f64`, so no precision is lost. Values are not range-checked.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the endpoint cannot be joined
    /// onto the base URL.
    pub fn request_url(&self, variant: Variant, coord: Coordinate) -> Result<Url, ClientError> {
        let mut url = self
            .base_url
            .join(variant.endpoint())
            .map_err(|e| ClientError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("lat", &coord.lat.to_string())
            .append_pair("lon", &coord.lon.to_string());
        Ok(url)
    }

    /// Issues the single service request for this session and decodes it
    /// into the shape `variant` expects.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure, timeout or non-2xx status.
    /// - [`ClientError::Deserialize`] if the body is not JSON of the
    ///   expected shape.
    /// - [`ClientError::InvalidUrl`] if the request URL cannot be built.
    pub async fn fetch(
        &self,
        variant: Variant,
        coord: Coordinate,
    ) -> Result<PumpResult, ClientError> {
        let url = self.request_url(variant, coord)?;
        tracing::debug!(%url, %variant, "querying pump service");

        let body = self.http.get(url.clone()).await?;

        let result = match variant {
            Variant::Nearest => PumpResult::Nearest(decode::<NearestResult>(&body, &url)?),
            Variant::List => PumpResult::List(decode::<PumpListResult>(&body, &url)?),
        };

        if let PumpResult::List(ref list) = result {
            tracing::debug!(count = list.pumps.len(), "received pump list");
        }
        Ok(result)
    }
}

fn decode<T: DeserializeOwned>(body: &str, url: &Url) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|e| ClientError::Deserialize {
        context: url.to_string(),
        source: e,
    })
}
