//! One-shot position acquisition.
//!
//! A [`LocationProvider`] resolves the device position once per session. It
//! is never retried and never cancelled; a failure simply ends the session
//! with a "permission denied" view.

use pumpfinder_core::Coordinate;
use reqwest::Url;
use serde::Deserialize;

use crate::error::{ClientError, LocationError};
use crate::http::{BoxFuture, HttpClient};

/// Source of the current device position.
pub trait LocationProvider: Send + Sync {
    /// Resolve the current position once.
    fn current_position(&self) -> BoxFuture<'_, Result<Coordinate, LocationError>>;
}

impl<T: LocationProvider + ?Sized> LocationProvider for Box<T> {
    fn current_position(&self) -> BoxFuture<'_, Result<Coordinate, LocationError>> {
        (**self).current_position()
    }
}

/// A position supplied up front (CLI flags or env), or none at all.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(Option<Coordinate>);

impl FixedLocation {
    #[must_use]
    pub const fn new(coordinate: Coordinate) -> Self {
        Self(Some(coordinate))
    }

    /// A provider with no position, which always fails with
    /// [`LocationError::Unavailable`].
    #[must_use]
    pub const fn unset() -> Self {
        Self(None)
    }
}

impl LocationProvider for FixedLocation {
    fn current_position(&self) -> BoxFuture<'_, Result<Coordinate, LocationError>> {
        let position = self.0.ok_or(LocationError::Unavailable);
        Box::pin(async move { position })
    }
}

/// Resolves the position from an IP geolocation service.
///
/// Accepts bodies carrying `lat`/`lon` (ip-api.com style) or
/// `latitude`/`longitude` (ipapi.co style). A `"status": "fail"` body is a
/// lookup failure.
pub struct IpLocation<H> {
    http: H,
    url: Url,
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default, alias = "latitude")]
    lat: Option<f64>,
    #[serde(default, alias = "longitude")]
    lon: Option<f64>,
}

impl<H: HttpClient> IpLocation<H> {
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `url` does not parse.
    pub fn new(http: H, url: &str) -> Result<Self, ClientError> {
        let url = Url::parse(url).map_err(|e| ClientError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { http, url })
    }

    async fn lookup(&self) -> Result<Coordinate, LocationError> {
        let body = self
            .http
            .get(self.url.clone())
            .await
            .map_err(|e| LocationError::Lookup(e.to_string()))?;
        parse_lookup(&body)
    }
}

impl<H: HttpClient> LocationProvider for IpLocation<H> {
    fn current_position(&self) -> BoxFuture<'_, Result<Coordinate, LocationError>> {
        Box::pin(self.lookup())
    }
}

fn parse_lookup(body: &str) -> Result<Coordinate, LocationError> {
    let parsed: IpLookupResponse =
        serde_json::from_str(body).map_err(|e| LocationError::Lookup(e.to_string()))?;

    if parsed.status.as_deref() == Some("fail") {
        let msg = parsed.message.unwrap_or_else(|| "unknown error".to_string());
        return Err(LocationError::Lookup(msg));
    }

    match (parsed.lat, parsed.lon) {
        (Some(lat), Some(lon)) => Ok(Coordinate::new(lat, lon)),
        _ => Err(LocationError::Lookup(
            "response has no coordinates".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lookup_ip_api_style() {
        let coord = parse_lookup(r#"{"status":"success","lat":52.52,"lon":13.405}"#).unwrap();
        assert_eq!(coord, Coordinate::new(52.52, 13.405));
    }

    #[test]
    fn parse_lookup_latitude_longitude_style() {
        let coord = parse_lookup(r#"{"ip":"1.2.3.4","latitude":-33.86,"longitude":151.2}"#).unwrap();
        assert_eq!(coord, Coordinate::new(-33.86, 151.2));
    }

    #[test]
    fn parse_lookup_fail_status() {
        let err = parse_lookup(r#"{"status":"fail","message":"private range"}"#).unwrap_err();
        assert!(
            matches!(err, LocationError::Lookup(ref m) if m == "private range"),
            "got: {err:?}"
        );
    }

    #[test]
    fn parse_lookup_missing_coordinates() {
        let err = parse_lookup(r#"{"status":"success"}"#).unwrap_err();
        assert!(matches!(err, LocationError::Lookup(_)));
    }

    #[test]
    fn parse_lookup_not_json() {
        assert!(parse_lookup("<html>").is_err());
    }
}
