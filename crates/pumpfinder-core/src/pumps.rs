//! Pump station records as returned by the pump service.
//!
//! The service exposes two read-only contracts: `/nearest` answers with a
//! single [`NearestResult`], `/pumps` answers with a [`PumpListResult`]. Which
//! one a client talks to is fixed by its [`Variant`].

use serde::Deserialize;

/// A device position in decimal degrees. Reported accuracy is not tracked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// One pump station.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PumpInfo {
    /// Server-assigned identifier, unique per station.
    pub id: i64,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Distance in meters from the query point. Only present when the server
    /// was given a query point to measure from.
    #[serde(default)]
    pub distance: Option<f64>,
}

/// Body of `GET /nearest`: the closest station and its distance in meters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NearestResult {
    pub pump: PumpInfo,
    pub distance: f64,
}

/// Body of `GET /pumps`.
///
/// Ordering is whatever the server sent (ascending by distance when a query
/// point was supplied). It is never re-sorted here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PumpListResult {
    pub pumps: Vec<PumpInfo>,
}

/// Which service contract a client build is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Single closest station (`/nearest`).
    #[default]
    Nearest,
    /// Distance-sorted station list (`/pumps`).
    List,
}

impl Variant {
    /// Path segment of the endpoint this variant queries, relative to the
    /// service base URL.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Variant::Nearest => "nearest",
            Variant::List => "pumps",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Nearest => write!(f, "nearest"),
            Variant::List => write!(f, "list"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown variant '{0}' (expected 'nearest' or 'list')")]
pub struct UnknownVariant(pub String);

impl std::str::FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(Variant::Nearest),
            "list" => Ok(Variant::List),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// A fully decoded service response, shaped by the [`Variant`] that asked
/// for it.
#[derive(Debug, Clone, PartialEq)]
pub enum PumpResult {
    Nearest(NearestResult),
    List(PumpListResult),
}
