//! One app session: acquire the position, query the service, produce the
//! final view state.

use pumpfinder_client::{HttpClient, LocationProvider, PumpFetcher};
use pumpfinder_core::{PumpResult, SessionError, Variant, ViewState};

pub(crate) struct Session<L, H> {
    locator: L,
    fetcher: PumpFetcher<H>,
    variant: Variant,
}

impl<L: LocationProvider, H: HttpClient> Session<L, H> {
    pub(crate) const fn new(locator: L, fetcher: PumpFetcher<H>, variant: Variant) -> Self {
        Self {
            locator,
            fetcher,
            variant,
        }
    }

    /// Runs the session to its terminal state.
    ///
    /// Takes `self` by value, so a session can only ever be run once: one
    /// position lookup, and at most one service request.
    pub(crate) async fn run(self) -> ViewState {
        let outcome = self.resolve().await;
        ViewState::Loading.resolve(outcome)
    }

    async fn resolve(&self) -> Result<PumpResult, SessionError> {
        let coord = self.locator.current_position().await.map_err(|e| {
            tracing::warn!(error = %e, "could not acquire position");
            SessionError::LocationDenied
        })?;
        tracing::info!(lat = coord.lat, lon = coord.lon, "acquired position");

        let result = self.fetcher.fetch(self.variant, coord).await.map_err(|e| {
            tracing::warn!(variant = %self.variant, error = %e, "pump service request failed");
            SessionError::FetchFailed
        })?;
        Ok(result)
    }
}
