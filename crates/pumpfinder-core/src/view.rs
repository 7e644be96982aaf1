use thiserror::Error;

use crate::pumps::PumpResult;

/// The only failures a session ever shows to the user. Both are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Position could not be obtained (refused or unavailable).
    #[error("Location permission denied")]
    LocationDenied,
    /// The service call failed or its body did not decode.
    #[error("Failed to fetch")]
    FetchFailed,
}

/// What the renderer is looking at.
///
/// A session starts in `Loading` and moves exactly once, to either `Error`
/// or `Ready`. Neither of those ever goes back to `Loading`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Loading,
    Error(SessionError),
    Ready(PumpResult),
}

impl ViewState {
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, ViewState::Loading)
    }

    /// Resolve a pending state with the session outcome.
    ///
    /// Once terminal, the state is kept as is and `outcome` is dropped.
    #[must_use]
    pub fn resolve(self, outcome: Result<PumpResult, SessionError>) -> Self {
        match self {
            ViewState::Loading => match outcome {
                Ok(result) => ViewState::Ready(result),
                Err(e) => ViewState::Error(e),
            },
            terminal => terminal,
        }
    }
}
