//! Outbound HTTP capability.
//!
//! The fetcher only ever needs "GET this URL and give me the body", so that is
//! all [`HttpClient`] offers. Tests substitute their own implementation to
//! count requests without touching the network.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ClientError;

/// A boxed future returned by the capability traits in this crate.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Minimal GET-only HTTP capability.
pub trait HttpClient: Send + Sync {
    /// Issue one GET request and return the response body as text.
    ///
    /// Implementations must treat a non-2xx status as an error.
    fn get(&self, url: Url) -> BoxFuture<'_, Result<String, ClientError>>;
}

/// [`HttpClient`] backed by `reqwest`.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a client with the given request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    async fn get_text(&self, url: Url) -> Result<String, ClientError> {
        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        Ok(response.text().await?)
    }
}

impl HttpClient for ReqwestHttpClient {
    fn get(&self, url: Url) -> BoxFuture<'_, Result<String, ClientError>> {
        Box::pin(self.get_text(url))
    }
}
