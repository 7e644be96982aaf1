pub mod error;
pub mod fetch;
pub mod http;
pub mod location;

pub use error::{ClientError, LocationError};
pub use fetch::PumpFetcher;
pub use http::{HttpClient, ReqwestHttpClient};
pub use location::{FixedLocation, IpLocation, LocationProvider};
pub use reqwest::Url;
