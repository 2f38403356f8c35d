use crate::model::{CityRecord, ForecastEntry};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod directory;
pub mod forecast;

pub use directory::{DEFAULT_DIRECTORY_URL, DirectoryClient};
pub use forecast::{DEFAULT_FORECAST_URL, ForecastClient};

/// Failure of a single remote request.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to send request to the {endpoint} endpoint: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to decode {endpoint} response: {reason}")]
    Decode { endpoint: &'static str, reason: String },
}

/// The remote city directory, consumed one fixed-size page at a time.
///
/// `offset` is the number of records the consumer already holds; an empty
/// page is the authoritative "no more data" signal.
#[async_trait]
pub trait DirectoryApi: Send + Sync + Debug {
    async fn fetch_page(&self, offset: usize, limit: usize)
    -> Result<Vec<CityRecord>, FetchError>;
}

/// The remote forecast endpoint: one time-ascending series per location.
#[async_trait]
pub trait ForecastApi: Send + Sync + Debug {
    async fn fetch_series(&self, location: &str) -> Result<Vec<ForecastEntry>, FetchError>;
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("{}"), "{}");
    }

    #[test]
    fn truncate_body_cuts_long_bodies() {
        let long = "x".repeat(300);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));
    }
}
