use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::model::CityRecord;

use super::{DirectoryApi, FetchError, truncate_body};

pub const DEFAULT_DIRECTORY_URL: &str = "https://public.opendatasoft.com/api/explore/v2.1/catalog/datasets/geonames-all-cities-with-a-population-1000/records";

/// HTTP client for the city-directory endpoint.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    base_url: String,
    http: Client,
}

impl DirectoryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), http: Client::new() }
    }
}

#[derive(Debug, Deserialize)]
struct DirectoryPage {
    results: Vec<CityRecord>,
}

fn parse_page(body: &str) -> Result<Vec<CityRecord>, FetchError> {
    let page: DirectoryPage = serde_json::from_str(body)
        .map_err(|err| FetchError::Decode { endpoint: "directory", reason: err.to_string() })?;

    Ok(page.results)
}

#[async_trait]
impl DirectoryApi for DirectoryClient {
    async fn fetch_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<CityRecord>, FetchError> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[("limit", limit.to_string()), ("start", offset.to_string())])
            .send()
            .await
            .map_err(|source| FetchError::Transport { endpoint: "directory", source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| FetchError::Transport { endpoint: "directory", source })?;

        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint: "directory",
                status,
                body: truncate_body(&body),
            });
        }

        parse_page(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_page_reads_results_envelope() {
        let body = r#"{
            "total_count": 140922,
            "results": [
                {
                    "recordid": "r1",
                    "name": "Berlin",
                    "cou_name_en": "Germany",
                    "timezone": "Europe/Berlin",
                    "population": 3426354
                },
                {
                    "recordid": "r2",
                    "name": "Bern",
                    "cou_name_en": "Switzerland",
                    "timezone": "Europe/Zurich"
                }
            ]
        }"#;

        let records = parse_page(body).expect("page should decode");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].recordid, "r1");
        assert_eq!(records[0].name, "Berlin");
        assert_eq!(records[1].cou_name_en, "Switzerland");
        assert_eq!(records[1].timezone, "Europe/Zurich");
    }

    #[test]
    fn parse_page_accepts_empty_results() {
        let records = parse_page(r#"{ "results": [] }"#).expect("empty page should decode");
        assert!(records.is_empty());
    }

    #[test]
    fn parse_page_rejects_malformed_body() {
        let err = parse_page("not json").unwrap_err();
        assert!(matches!(err, FetchError::Decode { endpoint: "directory", .. }));
    }
}
