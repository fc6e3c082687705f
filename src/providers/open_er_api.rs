use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::rates::{RateSource, RateTable};

pub const DEFAULT_BASE_URL: &str = "https://open.er-api.com";

/// Rate source for the open.er-api.com `v6/latest` endpoint.
pub struct OpenErApiProvider {
    base_url: String,
}

impl OpenErApiProvider {
    pub fn new(base_url: &str) -> Self {
        OpenErApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for OpenErApiProvider {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    result: String,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    time_last_update_unix: Option<i64>,
    rates: Option<HashMap<String, f64>>,
}

#[async_trait]
impl RateSource for OpenErApiProvider {
    #[instrument(
        name = "OpenErApiFetch",
        skip(self),
        fields(base = %base)
    )]
    async fn fetch_rates(&self, base: &str) -> Result<RateTable> {
        let url = format!("{}/v6/latest/{}", self.base_url, base);
        debug!("Requesting exchange rates from {}", url);

        let client = reqwest::Client::builder()
            .user_agent(concat!("fxconv/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for base currency: {}", e, base))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for base currency: {}",
                response.status(),
                base
            ));
        }

        let text = response.text().await?;
        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", base, e))?;

        if data.result != "success" {
            return Err(anyhow!(
                "Rate source reported '{}' for {}{}",
                data.result,
                base,
                data.error_type
                    .map(|t| format!(" ({t})"))
                    .unwrap_or_default()
            ));
        }

        let rates = data
            .rates
            .filter(|rates| !rates.is_empty())
            .ok_or_else(|| anyhow!("No rates returned for base currency: {}", base))?;
        debug!("Received {} rates for {}", rates.len(), base);

        let table = RateTable::new(base, rates)?;
        Ok(
            match data
                .time_last_update_unix
                .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
            {
                Some(updated) => table.with_fetched_at(updated),
                None => table,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_mock_server(base: &str, response: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;
        let request_path = format!("/v6/latest/{base}");

        Mock::given(method("GET"))
            .and(path(request_path))
            .respond_with(response)
            .mount(&mock_server)
            .await;

        mock_server
    }

    #[tokio::test]
    async fn test_successful_rates_fetch() {
        let mock_response = r#"{
            "result": "success",
            "base_code": "USD",
            "time_last_update_unix": 1700000000,
            "rates": {
                "USD": 1,
                "EUR": 0.9,
                "JPY": 149.5
            }
        }"#;

        let mock_server =
            create_mock_server("USD", ResponseTemplate::new(200).set_body_string(mock_response))
                .await;

        let provider = OpenErApiProvider::new(&mock_server.uri());
        let table = provider.fetch_rates("USD").await.unwrap();
        assert_eq!(table.base(), "USD");
        assert_eq!(table.len(), 3);
        assert_eq!(table.rate("EUR"), Some(0.9));
        assert_eq!(table.rate("USD"), Some(1.0));
        assert_eq!(table.fetched_at().timestamp(), 1700000000);
    }

    #[tokio::test]
    async fn test_api_error_response() {
        let mock_server = create_mock_server("USD", ResponseTemplate::new(500)).await;

        let provider = OpenErApiProvider::new(&mock_server.uri());
        let result = provider.fetch_rates("USD").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error: 500 Internal Server Error for base currency: USD"
        );
    }

    #[tokio::test]
    async fn test_unsuccessful_result() {
        let mock_response = r#"{"result": "error", "error-type": "unsupported-code"}"#;
        let mock_server =
            create_mock_server("XYZ", ResponseTemplate::new(200).set_body_string(mock_response))
                .await;

        let provider = OpenErApiProvider::new(&mock_server.uri());
        let result = provider.fetch_rates("XYZ").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "Rate source reported 'error' for XYZ (unsupported-code)"
        );
    }

    #[tokio::test]
    async fn test_empty_rates() {
        let mock_response = r#"{"result": "success", "rates": {}}"#;
        let mock_server =
            create_mock_server("USD", ResponseTemplate::new(200).set_body_string(mock_response))
                .await;

        let provider = OpenErApiProvider::new(&mock_server.uri());
        let result = provider.fetch_rates("USD").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "No rates returned for base currency: USD"
        );
    }

    #[tokio::test]
    async fn test_missing_rates() {
        let mock_response = r#"{"result": "success"}"#;
        let mock_server =
            create_mock_server("USD", ResponseTemplate::new(200).set_body_string(mock_response))
                .await;

        let provider = OpenErApiProvider::new(&mock_server.uri());
        assert!(provider.fetch_rates("USD").await.is_err());
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let mock_response = r#"{"status": "ok", "conversion_rates": {"EUR": 0.9}}"#;
        let mock_server =
            create_mock_server("USD", ResponseTemplate::new(200).set_body_string(mock_response))
                .await;

        let provider = OpenErApiProvider::new(&mock_server.uri());
        let result = provider.fetch_rates("USD").await;
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse JSON response for USD")
        );
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let mock_response = r#"{"result": "success", "rates": {"EUR": 0.9}}"#;
        let mock_server =
            create_mock_server("USD", ResponseTemplate::new(200).set_body_string(mock_response))
                .await;

        let provider = OpenErApiProvider::new(&format!("{}/", mock_server.uri()));
        assert!(provider.fetch_rates("USD").await.is_ok());
    }
}
