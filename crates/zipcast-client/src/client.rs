//! HTTP client for the prediction backend.

use std::future::Future;
use std::sync::Arc;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use crate::error::{ClientError, ClientResult};
use crate::types::{
    CountriesResponse, ErrorBody, PredictResponse, TemperatureSummary, TownsResponse,
    ZipResolution,
};

const USER_AGENT: &str = concat!("zipcast/", env!("CARGO_PKG_VERSION"));

/// Operations the workflow needs from the backend.
///
/// `BackendClient` is the HTTP implementation; tests drive the workflow with
/// in-memory fakes.
pub trait ForecastBackend: Send + Sync {
    /// Raw country names, as stored by the backend.
    fn countries(&self) -> impl Future<Output = ClientResult<Vec<String>>> + Send;

    /// Raw town names, as stored by the backend.
    fn towns(&self) -> impl Future<Output = ClientResult<Vec<String>>> + Send;

    /// Resolve a ZIP token to a country/town pair.
    fn resolve_zip(&self, zip: &str) -> impl Future<Output = ClientResult<ZipResolution>> + Send;

    /// Temperature summary for a country/town pair.
    fn predict(
        &self,
        country: &str,
        town: &str,
    ) -> impl Future<Output = ClientResult<TemperatureSummary>> + Send;
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Arc<Client>,
    base_url: String,
}

impl BackendClient {
    /// Create a client for the backend at `base_url`.
    ///
    /// # Errors
    /// Returns `ClientError::InvalidBaseUrl` if the URL does not parse, and
    /// `ClientError::Network` if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let mut parsed = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        // Endpoint paths are appended to the base, so it must end at the path.
        parsed.set_query(None);
        parsed.set_fragment(None);

        // No request timeout: a hung backend keeps the form loading.
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        let mut base_url = parsed.to_string();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        tracing::debug!("Backend client targeting {}", base_url);

        Ok(Self {
            client: Arc::new(client),
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path_and_query: &str) -> String {
        format!("{}/{}", self.base_url, path_and_query)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ClientResult<T> {
        let response = self.client.get(url).send().await?;
        self.handle_response(response).await
    }

    /// Decode a success body, or turn a non-OK response into
    /// `ClientError::Status` with whatever `error` text the backend sent.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error);
            tracing::debug!("Backend returned {}: {}", status, body);
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

impl ForecastBackend for BackendClient {
    #[instrument(skip(self), level = "info")]
    async fn countries(&self) -> ClientResult<Vec<String>> {
        let resp: CountriesResponse = self.get_json(&self.endpoint("countries")).await?;
        tracing::debug!("Fetched {} countries", resp.countries.len());
        Ok(resp.countries)
    }

    #[instrument(skip(self), level = "info")]
    async fn towns(&self) -> ClientResult<Vec<String>> {
        let resp: TownsResponse = self.get_json(&self.endpoint("towns")).await?;
        tracing::debug!("Fetched {} towns", resp.towns.len());
        Ok(resp.towns)
    }

    #[instrument(skip(self), level = "info")]
    async fn resolve_zip(&self, zip: &str) -> ClientResult<ZipResolution> {
        let url = self.endpoint(&format!("resolve_zip?zip={}", urlencoding::encode(zip)));
        self.get_json(&url).await
    }

    #[instrument(skip(self), level = "info")]
    async fn predict(&self, country: &str, town: &str) -> ClientResult<TemperatureSummary> {
        let url = self.endpoint(&format!(
            "predict?country={}&town={}",
            urlencoding::encode(country),
            urlencoding::encode(town),
        ));
        let resp: PredictResponse = self.get_json(&url).await?;
        if let Some(points) = resp.summary.data_points {
            tracing::debug!("Prediction based on {} data points", points);
        }
        Ok(resp.summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        assert!(BackendClient::new("http://localhost:5000").is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        let err = BackendClient::new("not a url").unwrap_err();
        assert!(matches!(err, ClientError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = BackendClient::new("http://localhost:5000/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(client.endpoint("towns"), "http://localhost:5000/api/towns");
    }

    #[test]
    fn test_query_and_fragment_discarded() {
        let client = BackendClient::new("http://localhost:5000/api/?v=1#top").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(client.endpoint("countries"), "http://localhost:5000/api/countries");
    }

    #[test]
    fn test_root_url_has_no_double_slash() {
        let client = BackendClient::new("http://localhost:5000").unwrap();
        assert_eq!(client.endpoint("countries"), "http://localhost:5000/countries");
    }
}
