//! Payments lookup client (front-end → school backend).

use reqwest::Client;
use url::Url;

use super::ClientError;
use crate::objects::lookup::{ApiErrorBody, PaymentsQueryResponse};

/// Typed HTTP client for the school payments backend.
///
/// The backend exposes a single read-only lookup keyed by the student's
/// código modular (SIAGE). The client owns the base URL so callers only
/// ever pass the code.
#[derive(Debug, Clone)]
pub struct PagosClient {
    http: Client,
    base_url: Url,
}

impl PagosClient {
    /// Create a new `PagosClient` against the given backend root URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `GET /pagos?codigo={code}` – fetch the student's record and payment
    /// concepts.
    pub async fn fetch_payments(
        &self,
        code: &str,
    ) -> Result<PaymentsQueryResponse, ClientError> {
        let url = self.base_url.join("/pagos")?;

        let resp = self
            .http
            .get(url)
            .query(&[("codigo", code)])
            .send()
            .await?;

        parse_response(resp).await
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(parsed) => parsed.error,
            Err(_) => body,
        };
        return Err(ClientError::Api { status, message });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}
