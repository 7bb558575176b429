//! reqwest-backed implementation of the records backend contract.
//!
//! Thin by design: every method is one request, one status check, one
//! decode. Malformed bodies surface as [`ApiError::InvalidResponse`]
//! at this boundary instead of leaking half-decoded data into the
//! session.

use async_trait::async_trait;
use credscope_core::{ApiError, ApiResult, RecordsApi};
use credscope_models::{Page, Severity};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde_json::json;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HttpRecordsApi {
    client: Client,
    base_url: String,
}

impl HttpRecordsApi {
    /// Build a client against `base_url` (scheme + host, no trailing
    /// slash required).
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

/// Reject non-success statuses, carrying whatever body text the server
/// sent as the message.
async fn ensure_success(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    tracing::warn!(status = status.as_u16(), %message, "backend returned an error");
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Decode a JSON body, reporting shape mismatches as invalid responses.
async fn decode_json<T: serde::de::DeserializeOwned>(response: Response) -> ApiResult<T> {
    let body = response.text().await.map_err(transport)?;
    serde_json::from_str(&body).map_err(|err| ApiError::InvalidResponse(err.to_string()))
}

#[async_trait]
impl RecordsApi for HttpRecordsApi {
    async fn fetch_page(&self, page: u32, size: u32, filter: &str) -> ApiResult<Page> {
        let response = self
            .client
            .get(self.url("/records"))
            .query(&[("page", page.to_string()), ("size", size.to_string())])
            .query(&[("filter", filter)])
            .send()
            .await
            .map_err(transport)?;
        decode_json(ensure_success(response).await?).await
    }

    async fn set_validity(&self, id: i64, valid: bool) -> ApiResult<()> {
        let response = self
            .client
            .patch(self.url("/records"))
            .json(&json!({ "id": id, "valid": valid }))
            .send()
            .await
            .map_err(transport)?;
        ensure_success(response).await.map(|_| ())
    }

    async fn set_risk(&self, id: i64, severity: Severity) -> ApiResult<()> {
        let response = self
            .client
            .patch(self.url("/records/risk"))
            .json(&json!({ "id": id, "risk": severity.label() }))
            .send()
            .await
            .map_err(transport)?;
        ensure_success(response).await.map(|_| ())
    }

    async fn delete_record(&self, id: i64) -> ApiResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/records/{id}")))
            .send()
            .await
            .map_err(transport)?;
        ensure_success(response).await.map(|_| ())
    }

    async fn upload(&self, file_name: &str, bytes: Vec<u8>, filter: &str) -> ApiResult<String> {
        let file = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new()
            .part("file", file)
            .text("filter", filter.to_string());
        let response = self
            .client
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        let response = ensure_success(response).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(String::new());
        }
        response.text().await.map_err(transport)
    }
}
