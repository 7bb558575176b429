//! Boundary contract for the records backend.
//!
//! The session only ever talks to the backend through [`RecordsApi`],
//! so the HTTP transport lives in `credscope-client` and tests run
//! against in-memory fakes.

use async_trait::async_trait;
use credscope_models::{Page, Severity};
use thiserror::Error;

/// Failures crossing the backend boundary.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid response shape: {0}")]
    InvalidResponse(String),
}

/// Result type alias for backend calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Async contract for the records backend.
#[async_trait]
pub trait RecordsApi: Send + Sync {
    /// `GET /records?page={n}&size={s}&filter={text}`
    async fn fetch_page(&self, page: u32, size: u32, filter: &str) -> ApiResult<Page>;

    /// `PATCH /records` with `{id, valid}`.
    async fn set_validity(&self, id: i64, valid: bool) -> ApiResult<()>;

    /// `PATCH /records/risk` with `{id, risk}`.
    async fn set_risk(&self, id: i64, severity: Severity) -> ApiResult<()>;

    /// `DELETE /records/{id}`.
    async fn delete_record(&self, id: i64) -> ApiResult<()>;

    /// `POST /upload` (multipart: file + filter). Returns the backend ack body.
    async fn upload(&self, file_name: &str, bytes: Vec<u8>, filter: &str) -> ApiResult<String>;
}
