//! Client for the recommendation backend
//!
//! `RecommendationApi` is the seam the view layer talks to; `HttpApi` is the
//! reqwest-backed implementation. Status/body interpretation lives in plain
//! functions so it can be exercised without a server.

use crate::types::*;
use async_trait::async_trait;
use tracing::debug;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("{}", .0.as_deref().unwrap_or("request was rejected by the server"))]
    Rejected(Option<String>),

    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecommendationApi: Send + Sync {
    /// `POST /api/recommend`
    async fn recommend(&self, request: &RecommendRequest) -> ApiResult<Vec<Movie>>;

    /// `GET /api/history/:session_id?limit=N`, newest first
    async fn history(&self, session_id: &str, limit: u32) -> ApiResult<Vec<HistoryEntry>>;

    /// `DELETE /api/clear-history/:session_id`
    async fn clear_history(&self, session_id: &str) -> ApiResult<()>;

    /// `GET /api/health`
    async fn health(&self) -> ApiResult<Health>;

    /// `GET /api/statistics`
    async fn statistics(&self) -> ApiResult<Analytics>;
}

pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read(response: reqwest::Response) -> ApiResult<(u16, Vec<u8>)> {
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        debug!(status, bytes = body.len(), "Response received");
        Ok((status, body.to_vec()))
    }
}

#[async_trait]
impl RecommendationApi for HttpApi {
    async fn recommend(&self, request: &RecommendRequest) -> ApiResult<Vec<Movie>> {
        debug!(query = %request.query, session_id = %request.session_id, "Submitting recommendation request");
        let response = self
            .client
            .post(self.url("/api/recommend"))
            .json(request)
            .send()
            .await?;
        let (status, body) = Self::read(response).await?;
        interpret_recommend(status, &body)
    }

    async fn history(&self, session_id: &str, limit: u32) -> ApiResult<Vec<HistoryEntry>> {
        let response = self
            .client
            .get(self.url(&format!("/api/history/{}", session_id)))
            .query(&[("limit", limit)])
            .send()
            .await?;
        let (status, body) = Self::read(response).await?;
        interpret_history(status, &body)
    }

    async fn clear_history(&self, session_id: &str) -> ApiResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/clear-history/{}", session_id)))
            .send()
            .await?;
        let (status, body) = Self::read(response).await?;
        interpret_clear_history(status, &body)
    }

    async fn health(&self) -> ApiResult<Health> {
        let response = self.client.get(self.url("/api/health")).send().await?;
        let (status, body) = Self::read(response).await?;
        interpret_health(status, &body)
    }

    async fn statistics(&self) -> ApiResult<Analytics> {
        let response = self.client.get(self.url("/api/statistics")).send().await?;
        let (status, body) = Self::read(response).await?;
        interpret_statistics(status, &body)
    }
}

/// Non-2xx responses carry `{error}` when the backend produced them.
fn check_status(status: u16, body: &[u8]) -> ApiResult<()> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| format!("HTTP error! status: {}", status));
    Err(ApiError::Status { status, message })
}

pub fn interpret_recommend(status: u16, body: &[u8]) -> ApiResult<Vec<Movie>> {
    check_status(status, body)?;
    let parsed: RecommendResponse = serde_json::from_slice(body)?;
    match (parsed.success, parsed.movies) {
        (true, Some(movies)) => Ok(movies),
        _ => Err(ApiError::Rejected(parsed.error)),
    }
}

pub fn interpret_history(status: u16, body: &[u8]) -> ApiResult<Vec<HistoryEntry>> {
    check_status(status, body)?;
    let parsed: HistoryResponse = serde_json::from_slice(body)?;
    if parsed.success {
        Ok(parsed.recommendations)
    } else {
        Err(ApiError::Rejected(parsed.error))
    }
}

pub fn interpret_clear_history(status: u16, body: &[u8]) -> ApiResult<()> {
    check_status(status, body)?;
    let parsed: ClearHistoryResponse = serde_json::from_slice(body)?;
    if parsed.success {
        if let Some(message) = parsed.message {
            debug!(%message, "History cleared");
        }
        Ok(())
    } else {
        Err(ApiError::Rejected(parsed.error))
    }
}

pub fn interpret_health(status: u16, body: &[u8]) -> ApiResult<Health> {
    check_status(status, body)?;
    Ok(serde_json::from_slice(body)?)
}

pub fn interpret_statistics(status: u16, body: &[u8]) -> ApiResult<Analytics> {
    check_status(status, body)?;
    let parsed: StatisticsResponse = serde_json::from_slice(body)?;
    match (parsed.success, parsed.statistics) {
        (true, Some(statistics)) => Ok(Analytics {
            statistics,
            recent_activity: parsed.recent_activity,
        }),
        _ => Err(ApiError::Rejected(parsed.error)),
    }
}
