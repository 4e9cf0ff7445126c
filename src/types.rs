//! Wire types exchanged with the recommendation backend

use serde::{Deserialize, Serialize};

/// A recommended movie, rendered exactly as the backend sends it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub rating: f64,
    pub description: String,
}

/// A past recommendation stored server-side for this session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub query: String,
    pub movies: Vec<Movie>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendRequest {
    pub query: String,
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct RecommendResponse {
    pub success: bool,
    #[serde(default)]
    pub movies: Option<Vec<Movie>>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    pub success: bool,
    #[serde(default)]
    pub recommendations: Vec<HistoryEntry>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClearHistoryResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `GET /api/health`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub ai_service: Option<String>,
    #[serde(default)]
    pub ai_provider: Option<String>,
}

impl Health {
    pub fn ai_configured(&self) -> bool {
        self.ai_service.as_deref() == Some("configured")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Statistics {
    pub total_users: u64,
    pub total_recommendations: u64,
    pub total_movies: u64,
    pub average_movies_per_recommendation: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecentActivity {
    pub query: String,
    pub movie_count: usize,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
pub struct StatisticsResponse {
    pub success: bool,
    #[serde(default)]
    pub statistics: Option<Statistics>,
    #[serde(default)]
    pub recent_activity: Vec<RecentActivity>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Statistics plus recent activity, as shown in the analytics panel
#[derive(Debug, Clone, PartialEq)]
pub struct Analytics {
    pub statistics: Statistics,
    pub recent_activity: Vec<RecentActivity>,
}

/// Error body the backend attaches to non-2xx responses
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
