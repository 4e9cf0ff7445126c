//! View state and its transitions
//!
//! Everything the window shows is derived from `ViewState`. Rendering code
//! calls these methods on user input, and the request layer feeds API
//! results back through `apply`. Nothing here touches the network.

use super::requests::ApiEvent;
use crate::api::{ApiError, ApiResult};
use crate::constants::*;
use crate::types::{Analytics, Health, HistoryEntry, Movie, RecommendRequest};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum BackendStatus {
    Unknown,
    Online { ai_configured: bool, provider: Option<String> },
    Offline(String),
}

/// Outgoing request produced by a state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Recommend(RecommendRequest),
    /// Tagged with the history generation it was issued under
    LoadHistory(u64),
    ClearHistory,
    CheckHealth,
    LoadStatistics,
}

pub struct ViewState {
    pub session_id: String,
    pub api_base_url: String,

    pub preference: String,
    pub movies: Vec<Movie>,
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
    success_expires: Option<Instant>,
    pub searched: bool,

    // Filter selections, in the order the user picked them
    pub selected_genres: Vec<String>,
    pub selected_years: Vec<String>,
    pub show_genre_dropdown: bool,
    pub show_year_dropdown: bool,

    pub history: Vec<HistoryEntry>,
    pub show_history: bool,
    pub confirm_clear: bool,
    // Bumped per history load or clear; older loads are dropped on arrival
    history_generation: u64,

    pub show_analytics: bool,
    pub analytics: Option<Analytics>,
    pub analytics_error: Option<String>,
    pub analytics_loading: bool,

    pub backend: BackendStatus,
}

impl ViewState {
    pub fn new(session_id: String, api_base_url: String) -> Self {
        Self {
            session_id,
            api_base_url,
            preference: String::new(),
            movies: Vec::new(),
            loading: false,
            error: None,
            success: None,
            success_expires: None,
            searched: false,
            selected_genres: Vec::new(),
            selected_years: Vec::new(),
            show_genre_dropdown: false,
            show_year_dropdown: false,
            history: Vec::new(),
            show_history: false,
            confirm_clear: false,
            history_generation: 0,
            show_analytics: false,
            analytics: None,
            analytics_error: None,
            analytics_loading: false,
            backend: BackendStatus::Unknown,
        }
    }

    // ------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------

    pub fn toggle_genre(&mut self, genre: &str) {
        toggle(&mut self.selected_genres, genre);
        self.regenerate_preference();
    }

    pub fn toggle_year(&mut self, year: &str) {
        toggle(&mut self.selected_years, year);
        self.regenerate_preference();
    }

    /// Manual typing; selections stay as they are
    pub fn set_preference(&mut self, text: impl Into<String>) {
        self.preference = text.into();
    }

    pub fn is_genre_selected(&self, genre: &str) -> bool {
        self.selected_genres.iter().any(|g| g == genre)
    }

    pub fn is_year_selected(&self, year: &str) -> bool {
        self.selected_years.iter().any(|y| y == year)
    }

    fn regenerate_preference(&mut self) {
        self.preference = preference_from(&self.selected_genres, &self.selected_years);
    }

    pub fn toggle_genre_dropdown(&mut self) {
        self.show_genre_dropdown = !self.show_genre_dropdown;
        if self.show_genre_dropdown {
            self.show_year_dropdown = false;
        }
    }

    pub fn toggle_year_dropdown(&mut self) {
        self.show_year_dropdown = !self.show_year_dropdown;
        if self.show_year_dropdown {
            self.show_genre_dropdown = false;
        }
    }

    pub fn close_dropdowns(&mut self) {
        self.show_genre_dropdown = false;
        self.show_year_dropdown = false;
    }

    // ------------------------------------------------------------------
    // Submit
    // ------------------------------------------------------------------

    /// Validate the preference and move into the loading state.
    /// Returns `None` (and sets an error) when there is nothing to send.
    pub fn begin_submit(&mut self) -> Option<Command> {
        if self.loading {
            return None;
        }
        if self.preference.trim().is_empty() {
            self.error = Some(EMPTY_PREFERENCE_ERROR.to_string());
            return None;
        }

        self.loading = true;
        self.error = None;
        self.set_success(None);
        self.searched = true;
        self.movies.clear();
        self.close_dropdowns();

        Some(Command::Recommend(RecommendRequest {
            query: self.preference.clone(),
            session_id: self.session_id.clone(),
        }))
    }

    fn finish_submit(&mut self, result: ApiResult<Vec<Movie>>) -> Option<Command> {
        self.loading = false;
        match result {
            Ok(movies) => {
                info!(count = movies.len(), "Recommendations received");
                self.set_success(Some(format!("Found {} amazing movies for you!", movies.len())));
                self.movies = movies;
                self.error = None;
                Some(self.load_history())
            }
            Err(ApiError::Rejected(message)) => {
                warn!(error = ?message, "Recommendation rejected");
                self.error = Some(message.unwrap_or_else(|| RECOMMEND_FAILED.to_string()));
                None
            }
            Err(e) => {
                warn!(error = %e, "Recommendation request failed");
                self.error = Some(format!(
                    "Connection error: {}. Make sure the backend is running at {}.",
                    e, self.api_base_url
                ));
                None
            }
        }
    }

    /// The "Clear" button
    pub fn reset(&mut self) {
        self.preference.clear();
        self.movies.clear();
        self.searched = false;
        self.error = None;
        self.set_success(None);
        self.selected_genres.clear();
        self.selected_years.clear();
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Start a history load. Any load already in flight goes stale.
    pub fn load_history(&mut self) -> Command {
        self.history_generation += 1;
        Command::LoadHistory(self.history_generation)
    }

    pub fn toggle_history(&mut self) {
        self.show_history = !self.show_history;
    }

    pub fn load_history_item(&mut self, index: usize) {
        let Some(entry) = self.history.get(index) else {
            return;
        };
        self.preference = entry.query.clone();
        self.movies = entry.movies.clone();
        self.searched = true;
        self.show_history = false;
        self.error = None;
        self.set_success(Some(format!("Loaded {} movies from history", self.movies.len())));
    }

    /// Ask for confirmation; no request is made yet.
    pub fn request_clear_history(&mut self) {
        self.confirm_clear = true;
    }

    pub fn cancel_clear_history(&mut self) {
        self.confirm_clear = false;
    }

    pub fn confirm_clear_history(&mut self) -> Option<Command> {
        if !self.confirm_clear {
            return None;
        }
        self.confirm_clear = false;
        self.history_generation += 1;
        Some(Command::ClearHistory)
    }

    // ------------------------------------------------------------------
    // Analytics
    // ------------------------------------------------------------------

    pub fn toggle_analytics(&mut self) -> Option<Command> {
        self.show_analytics = !self.show_analytics;
        if self.show_analytics && !self.analytics_loading {
            self.analytics_loading = true;
            self.analytics_error = None;
            Some(Command::LoadStatistics)
        } else {
            None
        }
    }

    // ------------------------------------------------------------------
    // Results
    // ------------------------------------------------------------------

    /// Fold an API result into the state. May return a follow-up request.
    pub fn apply(&mut self, event: ApiEvent, now: Instant) -> Option<Command> {
        match event {
            ApiEvent::Recommended(result) => self.finish_submit(result),
            ApiEvent::HistoryLoaded(generation, result) => {
                if generation != self.history_generation {
                    debug!(generation, current = self.history_generation, "Dropping stale history load");
                    return None;
                }
                match result {
                    Ok(entries) => self.apply_history(entries),
                    // History is best-effort; the view keeps what it had.
                    Err(e) => warn!(error = %e, "Failed to load history"),
                }
                None
            }
            ApiEvent::HistoryCleared(result) => {
                self.finish_clear_history(result, now);
                None
            }
            ApiEvent::Health(result) => {
                self.backend = backend_status(result);
                None
            }
            ApiEvent::Statistics(result) => {
                self.analytics_loading = false;
                match result {
                    Ok(analytics) => {
                        self.analytics = Some(analytics);
                        self.analytics_error = None;
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to load statistics");
                        self.analytics_error = Some(e.to_string());
                    }
                }
                None
            }
        }
    }

    pub fn apply_history(&mut self, entries: Vec<HistoryEntry>) {
        info!(count = entries.len(), "Loaded history");
        self.history = entries;
        if self.history.is_empty() {
            self.show_history = false;
        }
    }

    pub fn finish_clear_history(&mut self, result: ApiResult<()>, now: Instant) {
        match result {
            Ok(()) => {
                info!("History cleared");
                self.history.clear();
                self.show_history = false;
                self.flash_success(HISTORY_CLEARED.to_string(), now);
            }
            Err(e) => {
                warn!(error = %e, "Failed to clear history");
                self.error = Some(CLEAR_HISTORY_FAILED.to_string());
            }
        }
    }

    /// Success message that clears itself after a few seconds
    pub fn flash_success(&mut self, message: String, now: Instant) {
        self.success = Some(message);
        self.success_expires = Some(now + Duration::from_secs_f32(SUCCESS_FLASH_SECS));
    }

    /// Drop a timed success message once its deadline passes.
    pub fn expire_success(&mut self, now: Instant) {
        if let Some(deadline) = self.success_expires {
            if now >= deadline {
                self.success = None;
                self.success_expires = None;
            }
        }
    }

    pub fn success_deadline(&self) -> Option<Instant> {
        self.success_expires
    }

    fn set_success(&mut self, message: Option<String>) {
        self.success = message;
        self.success_expires = None;
    }
}

fn toggle(selection: &mut Vec<String>, value: &str) {
    if let Some(pos) = selection.iter().position(|v| v == value) {
        selection.remove(pos);
    } else {
        selection.push(value.to_string());
    }
}

/// Build the preference string from filter selections.
pub fn preference_from(genres: &[String], years: &[String]) -> String {
    match (genres.is_empty(), years.is_empty()) {
        (false, false) => format!("{} movies from {}", genres.join(", "), years.join(", ")),
        (false, true) => format!("{} movies", genres.join(", ")),
        (true, false) => format!("Movies from {}", years.join(", ")),
        (true, true) => String::new(),
    }
}

fn backend_status(result: ApiResult<Health>) -> BackendStatus {
    match result {
        Ok(health) => BackendStatus::Online {
            ai_configured: health.ai_configured(),
            provider: health.ai_provider,
        },
        Err(e) => {
            warn!(error = %e, "Backend health check failed");
            BackendStatus::Offline(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ViewState {
        ViewState::new("session_1_abcdefghi".into(), "http://localhost:5000".into())
    }

    fn movie(title: &str) -> Movie {
        Movie {
            id: None,
            title: title.into(),
            year: 2010,
            genre: "Sci-Fi".into(),
            rating: 8.8,
            description: "Dreams.".into(),
        }
    }

    fn entry(id: i64, query: &str, titles: &[&str]) -> HistoryEntry {
        HistoryEntry {
            id,
            query: query.into(),
            movies: titles.iter().map(|t| movie(t)).collect(),
            created_at: "2025-03-04T05:06:07".into(),
        }
    }

    #[test]
    fn typing_keeps_selections() {
        let mut s = state();
        s.toggle_genre("Drama");
        s.set_preference("slow burn noir");
        assert_eq!(s.preference, "slow burn noir");
        assert_eq!(s.selected_genres, vec!["Drama".to_string()]);
    }

    #[test]
    fn empty_history_closes_panel() {
        let mut s = state();
        s.apply_history(vec![entry(1, "q", &["Inception"])]);
        s.toggle_history();
        assert!(s.show_history);
        s.apply_history(Vec::new());
        assert!(!s.show_history);
    }

    #[test]
    fn genre_toggle_regenerates_preference() {
        let mut s = state();
        s.toggle_genre("Action");
        assert_eq!(s.preference, "Action movies");
        s.toggle_genre("Comedy");
        assert_eq!(s.preference, "Action, Comedy movies");
        s.toggle_genre("Action");
        assert_eq!(s.selected_genres, vec!["Comedy".to_string()]);
        assert_eq!(s.preference, "Comedy movies");
    }

    #[test]
    fn year_and_genre_combine() {
        let mut s = state();
        s.toggle_year("2024");
        assert_eq!(s.preference, "Movies from 2024");
        s.toggle_genre("Horror");
        s.toggle_year("2000-2009");
        assert_eq!(s.preference, "Horror movies from 2024, 2000-2009");
        assert!(s.is_year_selected("2000-2009"));

        s.toggle_genre("Horror");
        s.toggle_year("2024");
        s.toggle_year("2000-2009");
        assert_eq!(s.preference, "");
    }

    #[test]
    fn toggling_overwrites_typed_text() {
        let mut s = state();
        s.preference = "something slow and moody".into();
        s.toggle_genre("Drama");
        assert_eq!(s.preference, "Drama movies");
    }

    #[test]
    fn empty_submit_sets_error_without_request() {
        let mut s = state();
        s.preference = "   ".into();
        assert_eq!(s.begin_submit(), None);
        assert_eq!(s.error.as_deref(), Some(EMPTY_PREFERENCE_ERROR));
        assert!(!s.loading);
        assert!(!s.searched);
    }

    #[test]
    fn submit_enters_loading_and_builds_request() {
        let mut s = state();
        s.movies = vec![movie("Old")];
        s.error = Some("previous".into());
        s.preference = "Heist movies".into();

        let cmd = s.begin_submit();
        assert_eq!(
            cmd,
            Some(Command::Recommend(RecommendRequest {
                query: "Heist movies".into(),
                session_id: "session_1_abcdefghi".into(),
            }))
        );
        assert!(s.loading);
        assert!(s.searched);
        assert!(s.movies.is_empty());
        assert_eq!(s.error, None);

        // Submit control is disabled while a request is outstanding
        assert_eq!(s.begin_submit(), None);
    }

    fn history_loaded(s: &mut ViewState, result: ApiResult<Vec<HistoryEntry>>) -> ApiEvent {
        match s.load_history() {
            Command::LoadHistory(generation) => ApiEvent::HistoryLoaded(generation, result),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn success_populates_movies_and_asks_for_history() {
        let mut s = state();
        s.preference = "Sci-Fi movies".into();
        s.begin_submit();
        // Left over from an earlier action
        s.error = Some(RECOMMEND_FAILED.to_string());

        let follow_up = s.apply(
            ApiEvent::Recommended(Ok(vec![movie("Inception"), movie("Arrival")])),
            Instant::now(),
        );
        assert!(matches!(follow_up, Some(Command::LoadHistory(_))));
        assert!(!s.loading);
        assert_eq!(s.movies.len(), 2);
        assert_eq!(s.error, None);
        assert_eq!(s.success.as_deref(), Some("Found 2 amazing movies for you!"));
    }

    #[test]
    fn rejection_keeps_movies_empty() {
        let mut s = state();
        s.preference = "x".into();
        s.begin_submit();
        s.apply(ApiEvent::Recommended(Err(ApiError::Rejected(None))), Instant::now());
        assert!(s.movies.is_empty());
        assert_eq!(s.error.as_deref(), Some(RECOMMEND_FAILED));
        assert!(!s.loading);
    }

    #[test]
    fn transport_failure_mentions_backend_url() {
        let mut s = state();
        s.preference = "x".into();
        s.begin_submit();
        s.apply(
            ApiEvent::Recommended(Err(ApiError::Status {
                status: 500,
                message: "Internal server error".into(),
            })),
            Instant::now(),
        );
        let error = s.error.unwrap();
        assert!(error.starts_with("Connection error: Internal server error."));
        assert!(error.contains("http://localhost:5000"));
        assert!(s.movies.is_empty());
    }

    #[test]
    fn history_item_reloads_into_view() {
        let mut s = state();
        let event = history_loaded(&mut s, Ok(vec![entry(2, "War movies", &["1917", "Dunkirk"])]));
        s.apply(event, Instant::now());
        s.show_history = true;
        s.load_history_item(0);
        assert_eq!(s.preference, "War movies");
        assert_eq!(s.movies.len(), 2);
        assert!(s.searched);
        assert!(!s.show_history);
        assert_eq!(s.success.as_deref(), Some("Loaded 2 movies from history"));

        // Out of range is ignored
        s.load_history_item(9);
        assert_eq!(s.preference, "War movies");
    }

    #[test]
    fn failed_history_load_keeps_previous_entries() {
        let mut s = state();
        s.history = vec![entry(1, "a", &[])];
        let event = history_loaded(
            &mut s,
            Err(ApiError::Rejected(Some("Failed to fetch history".into()))),
        );
        s.apply(event, Instant::now());
        assert_eq!(s.history.len(), 1);
        assert_eq!(s.error, None);
    }

    #[test]
    fn clearing_history_needs_confirmation() {
        let mut s = state();
        s.history = vec![entry(1, "a", &["m"])];

        assert_eq!(s.confirm_clear_history(), None);
        s.request_clear_history();
        s.cancel_clear_history();
        assert_eq!(s.confirm_clear_history(), None);

        s.request_clear_history();
        assert_eq!(s.confirm_clear_history(), Some(Command::ClearHistory));
        assert!(!s.confirm_clear);
        assert_eq!(s.history.len(), 1);

        let now = Instant::now();
        s.apply(ApiEvent::HistoryCleared(Ok(())), now);
        assert!(s.history.is_empty());
        assert_eq!(s.success.as_deref(), Some(HISTORY_CLEARED));

        s.expire_success(now + Duration::from_secs(1));
        assert!(s.success.is_some());
        s.expire_success(now + Duration::from_secs(4));
        assert_eq!(s.success, None);
    }

    #[test]
    fn stale_history_load_cannot_undo_a_clear() {
        let mut s = state();
        s.history = vec![entry(1, "a", &["m"])];
        let Command::LoadHistory(startup) = s.load_history() else {
            panic!("expected a history load");
        };

        s.request_clear_history();
        s.confirm_clear_history();
        let now = Instant::now();
        s.apply(ApiEvent::HistoryCleared(Ok(())), now);
        assert!(s.history.is_empty());

        // The startup load answers late with the old entries
        s.apply(ApiEvent::HistoryLoaded(startup, Ok(vec![entry(1, "a", &["m"])])), now);
        assert!(s.history.is_empty());
        assert_eq!(s.success.as_deref(), Some(HISTORY_CLEARED));
    }

    #[test]
    fn only_the_latest_history_load_applies() {
        let mut s = state();
        let older = history_loaded(&mut s, Ok(vec![entry(1, "old", &[])]));
        let newer = history_loaded(&mut s, Ok(vec![entry(2, "new", &[]), entry(1, "old", &[])]));

        s.apply(newer, Instant::now());
        s.apply(older, Instant::now());
        assert_eq!(s.history.len(), 2);
        assert_eq!(s.history[0].query, "new");
    }

    #[test]
    fn failed_clear_preserves_history() {
        let mut s = state();
        s.history = vec![entry(1, "a", &[])];
        s.apply(
            ApiEvent::HistoryCleared(Err(ApiError::Rejected(Some("User not found".into())))),
            Instant::now(),
        );
        assert_eq!(s.history.len(), 1);
        assert_eq!(s.error.as_deref(), Some(CLEAR_HISTORY_FAILED));
    }

    #[test]
    fn reset_clears_everything_user_facing() {
        let mut s = state();
        s.toggle_genre("War");
        s.toggle_year("2019");
        s.movies = vec![movie("1917")];
        s.searched = true;
        s.error = Some("e".into());
        s.reset();
        assert!(s.preference.is_empty());
        assert!(s.movies.is_empty());
        assert!(s.selected_genres.is_empty());
        assert!(s.selected_years.is_empty());
        assert!(!s.searched);
        assert_eq!(s.error, None);
    }

    #[test]
    fn opening_one_dropdown_closes_the_other() {
        let mut s = state();
        s.toggle_genre_dropdown();
        assert!(s.show_genre_dropdown);
        s.toggle_year_dropdown();
        assert!(s.show_year_dropdown);
        assert!(!s.show_genre_dropdown);
    }

    #[test]
    fn analytics_fetches_only_when_opening() {
        let mut s = state();
        assert_eq!(s.toggle_analytics(), Some(Command::LoadStatistics));
        assert_eq!(s.toggle_analytics(), None);
        assert!(!s.show_analytics);
    }

    #[test]
    fn health_result_sets_backend_status() {
        let mut s = state();
        s.apply(
            ApiEvent::Health(Ok(Health {
                status: "healthy".into(),
                ai_service: Some("configured".into()),
                ai_provider: Some("Groq".into()),
            })),
            Instant::now(),
        );
        assert_eq!(
            s.backend,
            BackendStatus::Online { ai_configured: true, provider: Some("Groq".into()) }
        );
    }
}
