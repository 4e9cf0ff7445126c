//! Glue between view state and request dispatch

use super::requests::Requests;
use super::state::{Command, ViewState};
use std::time::Instant;

pub struct Controller {
    pub state: ViewState,
    requests: Requests,
}

impl Controller {
    pub fn new(state: ViewState, requests: Requests) -> Self {
        Self { state, requests }
    }

    /// Startup requests: backend health and this session's history
    pub fn start(&mut self) {
        self.requests.dispatch(Command::CheckHealth);
        let load = self.state.load_history();
        self.requests.dispatch(load);
    }

    pub fn submit(&mut self) {
        if let Some(command) = self.state.begin_submit() {
            self.requests.dispatch(command);
        }
    }

    pub fn confirm_clear_history(&mut self) {
        if let Some(command) = self.state.confirm_clear_history() {
            self.requests.dispatch(command);
        }
    }

    pub fn toggle_analytics(&mut self) {
        if let Some(command) = self.state.toggle_analytics() {
            self.requests.dispatch(command);
        }
    }

    /// Apply finished requests and expire timed messages. Returns how many
    /// results were applied.
    pub fn pump(&mut self, now: Instant) -> usize {
        let events = self.requests.poll();
        let applied = events.len();
        for event in events {
            if let Some(follow_up) = self.state.apply(event, now) {
                self.requests.dispatch(follow_up);
            }
        }
        self.state.expire_success(now);
        applied
    }

    #[cfg(test)]
    fn pump_next(&mut self) -> bool {
        match self.requests.wait(std::time::Duration::from_secs(5)) {
            Some(event) => {
                if let Some(follow_up) = self.state.apply(event, Instant::now()) {
                    self.requests.dispatch(follow_up);
                }
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MockRecommendationApi};
    use crate::constants::EMPTY_PREFERENCE_ERROR;
    use crate::types::{HistoryEntry, Movie};
    use std::sync::Arc;

    const SESSION: &str = "session_1700000000000_k3j4h5g6f";

    fn controller(api: MockRecommendationApi) -> Controller {
        let requests = Requests::new(Arc::new(api), SESSION.to_string(), 5).unwrap();
        Controller::new(
            ViewState::new(SESSION.to_string(), "http://localhost:5000".to_string()),
            requests,
        )
    }

    fn movie(title: &str) -> Movie {
        Movie {
            id: None,
            title: title.into(),
            year: 1999,
            genre: "Sci-Fi".into(),
            rating: 8.7,
            description: "Red pill.".into(),
        }
    }

    #[test]
    fn empty_submit_makes_no_call() {
        let mut api = MockRecommendationApi::new();
        api.expect_recommend().times(0);

        let mut c = controller(api);
        c.submit();
        assert_eq!(c.state.error.as_deref(), Some(EMPTY_PREFERENCE_ERROR));
        assert!(!c.state.loading);
        assert_eq!(c.pump(Instant::now()), 0);
    }

    #[test]
    fn successful_submit_then_history_refresh() {
        let mut api = MockRecommendationApi::new();
        api.expect_recommend()
            .withf(|req| req.query == "Sci-Fi movies" && req.session_id == SESSION)
            .times(1)
            .returning(|_| Ok(vec![movie("The Matrix")]));
        api.expect_history()
            .withf(|session_id, limit| session_id == SESSION && *limit == 5)
            .times(1)
            .returning(|_, _| {
                Ok(vec![HistoryEntry {
                    id: 1,
                    query: "Sci-Fi movies".into(),
                    movies: vec![movie("The Matrix")],
                    created_at: "2025-01-01T00:00:00".into(),
                }])
            });

        let mut c = controller(api);
        c.state.toggle_genre("Sci-Fi");
        c.submit();
        assert!(c.state.loading);

        assert!(c.pump_next());
        assert!(!c.state.loading);
        assert_eq!(c.state.movies.len(), 1);
        assert_eq!(c.state.error, None);

        assert!(c.pump_next());
        assert_eq!(c.state.history.len(), 1);
    }

    #[test]
    fn failed_submit_leaves_movies_empty() {
        let mut api = MockRecommendationApi::new();
        api.expect_recommend()
            .times(1)
            .returning(|_| Err(ApiError::Rejected(Some("Failed to parse AI response. Please try again.".into()))));
        api.expect_history().times(0);

        let mut c = controller(api);
        c.state.preference = "anything".into();
        c.submit();
        assert!(c.pump_next());
        assert!(c.state.movies.is_empty());
        assert_eq!(
            c.state.error.as_deref(),
            Some("Failed to parse AI response. Please try again.")
        );
    }

    #[test]
    fn clear_history_only_after_confirmation() {
        let mut api = MockRecommendationApi::new();
        api.expect_clear_history()
            .withf(|session_id| session_id == SESSION)
            .times(1)
            .returning(|_| Ok(()));

        let mut c = controller(api);
        c.state.history = vec![HistoryEntry {
            id: 3,
            query: "q".into(),
            movies: vec![],
            created_at: "2025-01-01T00:00:00".into(),
        }];

        c.confirm_clear_history();
        assert_eq!(c.pump(Instant::now()), 0);

        c.state.request_clear_history();
        c.confirm_clear_history();
        assert!(c.pump_next());
        assert!(c.state.history.is_empty());
    }
}
