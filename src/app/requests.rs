//! Background request dispatch
//!
//! Calls run on the app's tokio runtime; results come back over a channel and
//! are drained on the UI thread once per frame.

use super::state::Command;
use crate::api::{ApiResult, RecommendationApi};
use crate::types::{Analytics, Health, HistoryEntry, Movie};
use eframe::egui;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Result of one finished request
#[derive(Debug)]
pub enum ApiEvent {
    Recommended(ApiResult<Vec<Movie>>),
    /// Carries the generation of the `LoadHistory` that produced it
    HistoryLoaded(u64, ApiResult<Vec<HistoryEntry>>),
    HistoryCleared(ApiResult<()>),
    Health(ApiResult<Health>),
    Statistics(ApiResult<Analytics>),
}

pub struct Requests {
    api: Arc<dyn RecommendationApi>,
    runtime: tokio::runtime::Runtime,
    tx: mpsc::UnboundedSender<ApiEvent>,
    rx: mpsc::UnboundedReceiver<ApiEvent>,
    session_id: String,
    history_limit: u32,
    ctx: Option<egui::Context>,
}

impl Requests {
    pub fn new(
        api: Arc<dyn RecommendationApi>,
        session_id: String,
        history_limit: u32,
    ) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (tx, rx) = mpsc::unbounded_channel();
        Ok(Self {
            api,
            runtime,
            tx,
            rx,
            session_id,
            history_limit,
            ctx: None,
        })
    }

    /// Wake the UI when a result lands
    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.ctx = Some(ctx);
        self
    }

    pub fn dispatch(&self, command: Command) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        let ctx = self.ctx.clone();
        let session_id = self.session_id.clone();
        let limit = self.history_limit;

        debug!(?command, "Dispatching request");
        self.runtime.spawn(async move {
            let event = match command {
                Command::Recommend(request) => ApiEvent::Recommended(api.recommend(&request).await),
                Command::LoadHistory(generation) => {
                    ApiEvent::HistoryLoaded(generation, api.history(&session_id, limit).await)
                }
                Command::ClearHistory => ApiEvent::HistoryCleared(api.clear_history(&session_id).await),
                Command::CheckHealth => ApiEvent::Health(api.health().await),
                Command::LoadStatistics => ApiEvent::Statistics(api.statistics().await),
            };
            // Receiver only goes away on shutdown
            let _ = tx.send(event);
            if let Some(ctx) = ctx {
                ctx.request_repaint();
            }
        });
    }

    /// Drain every finished request without blocking
    pub fn poll(&mut self) -> Vec<ApiEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[cfg(test)]
    pub(crate) fn wait(&mut self, timeout: std::time::Duration) -> Option<ApiEvent> {
        let rx = &mut self.rx;
        self.runtime
            .block_on(async { tokio::time::timeout(timeout, rx.recv()).await.ok().flatten() })
    }
}
