pub mod client;
pub mod parse;

pub use client::*;
pub use parse::*;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::types::{GameType, HistoryEntry, Platform};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("malformed response from {url}")]
    Malformed { url: String },
}

/// Latest draw data for one game on one platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedSnapshot {
    /// Period currently open for play
    pub period: Option<String>,
    /// Completed draws, oldest first
    pub history: Vec<HistoryEntry>,
}

impl FeedSnapshot {
    pub fn new(period: Option<String>, history: Vec<HistoryEntry>) -> Self {
        Self { period, history }
    }
}

/// Supplies draw data. Failures degrade to an empty snapshot instead of
/// erroring, so callers can always make a best-effort prediction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameFeed: Send + Sync {
    async fn fetch(&self, game: GameType, platform: Platform) -> FeedSnapshot;
}
