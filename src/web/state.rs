use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::engine::SharedPredictionService;
use crate::types::{GameType, HistoryEntry, Platform};

pub const TREND_STRIP_LEN: usize = 6;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SharedPredictionService>,
}

impl AppState {
    pub fn new(service: Arc<SharedPredictionService>) -> Self {
        Self { service }
    }
}

/// Body of the prediction endpoints. Both fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

impl PredictRequest {
    pub fn platform(&self) -> Platform {
        self.platform.as_deref().map(Platform::from_str).unwrap_or_default()
    }

    pub fn game(&self) -> GameType {
        self.time.as_deref().map(GameType::from_str).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SettleRequest {
    pub result: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StrategyRequest {
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionResponse {
    pub status: &'static str,
    pub period: Option<String>,
    pub prediction: String,
    pub color: &'static str,
    pub pattern: String,
    pub digit: Option<u8>,
    pub trend: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoutedResponse {
    pub status: &'static str,
    pub period: Option<String>,
    pub prediction: String,
    pub color: &'static str,
    pub pattern: String,
    pub strategy: String,
    pub level: usize,
    pub stake: u64,
    pub trend: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SureshotResponse {
    pub status: &'static str,
    pub period: Option<String>,
    pub prediction: String,
    pub confident: bool,
}

/// Color markers for the most recent draws, oldest first.
pub fn trend_strip(history: &[HistoryEntry], len: usize) -> Vec<&'static str> {
    let start = history.len().saturating_sub(len);
    history[start..].iter().map(|e| e.outcome.marker()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{history_from, Outcome};

    #[test]
    fn test_trend_strip_uses_most_recent() {
        let history = history_from(&[
            Outcome::Small,
            Outcome::Big,
            Outcome::Big,
            Outcome::Small,
            Outcome::Big,
            Outcome::Small,
            Outcome::Small,
        ]);
        let strip = trend_strip(&history, TREND_STRIP_LEN);
        assert_eq!(strip, vec!["🔴", "🔴", "🟢", "🔴", "🟢", "🟢"]);
        assert!(trend_strip(&[], TREND_STRIP_LEN).is_empty());
    }

    #[test]
    fn test_request_defaults() {
        let req = PredictRequest::default();
        assert_eq!(req.platform(), Platform::Primary);
        assert_eq!(req.game(), GameType::ThirtySeconds);

        let req = PredictRequest {
            platform: Some("alternate".to_string()),
            time: Some("1m".to_string()),
        };
        assert_eq!(req.platform(), Platform::Alternate);
        assert_eq!(req.game(), GameType::OneMinute);
    }
}
