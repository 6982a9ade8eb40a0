use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, HOST, ORIGIN, REFERER, USER_AGENT};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

use crate::config::FeedSettings;
use crate::types::{GameType, Platform};
use super::{next_period, parse_current_period, parse_history, truncate_history, FeedError, FeedSnapshot, GameFeed};

/// Polls the public draw endpoints over HTTP.
#[derive(Debug, Clone)]
pub struct HttpGameFeed {
    client: Client,
    settings: FeedSettings,
}

impl HttpGameFeed {
    pub fn new(settings: FeedSettings) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self { client, settings })
    }

    /// Browser-like headers plus the platform's referer profile.
    fn headers(&self, platform: Platform) -> HeaderMap {
        let endpoints = self.settings.endpoints(platform);
        let mut headers = HeaderMap::new();

        let mut insert = |name: HeaderName, value: &str| {
            if let Ok(v) = HeaderValue::from_str(value) {
                headers.insert(name, v);
            }
        };
        insert(USER_AGENT, self.settings.user_agent.as_str());
        insert(ACCEPT, "application/json, text/plain, */*");
        insert(CONTENT_TYPE, "application/json;charset=UTF-8");
        insert(REFERER, endpoints.referer.as_str());
        insert(ORIGIN, endpoints.origin.as_str());
        if let Some(host) = &endpoints.host {
            insert(HOST, host.as_str());
        }
        headers
    }

    /// Cache-busting query parameters, shaped per platform.
    fn cache_buster(platform: Platform) -> Vec<(&'static str, String)> {
        let ts = Utc::now().timestamp_millis().to_string();
        match platform {
            Platform::Primary => vec![("ts", ts)],
            Platform::Alternate => vec![("random", ts.clone()), ("timestamp", ts)],
        }
    }

    async fn get_json(&self, url: &str, platform: Platform) -> Result<Value, FeedError> {
        let resp = self
            .client
            .get(url)
            .headers(self.headers(platform))
            .query(&Self::cache_buster(platform))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        resp.json::<Value>().await.map_err(|_| FeedError::Malformed {
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl GameFeed for HttpGameFeed {
    async fn fetch(&self, game: GameType, platform: Platform) -> FeedSnapshot {
        let urls = self.settings.endpoints(platform).game(game);

        let mut period = match self.get_json(&urls.current, platform).await {
            Ok(body) => parse_current_period(&body),
            Err(e) => {
                error!("Error fetching current period ({} {}): {}", platform, game, e);
                None
            }
        };

        let history = match self.get_json(&urls.history, platform).await {
            Ok(body) => truncate_history(parse_history(&body), self.settings.history_limit),
            Err(e) => {
                error!("Error fetching history ({} {}): {}", platform, game, e);
                Vec::new()
            }
        };

        if period.is_none() {
            period = next_period(&history);
            if let Some(p) = &period {
                debug!("Current period unavailable, derived {} from history", p);
            }
        }

        debug!("Fetched {} {}: period={:?} draws={}", platform, game, period, history.len());
        FeedSnapshot::new(period, history)
    }
}
