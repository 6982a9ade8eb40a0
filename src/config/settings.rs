use serde::{Deserialize, Serialize};

use crate::types::{GameType, Platform};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub salts: SaltSettings,
    pub ladder: LadderSettings,
    pub feed: FeedSettings,
    pub server: ServerSettings,
    pub database: DatabaseSettings,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        // Salts
        if self.salts.primary.is_empty() || self.salts.alternate.is_empty() {
            errors.push("salts: primary and alternate must be non-empty".to_string());
        }
        if self.salts.primary == self.salts.alternate {
            errors.push("salts: primary and alternate must differ".to_string());
        }

        // Ladder
        if self.ladder.sequence.is_empty() {
            errors.push("ladder: sequence must contain at least one level".to_string());
        }
        if self.ladder.sequence.iter().any(|&m| m == 0) {
            errors.push("ladder: every multiplier must be >= 1".to_string());
        }

        // Feed
        if self.feed.history_limit == 0 {
            errors.push("feed: history_limit must be > 0".to_string());
        }
        if self.feed.timeout_secs == 0 {
            errors.push("feed: timeout_secs must be > 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaltSettings {
    pub primary: String,
    pub alternate: String,
}

impl SaltSettings {
    pub fn for_platform(&self, platform: Platform) -> &str {
        match platform {
            Platform::Primary => &self.primary,
            Platform::Alternate => &self.alternate,
        }
    }
}

impl Default for SaltSettings {
    fn default() -> Self {
        Self {
            primary: "ar-lottery-v5-plus".to_string(),
            alternate: "gods_plan".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LadderSettings {
    pub sequence: Vec<u64>,
}

impl Default for LadderSettings {
    fn default() -> Self {
        Self {
            sequence: vec![1, 2, 4, 8, 16, 32],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    pub timeout_secs: u64,
    pub history_limit: usize,
    pub user_agent: String,
    pub primary: PlatformEndpoints,
    pub alternate: PlatformEndpoints,
}

impl FeedSettings {
    pub fn endpoints(&self, platform: Platform) -> &PlatformEndpoints {
        match platform {
            Platform::Primary => &self.primary,
            Platform::Alternate => &self.alternate,
        }
    }
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            history_limit: 12,
            user_agent: "Mozilla/5.0 (Linux; Android 10; K) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36".to_string(),
            primary: PlatformEndpoints {
                referer: "https://www.92lottery.com/".to_string(),
                origin: "https://www.92lottery.com".to_string(),
                host: None,
                thirty_seconds: GameEndpoints {
                    current: "https://draw.ar-lottery01.com/WinGo/WinGo_30S.json".to_string(),
                    history: "https://draw.ar-lottery01.com/WinGo/WinGo_30S/GetHistoryIssuePage.json".to_string(),
                },
                one_minute: GameEndpoints {
                    current: "https://draw.ar-lottery01.com/WinGo/WinGo_1M.json".to_string(),
                    history: "https://draw.ar-lottery01.com/WinGo/WinGo_1M/GetHistoryIssuePage.json".to_string(),
                },
            },
            alternate: PlatformEndpoints {
                referer: "https://trustwin.vip/".to_string(),
                origin: "https://trustwin.vip".to_string(),
                host: Some("trustwin.vip".to_string()),
                thirty_seconds: GameEndpoints {
                    current: "https://trustwin.vip/api/webapi/GetGameIssue?typeId=4&language=0".to_string(),
                    history: "https://trustwin.vip/api/webapi/GetNoaverageEmerdList?typeId=4&pageSize=10&pageNo=1&language=0".to_string(),
                },
                one_minute: GameEndpoints {
                    current: "https://trustwin.vip/api/webapi/GetGameIssue?typeId=1&language=0".to_string(),
                    history: "https://trustwin.vip/api/webapi/GetNoaverageEmerdList?typeId=1&pageSize=10&pageNo=1&language=0".to_string(),
                },
            },
        }
    }
}

/// Request header profile and URLs for one platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformEndpoints {
    pub referer: String,
    pub origin: String,
    pub host: Option<String>,
    pub thirty_seconds: GameEndpoints,
    pub one_minute: GameEndpoints,
}

impl PlatformEndpoints {
    pub fn game(&self, game: GameType) -> &GameEndpoints {
        match game {
            GameType::ThirtySeconds => &self.thirty_seconds,
            GameType::OneMinute => &self.one_minute,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEndpoints {
    pub current: String,
    pub history: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { port: 5000 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite:./wingo_sessions.db".to_string(),
        }
    }
}
