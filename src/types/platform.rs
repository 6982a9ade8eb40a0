use serde::{Deserialize, Serialize};
use std::fmt;

/// Upstream feed/brand context. Selects the salt and the request header profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Platform {
    #[default]
    Primary,
    Alternate,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Primary => "Primary",
            Platform::Alternate => "Alternate",
        }
    }

    /// Unknown names fall back to `Primary`.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "alternate" | "alt" => Platform::Alternate,
            _ => Platform::Primary,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Round length of the draw game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameType {
    #[default]
    ThirtySeconds,
    OneMinute,
}

impl GameType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::ThirtySeconds => "30s",
            GameType::OneMinute => "1m",
        }
    }

    /// Anything other than "1m" is treated as the 30 second game.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "1m" | "60s" => GameType::OneMinute,
            _ => GameType::ThirtySeconds,
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_parsing_defaults_to_primary() {
        assert_eq!(Platform::from_str("alternate"), Platform::Alternate);
        assert_eq!(Platform::from_str("Primary"), Platform::Primary);
        assert_eq!(Platform::from_str("unknown"), Platform::Primary);
    }

    #[test]
    fn test_game_type_parsing() {
        assert_eq!(GameType::from_str("1m"), GameType::OneMinute);
        assert_eq!(GameType::from_str("30s"), GameType::ThirtySeconds);
        assert_eq!(GameType::from_str("5m"), GameType::ThirtySeconds);
    }
}
