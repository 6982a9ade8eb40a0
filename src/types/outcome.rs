use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary category of a single draw result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Big,
    Small,
}

impl Outcome {
    /// Results 0-4 are Small, 5-9 are Big.
    pub fn classify(result: u8) -> Self {
        if result <= 4 {
            Outcome::Small
        } else {
            Outcome::Big
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Outcome::Big => Outcome::Small,
            Outcome::Small => Outcome::Big,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Big => "Big",
            Outcome::Small => "Small",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Outcome::Big => "red",
            Outcome::Small => "green",
        }
    }

    /// Marker used in the rendered trend strip.
    pub fn marker(&self) -> &'static str {
        match self {
            Outcome::Big => "🔴",
            Outcome::Small => "🟢",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "big" | "b" => Some(Outcome::Big),
            "small" | "s" => Some(Outcome::Small),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the user's previous round settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundResult {
    Win,
    Loss,
    #[default]
    None,
}

impl RoundResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundResult::Win => "win",
            RoundResult::Loss => "loss",
            RoundResult::None => "none",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "win" => RoundResult::Win,
            "loss" => RoundResult::Loss,
            _ => RoundResult::None,
        }
    }
}

impl fmt::Display for RoundResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
