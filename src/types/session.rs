use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Outcome, RoundResult};

pub const NEW_USER_LABEL: &str = "Random (New User)";

/// User-selected prediction algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StrategyVersion {
    /// Pattern table first, then streak continuation
    V1,
    /// Martingale switcher
    V2,
    /// Pure random
    V3,
    /// Trend follower with a safety switch at the top of the ladder
    V4,
    /// Hash plus trend confluence
    #[default]
    V5,
}

impl StrategyVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyVersion::V1 => "V1",
            StrategyVersion::V2 => "V2",
            StrategyVersion::V3 => "V3",
            StrategyVersion::V4 => "V4",
            StrategyVersion::V5 => "V5",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "V1" => Some(StrategyVersion::V1),
            "V2" => Some(StrategyVersion::V2),
            "V3" => Some(StrategyVersion::V3),
            "V4" => Some(StrategyVersion::V4),
            "V5" | "V5+" => Some(StrategyVersion::V5),
            _ => None,
        }
    }

    pub fn all() -> Vec<StrategyVersion> {
        vec![
            StrategyVersion::V1,
            StrategyVersion::V2,
            StrategyVersion::V3,
            StrategyVersion::V4,
            StrategyVersion::V5,
        ]
    }
}

impl fmt::Display for StrategyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-user prediction state owned by the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub strategy_version: StrategyVersion,
    pub current_prediction: Outcome,
    pub current_pattern_name: String,
    pub current_level: usize,
    pub last_outcome: RoundResult,
    pub total_wins: u64,
    pub total_losses: u64,
}

impl SessionState {
    pub fn new(initial_prediction: Outcome) -> Self {
        Self {
            strategy_version: StrategyVersion::default(),
            current_prediction: initial_prediction,
            current_pattern_name: NEW_USER_LABEL.to_string(),
            current_level: 1,
            last_outcome: RoundResult::None,
            total_wins: 0,
            total_losses: 0,
        }
    }

    pub fn with_strategy(mut self, version: StrategyVersion) -> Self {
        self.strategy_version = version;
        self
    }

    pub fn with_level(mut self, level: usize) -> Self {
        self.current_level = level;
        self
    }

    pub fn apply(&mut self, fields: &SessionFields) {
        if let Some(v) = fields.strategy_version {
            self.strategy_version = v;
        }
        if let Some(p) = fields.current_prediction {
            self.current_prediction = p;
        }
        if let Some(name) = &fields.current_pattern_name {
            self.current_pattern_name = name.clone();
        }
        if let Some(level) = fields.current_level {
            self.current_level = level;
        }
        if let Some(last) = fields.last_outcome {
            self.last_outcome = last;
        }
        if let Some(w) = fields.total_wins {
            self.total_wins = w;
        }
        if let Some(l) = fields.total_losses {
            self.total_losses = l;
        }
    }
}

/// Partial update for a session. Only `Some` members are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFields {
    pub strategy_version: Option<StrategyVersion>,
    pub current_prediction: Option<Outcome>,
    pub current_pattern_name: Option<String>,
    pub current_level: Option<usize>,
    pub last_outcome: Option<RoundResult>,
    pub total_wins: Option<u64>,
    pub total_losses: Option<u64>,
}

impl SessionFields {
    /// The two fields the router commits after every prediction.
    pub fn prediction(outcome: Outcome, label: &str) -> Self {
        Self {
            current_prediction: Some(outcome),
            current_pattern_name: Some(label.to_string()),
            ..Default::default()
        }
    }

    pub fn strategy(version: StrategyVersion) -> Self {
        Self {
            strategy_version: Some(version),
            ..Default::default()
        }
    }
}
