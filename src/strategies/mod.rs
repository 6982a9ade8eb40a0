pub mod random;
pub mod pattern_first;
pub mod martingale;
pub mod pure_random;
pub mod trend_follower;
pub mod confluence;
pub mod hash_confluence;
pub mod sureshot;

pub use random::*;
pub use pattern_first::*;
pub use martingale::*;
pub use pure_random::*;
pub use trend_follower::*;
pub use confluence::*;
pub use hash_confluence::*;
pub use sureshot::*;

use serde::Serialize;

use crate::types::{outcomes, HistoryEntry, Outcome, Platform, RoundResult, SessionState};

pub trait Strategy: Send + Sync {
    fn name(&self) -> &str;
    fn predict(&self, ctx: &PredictionContext<'_>, rng: &mut dyn DigitSource) -> Prediction;
}

/// Everything a strategy may look at for one prediction request.
#[derive(Debug, Clone)]
pub struct PredictionContext<'a> {
    pub session: &'a SessionState,
    pub last_outcome: RoundResult,
    pub history: &'a [HistoryEntry],
    /// Outcomes of `history`, oldest first
    pub outcomes: Vec<Outcome>,
    pub period: Option<&'a str>,
    pub platform: Platform,
}

impl<'a> PredictionContext<'a> {
    pub fn new(
        session: &'a SessionState,
        last_outcome: RoundResult,
        history: &'a [HistoryEntry],
        period: Option<&'a str>,
        platform: Platform,
    ) -> Self {
        Self {
            session,
            last_outcome,
            history,
            outcomes: outcomes(history),
            period,
            platform,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prediction {
    pub outcome: Outcome,
    pub label: String,
    /// Digit selected by the hash predictor, when one ran
    pub digit: Option<u8>,
    pub confluence: Option<Confluence>,
}

impl Prediction {
    pub fn new(outcome: Outcome, label: &str) -> Self {
        Self {
            outcome,
            label: label.to_string(),
            digit: None,
            confluence: None,
        }
    }
}
