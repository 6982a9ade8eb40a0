use tracing::debug;

use crate::config::AppConfig;
use crate::indicators::HashPredictor;
use crate::risk::BettingLadder;
use crate::strategies::{
    DigitSource, HashConfluenceStrategy, MartingaleStrategy, PatternFirstStrategy, Prediction,
    PredictionContext, PureRandomStrategy, Strategy, TrendFollowerStrategy,
};
use crate::types::{HistoryEntry, Platform, RoundResult, SessionState, StrategyVersion};

/// Picks the strategy for a session and commits its call back into the session.
#[derive(Debug, Clone)]
pub struct StrategyRouter {
    pattern_first: PatternFirstStrategy,
    martingale: MartingaleStrategy,
    pure_random: PureRandomStrategy,
    trend_follower: TrendFollowerStrategy,
    hash_confluence: HashConfluenceStrategy,
}

impl StrategyRouter {
    pub fn new(predictor: HashPredictor, ladder: &BettingLadder) -> Self {
        Self {
            pattern_first: PatternFirstStrategy,
            martingale: MartingaleStrategy,
            pure_random: PureRandomStrategy,
            trend_follower: TrendFollowerStrategy::new(ladder.max_level()),
            hash_confluence: HashConfluenceStrategy::new(predictor),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            HashPredictor::new(config.salts.clone()),
            &BettingLadder::from_settings(&config.ladder),
        )
    }

    pub fn strategy(&self, version: StrategyVersion) -> &dyn Strategy {
        match version {
            StrategyVersion::V1 => &self.pattern_first,
            StrategyVersion::V2 => &self.martingale,
            StrategyVersion::V3 => &self.pure_random,
            StrategyVersion::V4 => &self.trend_follower,
            StrategyVersion::V5 => &self.hash_confluence,
        }
    }

    pub fn hash_confluence(&self) -> &HashConfluenceStrategy {
        &self.hash_confluence
    }

    /// Runs the session's strategy and writes the new prediction and label into
    /// `session`. Level and last outcome are left untouched.
    pub fn route(
        &self,
        session: &mut SessionState,
        last_outcome: RoundResult,
        history: &[HistoryEntry],
        period: Option<&str>,
        platform: Platform,
        rng: &mut dyn DigitSource,
    ) -> Prediction {
        let strategy = self.strategy(session.strategy_version);
        let prediction = {
            let ctx = PredictionContext::new(session, last_outcome, history, period, platform);
            strategy.predict(&ctx, rng)
        };

        debug!(
            "Routed {} -> {} ({}) from {} draws",
            strategy.name(),
            prediction.outcome,
            prediction.label,
            history.len()
        );

        session.current_prediction = prediction.outcome;
        session.current_pattern_name = prediction.label.clone();
        prediction
    }
}

impl Default for StrategyRouter {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}
