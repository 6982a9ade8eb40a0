use serde::Serialize;
use tracing::debug;

use crate::indicators::high_confidence_prediction;
use crate::types::{GameType, Outcome, Platform};
use super::HashConfluenceStrategy;

/// Sureshot calls are always hashed with the primary salt, whatever platform
/// the caller is playing on.
pub const SURESHOT_PLATFORM: Platform = Platform::Primary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SureshotCall {
    pub outcome: Outcome,
    pub confident: bool,
}

/// Confident only when the high-confidence trend exists and matches the V5
/// call made with the primary salt.
pub fn sureshot(
    strategy: &HashConfluenceStrategy,
    period: &str,
    history: &[Outcome],
    game: GameType,
) -> SureshotCall {
    let v5 = strategy.evaluate(period, SURESHOT_PLATFORM, history);
    let trend = high_confidence_prediction(history);
    let confident = trend == Some(v5.outcome);

    debug!("Sureshot {} period={} v5={} trend={:?} confident={}", game, period, v5.outcome, trend, confident);

    SureshotCall {
        outcome: v5.outcome,
        confident,
    }
}
