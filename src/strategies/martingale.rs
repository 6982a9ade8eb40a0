use crate::types::RoundResult;
use super::{DigitSource, Prediction, PredictionContext, Strategy};

/// V2: keep the call after a win, flip it otherwise.
#[derive(Debug, Clone, Default)]
pub struct MartingaleStrategy;

impl Strategy for MartingaleStrategy {
    fn name(&self) -> &str {
        "V2"
    }

    fn predict(&self, ctx: &PredictionContext<'_>, _rng: &mut dyn DigitSource) -> Prediction {
        let current = ctx.session.current_prediction;

        if ctx.last_outcome == RoundResult::Win {
            return Prediction::new(current, "V2 Winning Streak");
        }
        // Level 2 has its own label; the flip is the same at every level.
        if ctx.session.current_level == 2 {
            return Prediction::new(current.opposite(), "V2 Switch (Level 2)");
        }
        Prediction::new(current.opposite(), "V2 Switch")
    }
}
