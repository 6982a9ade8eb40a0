use crate::indicators::match_pattern;
use super::{random_outcome, DigitSource, Prediction, PredictionContext, Strategy};

/// V1: pattern table first, then continue the last draw, then a coin flip.
#[derive(Debug, Clone, Default)]
pub struct PatternFirstStrategy;

impl Strategy for PatternFirstStrategy {
    fn name(&self) -> &str {
        "V1"
    }

    fn predict(&self, ctx: &PredictionContext<'_>, rng: &mut dyn DigitSource) -> Prediction {
        if let Some(m) = match_pattern(&ctx.outcomes) {
            return Prediction::new(m.prediction, m.label);
        }
        match ctx.outcomes.last() {
            Some(last) => Prediction::new(*last, "V1 Streak"),
            None => Prediction::new(random_outcome(rng), "V1 Random"),
        }
    }
}
