use super::{random_outcome, DigitSource, Prediction, PredictionContext, Strategy};

/// V3: ignores every input.
#[derive(Debug, Clone, Default)]
pub struct PureRandomStrategy;

impl Strategy for PureRandomStrategy {
    fn name(&self) -> &str {
        "V3"
    }

    fn predict(&self, _ctx: &PredictionContext<'_>, rng: &mut dyn DigitSource) -> Prediction {
        Prediction::new(random_outcome(rng), "V3 Random AI")
    }
}
