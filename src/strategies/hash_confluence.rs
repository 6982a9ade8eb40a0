use crate::indicators::HashPredictor;
use crate::types::{Outcome, Platform};
use super::{combine, DigitSource, Prediction, PredictionContext, Strategy};

/// Period text hashed when the feed could not supply one.
pub const FALLBACK_PERIOD: &str = "000";

/// V5: hash prediction refined by trend confluence.
#[derive(Debug, Clone, Default)]
pub struct HashConfluenceStrategy {
    predictor: HashPredictor,
}

impl HashConfluenceStrategy {
    pub fn new(predictor: HashPredictor) -> Self {
        Self { predictor }
    }

    /// Hash the period for `platform`, then reconcile with `history`.
    pub fn evaluate(&self, period: &str, platform: Platform, history: &[Outcome]) -> Prediction {
        let hashed = self.predictor.predict(period, platform);
        let combined = combine(hashed.outcome, history);

        let label = match combined.confluence {
            Some(c) => format!("V5+ {} {}", platform, c.glyph()),
            None => format!("V5+ {}", platform),
        };

        Prediction {
            outcome: combined.outcome,
            label,
            digit: Some(hashed.digit),
            confluence: combined.confluence,
        }
    }
}

impl Strategy for HashConfluenceStrategy {
    fn name(&self) -> &str {
        "V5"
    }

    fn predict(&self, ctx: &PredictionContext<'_>, _rng: &mut dyn DigitSource) -> Prediction {
        let period = ctx.period.unwrap_or(FALLBACK_PERIOD);
        self.evaluate(period, ctx.platform, &ctx.outcomes)
    }
}
