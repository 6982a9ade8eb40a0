use crate::indicators::{all_equal, last_n};
use super::{DigitSource, Prediction, PredictionContext, Strategy};

const STRONG_TREND_WINDOW: usize = 3;

/// V4: ride three-draw streaks, flip otherwise, and always flip at the top of
/// the ladder.
#[derive(Debug, Clone)]
pub struct TrendFollowerStrategy {
    safety_level: usize,
}

impl TrendFollowerStrategy {
    pub fn new(max_level: usize) -> Self {
        Self {
            safety_level: max_level,
        }
    }
}

impl Strategy for TrendFollowerStrategy {
    fn name(&self) -> &str {
        "V4"
    }

    fn predict(&self, ctx: &PredictionContext<'_>, _rng: &mut dyn DigitSource) -> Prediction {
        let flipped = ctx.session.current_prediction.opposite();

        if ctx.session.current_level == self.safety_level {
            return Prediction::new(flipped, "V4 Safety Switch");
        }
        if let Some(recent) = last_n(&ctx.outcomes, STRONG_TREND_WINDOW) {
            if all_equal(recent) {
                return Prediction::new(recent[0], "V4 Strong Trend");
            }
        }
        Prediction::new(flipped, "V4 Smart Switch")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::ScriptedDigits;
    use crate::types::{history_from, Outcome, Platform, RoundResult, SessionState};
    use Outcome::{Big as B, Small as S};

    fn run(current: Outcome, level: usize, history: &[Outcome]) -> Prediction {
        let session = SessionState::new(current).with_level(level);
        let history = history_from(history);
        let ctx = PredictionContext::new(&session, RoundResult::Loss, &history, None, Platform::Primary);
        TrendFollowerStrategy::new(6).predict(&ctx, &mut ScriptedDigits::new(&[0]))
    }

    #[test]
    fn test_safety_switch_at_max_level() {
        assert_eq!(run(B, 6, &[B, B, B]), Prediction::new(S, "V4 Safety Switch"));
    }

    #[test]
    fn test_strong_trend_continues() {
        assert_eq!(run(B, 2, &[B, S, S, S]), Prediction::new(S, "V4 Strong Trend"));
    }

    #[test]
    fn test_smart_switch_otherwise() {
        assert_eq!(run(B, 2, &[S, S, B]), Prediction::new(S, "V4 Smart Switch"));
        assert_eq!(run(S, 1, &[B, B]), Prediction::new(B, "V4 Smart Switch"));
        assert_eq!(run(S, 1, &[]), Prediction::new(B, "V4 Smart Switch"));
    }
}
