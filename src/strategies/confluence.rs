use serde::Serialize;

use crate::indicators::{high_confidence_prediction, is_super_trend};
use crate::types::Outcome;

pub const CONFLUENCE_MIN_HISTORY: usize = 5;

/// How the trend reading related to the hash prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Confluence {
    /// Trend and hash agree; prediction unchanged
    Agreement,
    /// Trend disagreed during a five-draw streak and replaced the hash call
    StreakOverride,
}

impl Confluence {
    pub fn glyph(&self) -> &'static str {
        match self {
            Confluence::Agreement => "🔥",
            Confluence::StreakOverride => "⚡",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CombinedPrediction {
    pub outcome: Outcome,
    pub confluence: Option<Confluence>,
}

/// Reconciles a hash prediction with the high-confidence trend reading.
pub fn combine(hash_prediction: Outcome, history: &[Outcome]) -> CombinedPrediction {
    let unchanged = CombinedPrediction {
        outcome: hash_prediction,
        confluence: None,
    };
    if history.len() < CONFLUENCE_MIN_HISTORY {
        return unchanged;
    }
    let Some(trend) = high_confidence_prediction(history) else {
        return unchanged;
    };

    if trend == hash_prediction {
        CombinedPrediction {
            outcome: hash_prediction,
            confluence: Some(Confluence::Agreement),
        }
    } else if is_super_trend(history) {
        CombinedPrediction {
            outcome: trend,
            confluence: Some(Confluence::StreakOverride),
        }
    } else {
        unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Outcome::{Big as B, Small as S};

    const ZIGZAG: [Outcome; 10] = [B, S, B, S, B, S, B, S, B, S];

    #[test]
    fn test_short_history_returns_hash_unchanged() {
        let result = combine(S, &[B, B, B, B]);
        assert_eq!(result, CombinedPrediction { outcome: S, confluence: None });
    }

    #[test]
    fn test_no_trend_opinion_keeps_hash() {
        // five to nine draws never produce a high-confidence reading
        let result = combine(S, &[B, B, B, B, B, B]);
        assert_eq!(result, CombinedPrediction { outcome: S, confluence: None });
    }

    #[test]
    fn test_agreement_marks_without_changing() {
        let result = combine(B, &ZIGZAG);
        assert_eq!(result, CombinedPrediction { outcome: B, confluence: Some(Confluence::Agreement) });
    }

    #[test]
    fn test_streak_overrides_disagreeing_hash() {
        let history = [S, B, S, B, B, B, B, B, B, B];
        let result = combine(S, &history);
        assert_eq!(result, CombinedPrediction { outcome: B, confluence: Some(Confluence::StreakOverride) });
    }

    #[test]
    fn test_disagreement_without_streak_keeps_hash() {
        let result = combine(S, &ZIGZAG);
        assert_eq!(result, CombinedPrediction { outcome: S, confluence: None });

        // four-draw streak disagrees but the five-draw window is broken
        let history = [B, B, B, B, B, S, B, B, B, B];
        let result = combine(S, &history);
        assert_eq!(result, CombinedPrediction { outcome: S, confluence: None });
    }

    #[test]
    fn test_markers_differ() {
        assert_ne!(Confluence::Agreement.glyph(), Confluence::StreakOverride.glyph());
    }
}
