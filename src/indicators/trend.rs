use crate::types::Outcome;
use super::{all_equal, last_n, strictly_alternating};

pub const SUPER_TREND_WINDOW: usize = 5;
pub const HIGH_CONFIDENCE_MIN_HISTORY: usize = 10;
pub const HIGH_CONFIDENCE_WINDOW: usize = 4;

/// A five-draw streak of the same outcome.
pub fn is_super_trend(history: &[Outcome]) -> bool {
    last_n(history, SUPER_TREND_WINDOW).is_some_and(all_equal)
}

/// Streak or zig-zag continuation over the last four draws.
///
/// Needs at least ten draws of history. A four-draw streak predicts another of
/// the same; otherwise four strictly alternating draws predict the opposite of
/// the most recent one. Anything else has no opinion.
pub fn high_confidence_prediction(history: &[Outcome]) -> Option<Outcome> {
    if history.len() < HIGH_CONFIDENCE_MIN_HISTORY {
        return None;
    }
    let recent = last_n(history, HIGH_CONFIDENCE_WINDOW)?;
    let last = *recent.last()?;

    if all_equal(recent) {
        Some(last)
    } else if strictly_alternating(recent) {
        Some(last.opposite())
    } else {
        None
    }
}
