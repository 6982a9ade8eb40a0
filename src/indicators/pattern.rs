use crate::types::Outcome;
use crate::types::Outcome::{Big as B, Small as S};

pub const PATTERN_LENGTH: usize = 4;

/// Known four-draw shapes, in match priority order.
pub const PATTERN_TABLE: [([Outcome; PATTERN_LENGTH], &str); 8] = [
    ([B, B, B, B], "BBBB"),
    ([S, S, S, S], "SSSS"),
    ([B, B, S, S], "BBSS"),
    ([S, S, B, B], "SSBB"),
    ([B, S, B, S], "BSBS"),
    ([S, B, S, B], "SBSB"),
    ([S, B, B, S], "SBBS"),
    ([B, S, S, B], "BSSB"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMatch {
    pub prediction: Outcome,
    pub label: &'static str,
}

/// Matches the most recent window against the pattern table.
///
/// A full window that equals a pattern predicts the pattern's first element,
/// treating the pattern as a repeating cycle. A shorter window that is a prefix
/// of a pattern predicts the element that follows the prefix. The first table
/// entry that matches wins.
pub fn match_pattern(history: &[Outcome]) -> Option<PatternMatch> {
    if history.is_empty() {
        return None;
    }

    let start = history.len().saturating_sub(PATTERN_LENGTH);
    let window = &history[start..];

    PATTERN_TABLE.iter().find_map(|(pattern, label)| {
        let prediction = if window.len() == PATTERN_LENGTH {
            (window == pattern.as_slice()).then(|| pattern[0])
        } else {
            (window == &pattern[..window.len()]).then(|| pattern[window.len()])
        }?;
        Some(PatternMatch { prediction, label })
    })
}
