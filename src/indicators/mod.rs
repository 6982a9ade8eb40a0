pub mod pattern;
pub mod trend;
pub mod hash;

pub use pattern::*;
pub use trend::*;
pub use hash::*;

use crate::types::Outcome;

/// The most recent `period` outcomes, or `None` when the history is shorter.
pub fn last_n(values: &[Outcome], period: usize) -> Option<&[Outcome]> {
    if period == 0 || values.len() < period {
        return None;
    }
    Some(&values[values.len() - period..])
}

pub fn all_equal(values: &[Outcome]) -> bool {
    match values.first() {
        Some(first) => values.iter().all(|v| v == first),
        None => false,
    }
}

/// True when no two adjacent outcomes are equal.
pub fn strictly_alternating(values: &[Outcome]) -> bool {
    values.len() >= 2 && values.windows(2).all(|w| w[0] != w[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use Outcome::{Big as B, Small as S};

    #[test]
    fn test_last_n() {
        let values = [B, S, S, B];
        assert_eq!(last_n(&values, 2), Some(&[S, B][..]));
        assert_eq!(last_n(&values, 4), Some(&values[..]));
        assert_eq!(last_n(&values, 5), None);
        assert_eq!(last_n(&values, 0), None);
    }

    #[test]
    fn test_window_shapes() {
        assert!(all_equal(&[S, S, S]));
        assert!(!all_equal(&[S, B]));
        assert!(!all_equal(&[]));

        assert!(strictly_alternating(&[B, S, B, S]));
        assert!(!strictly_alternating(&[B, B, S, B]));
        assert!(!strictly_alternating(&[B]));
    }
}
