use serde::{Deserialize, Serialize};

use super::Outcome;

/// One completed draw as reported by the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub period: String,
    pub result: u8,
    pub outcome: Outcome,
}

impl HistoryEntry {
    /// Returns `None` when `result` is not a single decimal digit.
    pub fn new(period: impl Into<String>, result: u8) -> Option<Self> {
        if result > 9 {
            return None;
        }
        Some(Self {
            period: period.into(),
            result,
            outcome: Outcome::classify(result),
        })
    }
}

/// Outcomes of a chronologically ordered history, oldest first.
pub fn outcomes(history: &[HistoryEntry]) -> Vec<Outcome> {
    history.iter().map(|e| e.outcome).collect()
}

/// Builds a synthetic history from outcomes. Periods count up from 1.
#[cfg(test)]
pub fn history_from(outcomes: &[Outcome]) -> Vec<HistoryEntry> {
    outcomes
        .iter()
        .enumerate()
        .map(|(i, o)| HistoryEntry {
            period: (i + 1).to_string(),
            result: if *o == Outcome::Big { 7 } else { 2 },
            outcome: *o,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_classifies_result() {
        let entry = HistoryEntry::new("20240101001", 5).unwrap();
        assert_eq!(entry.outcome, Outcome::Big);
        assert_eq!(HistoryEntry::new("20240101002", 4).unwrap().outcome, Outcome::Small);
        assert!(HistoryEntry::new("20240101003", 10).is_none());
    }
}
