use serde_json::Value;
use tracing::warn;

use crate::types::HistoryEntry;

/// Issue numbers arrive as either JSON strings or numbers.
fn issue_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn result_digit(value: &Value) -> Option<u8> {
    let n = match value {
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        Value::Number(n) => n.as_u64()?,
        _ => return None,
    };
    u8::try_from(n).ok().filter(|d| *d <= 9)
}

/// Current period from `data.issueNumber` when `data` is an object,
/// otherwise from a top-level `issueNumber`.
pub fn parse_current_period(body: &Value) -> Option<String> {
    let issue = match body.get("data") {
        Some(data) if data.is_object() => data.get("issueNumber"),
        _ => body.get("issueNumber"),
    };
    issue.and_then(issue_text)
}

/// Draws from `data.list`, reordered oldest first. Unreadable items are skipped.
pub fn parse_history(body: &Value) -> Vec<HistoryEntry> {
    let Some(items) = body.pointer("/data/list").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut history: Vec<HistoryEntry> = items
        .iter()
        .filter_map(|item| {
            let entry = item
                .get("issueNumber")
                .and_then(issue_text)
                .zip(item.get("number").and_then(result_digit))
                .and_then(|(period, result)| HistoryEntry::new(period, result));
            if entry.is_none() {
                warn!("Skipping unreadable draw: {}", item);
            }
            entry
        })
        .collect();

    // feed lists newest first
    history.reverse();
    history
}

/// Keeps only the most recent `limit` draws.
pub fn truncate_history(mut history: Vec<HistoryEntry>, limit: usize) -> Vec<HistoryEntry> {
    if history.len() > limit {
        history.drain(..history.len() - limit);
    }
    history
}

/// The period after the newest draw, when it is numeric.
pub fn next_period(history: &[HistoryEntry]) -> Option<String> {
    let last = history.last()?;
    let n: u128 = last.period.parse().ok()?;
    Some((n + 1).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Outcome;
    use serde_json::json;

    #[test]
    fn test_current_period_nested_and_flat() {
        let nested = json!({"data": {"issueNumber": "20240101100010002"}});
        assert_eq!(parse_current_period(&nested).as_deref(), Some("20240101100010002"));

        let flat = json!({"issueNumber": 20240101100010003u64});
        assert_eq!(parse_current_period(&flat).as_deref(), Some("20240101100010003"));

        let missing = json!({"data": {"list": []}});
        assert_eq!(parse_current_period(&missing), None);
        assert_eq!(parse_current_period(&json!({"data": null, "issueNumber": ""})), None);
    }

    #[test]
    fn test_data_object_without_period_ignores_top_level() {
        let body = json!({"data": {"list": []}, "issueNumber": "20240101100010004"});
        assert_eq!(parse_current_period(&body), None);

        let body = json!({"data": "n/a", "issueNumber": "20240101100010004"});
        assert_eq!(parse_current_period(&body).as_deref(), Some("20240101100010004"));
    }

    #[test]
    fn test_history_reversed_to_oldest_first() {
        let body = json!({"data": {"list": [
            {"issueNumber": "103", "number": "8"},
            {"issueNumber": "102", "number": 3},
            {"issueNumber": 101, "number": "5"},
        ]}});

        let history = parse_history(&body);
        let periods: Vec<&str> = history.iter().map(|e| e.period.as_str()).collect();
        assert_eq!(periods, vec!["101", "102", "103"]);
        assert_eq!(history[0].outcome, Outcome::Big);
        assert_eq!(history[1].outcome, Outcome::Small);
        assert_eq!(history[2].result, 8);
    }

    #[test]
    fn test_history_skips_bad_items() {
        let body = json!({"data": {"list": [
            {"issueNumber": "103", "number": "12"},
            {"issueNumber": "102"},
            {"issueNumber": "101", "number": "x"},
            {"issueNumber": "100", "number": "0"},
        ]}});

        let history = parse_history(&body);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].period, "100");
        assert!(parse_history(&json!({"code": 500})).is_empty());
    }

    #[test]
    fn test_truncate_keeps_most_recent() {
        let history: Vec<HistoryEntry> = (0..15u8)
            .map(|i| HistoryEntry::new(i.to_string(), i % 10).unwrap())
            .collect();
        let kept = truncate_history(history, 12);
        assert_eq!(kept.len(), 12);
        assert_eq!(kept[0].period, "3");
        assert_eq!(kept[11].period, "14");
    }

    #[test]
    fn test_next_period() {
        let history = vec![HistoryEntry::new("20240101100010009", 1).unwrap()];
        assert_eq!(next_period(&history).as_deref(), Some("20240101100010010"));
        assert_eq!(next_period(&[]), None);
        assert_eq!(next_period(&[HistoryEntry::new("A-1", 1).unwrap()]), None);
    }
}
