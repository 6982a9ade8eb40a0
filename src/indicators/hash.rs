use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::config::SaltSettings;
use crate::types::{Outcome, Platform};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HashPrediction {
    pub outcome: Outcome,
    pub digit: u8,
}

/// Deterministic prediction from `SHA-256(period + salt)`.
///
/// The same period and platform always produce the same prediction.
#[derive(Debug, Clone)]
pub struct HashPredictor {
    salts: SaltSettings,
}

impl HashPredictor {
    pub fn new(salts: SaltSettings) -> Self {
        Self { salts }
    }

    pub fn salt(&self, platform: Platform) -> &str {
        self.salts.for_platform(platform)
    }

    pub fn predict(&self, period: &str, platform: Platform) -> HashPrediction {
        let digit = select_digit(&digest_text(period, self.salt(platform)));

        HashPrediction {
            outcome: if digit > 4 { Outcome::Big } else { Outcome::Small },
            digit,
        }
    }
}

impl Default for HashPredictor {
    fn default() -> Self {
        Self::new(SaltSettings::default())
    }
}

/// Lowercase hex SHA-256 of the period followed by the salt.
pub fn digest_text(period: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(period.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

/// Last decimal digit of the digest text, scanning from the end. Hex letters
/// are skipped; a digest without digits yields 0.
pub fn select_digit(digest: &str) -> u8 {
    digest
        .chars()
        .rev()
        .find_map(|c| c.to_digit(10))
        .map(|d| d as u8)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_matches_concatenation() {
        assert_eq!(
            digest_text("123456", "ar-lottery-v5-plus"),
            "b60c424d309f2dc4ba0e21c6385a96286d5c1af692f7d661100bb137bd7e7380"
        );
    }

    #[test]
    fn test_select_digit_scans_from_end() {
        assert_eq!(select_digit("12ab7cdef"), 7);
        assert_eq!(select_digit("9abcdef"), 9);
        assert_eq!(select_digit("abcdef"), 0);
        assert_eq!(select_digit("0000"), 0);
    }

    #[test]
    fn test_known_predictions_per_platform() {
        let predictor = HashPredictor::default();

        let primary = predictor.predict("20240101100010001", Platform::Primary);
        assert_eq!(primary, HashPrediction { outcome: Outcome::Big, digit: 7 });

        let alternate = predictor.predict("20240101100010001", Platform::Alternate);
        assert_eq!(alternate, HashPrediction { outcome: Outcome::Small, digit: 1 });

        let alternate = predictor.predict("123456", Platform::Alternate);
        assert_eq!(alternate, HashPrediction { outcome: Outcome::Small, digit: 4 });
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let predictor = HashPredictor::default();
        let first = predictor.predict("123456", Platform::Primary);
        let second = predictor.predict("123456", Platform::Primary);

        assert_eq!(first, second);
        assert!(first.digit <= 9);
        assert_eq!(first, HashPrediction { outcome: Outcome::Small, digit: 0 });
    }

    #[test]
    fn test_blank_period_is_hashed_like_any_text() {
        let predictor = HashPredictor::default();
        assert_eq!(
            digest_text("", "gods_plan"),
            "6490478356ab1862bbec5c19d930e20536e38cce43e81089d341ac74bfc772f3"
        );
        assert_eq!(
            predictor.predict("", Platform::Alternate),
            HashPrediction { outcome: Outcome::Small, digit: 3 }
        );
        assert_eq!(
            predictor.predict("  ", Platform::Alternate),
            HashPrediction { outcome: Outcome::Small, digit: 3 }
        );
    }

    #[test]
    fn test_salt_selection() {
        let predictor = HashPredictor::new(SaltSettings {
            primary: "one".to_string(),
            alternate: "two".to_string(),
        });
        assert_eq!(predictor.salt(Platform::Primary), "one");
        assert_eq!(predictor.salt(Platform::Alternate), "two");
    }
}
