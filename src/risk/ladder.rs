use serde::Serialize;

use crate::config::LadderSettings;

/// Fixed stake progression indexed by level, starting at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BettingLadder {
    sequence: Vec<u64>,
}

impl BettingLadder {
    pub fn new(sequence: Vec<u64>) -> Self {
        Self { sequence }
    }

    pub fn from_settings(settings: &LadderSettings) -> Self {
        Self::new(settings.sequence.clone())
    }

    pub fn max_level(&self) -> usize {
        self.sequence.len()
    }

    /// Multiplier for `level`. Levels outside the ladder stake 1.
    pub fn stake_for_level(&self, level: usize) -> u64 {
        if self.contains(level) {
            self.sequence[level - 1]
        } else {
            1
        }
    }

    fn contains(&self, level: usize) -> bool {
        level >= 1 && level <= self.max_level()
    }

    /// Level to play after a lost round. Losing at the top restarts the ladder;
    /// a level below the ladder is played as level 1.
    pub fn next_level_after_loss(&self, level: usize) -> usize {
        if level >= self.max_level() {
            return 1;
        }
        let level = if self.contains(level) { level } else { 1 };
        level + 1
    }

    pub fn levels(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.sequence.iter().enumerate().map(|(i, stake)| (i + 1, *stake))
    }
}

impl Default for BettingLadder {
    fn default() -> Self {
        Self::from_settings(&LadderSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stake_for_level() {
        let ladder = BettingLadder::default();
        assert_eq!(ladder.max_level(), 6);
        assert_eq!(ladder.stake_for_level(1), 1);
        assert_eq!(ladder.stake_for_level(4), 8);
        assert_eq!(ladder.stake_for_level(6), 32);
    }

    #[test]
    fn test_out_of_range_levels_stake_one() {
        let ladder = BettingLadder::default();
        assert_eq!(ladder.stake_for_level(0), 1);
        assert_eq!(ladder.stake_for_level(7), 1);
        assert_eq!(ladder.stake_for_level(usize::MAX), 1);
    }

    #[test]
    fn test_next_level_after_loss_wraps_at_top() {
        let ladder = BettingLadder::new(vec![1, 3, 9]);
        assert_eq!(ladder.next_level_after_loss(1), 2);
        assert_eq!(ladder.next_level_after_loss(2), 3);
        assert_eq!(ladder.next_level_after_loss(3), 1);
        assert_eq!(ladder.next_level_after_loss(10), 1);
    }

    #[test]
    fn test_loss_at_level_zero_counts_as_level_one() {
        let ladder = BettingLadder::new(vec![1, 3, 9]);
        assert_eq!(ladder.next_level_after_loss(0), ladder.next_level_after_loss(1));
        assert_eq!(ladder.next_level_after_loss(0), 2);
    }
}
