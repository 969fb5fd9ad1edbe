//! Ammo and time resource ledger

use serde::{Deserialize, Serialize};

/// Per-round resources plus the session's played time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLedger {
    pub shots_left: u32,
    /// Seconds remaining in the round
    pub time_left: u32,
    /// Monotonic seconds played across the session
    pub total_time_played: u32,
    pub unlimited_ammo: bool,
    pub unlimited_time: bool,
}

impl ResourceLedger {
    pub fn new(max_ammo: u32, round_seconds: u32, unlimited_ammo: bool, unlimited_time: bool) -> Self {
        Self {
            shots_left: max_ammo,
            time_left: round_seconds,
            total_time_played: 0,
            unlimited_ammo,
            unlimited_time,
        }
    }

    pub fn has_ammo(&self) -> bool {
        self.unlimited_ammo || self.shots_left > 0
    }

    pub fn has_time(&self) -> bool {
        self.unlimited_time || self.time_left > 0
    }

    /// A shot may be taken
    pub fn can_fire(&self) -> bool {
        self.has_ammo() && self.has_time()
    }

    /// `(shots == 0 && !unlimited ammo) || (time == 0 && !unlimited time)`
    pub fn is_depleted(&self) -> bool {
        !self.has_ammo() || !self.has_time()
    }

    /// Spend one shot and credit `bonus` in the same step
    pub fn consume_shot(&mut self, bonus: u32) {
        if !self.unlimited_ammo {
            self.shots_left = self.shots_left.saturating_sub(1);
        }
        self.shots_left += bonus;
    }

    /// One second of wall clock. Played time always advances.
    pub fn tick_second(&mut self) {
        if !self.unlimited_time {
            self.time_left = self.time_left.saturating_sub(1);
        }
        self.total_time_played += 1;
    }

    /// Refill for a new round or turn
    pub fn refill(&mut self, max_ammo: u32, round_seconds: u32) {
        self.shots_left = max_ammo;
        self.time_left = round_seconds;
    }

    /// Zero everything and drop the unlimited flags
    pub fn force_empty(&mut self) {
        self.shots_left = 0;
        self.time_left = 0;
        self.unlimited_ammo = false;
        self.unlimited_time = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_with_and_without_bonus() {
        let mut ledger = ResourceLedger::new(5, 30, false, false);
        ledger.consume_shot(0);
        assert_eq!(ledger.shots_left, 4);
        ledger.consume_shot(2);
        assert_eq!(ledger.shots_left, 5);
    }

    #[test]
    fn test_consume_never_negative() {
        let mut ledger = ResourceLedger::new(0, 30, false, false);
        ledger.consume_shot(0);
        assert_eq!(ledger.shots_left, 0);
    }

    #[test]
    fn test_unlimited_ammo_does_not_consume() {
        let mut ledger = ResourceLedger::new(3, 30, true, false);
        ledger.consume_shot(0);
        assert_eq!(ledger.shots_left, 3);
    }

    #[test]
    fn test_tick_second() {
        let mut ledger = ResourceLedger::new(5, 1, false, false);
        ledger.tick_second();
        ledger.tick_second();
        assert_eq!(ledger.time_left, 0);
        assert_eq!(ledger.total_time_played, 2);

        let mut unlimited = ResourceLedger::new(5, 10, false, true);
        unlimited.tick_second();
        assert_eq!(unlimited.time_left, 10);
        assert_eq!(unlimited.total_time_played, 1);
    }

    #[test]
    fn test_depletion_predicate() {
        assert!(!ResourceLedger::new(1, 1, false, false).is_depleted());
        assert!(ResourceLedger::new(0, 1, false, false).is_depleted());
        assert!(ResourceLedger::new(1, 0, false, false).is_depleted());
        assert!(!ResourceLedger::new(0, 0, true, true).is_depleted());
        assert!(ResourceLedger::new(0, 0, true, false).is_depleted());

        let mut ledger = ResourceLedger::new(0, 0, true, true);
        ledger.force_empty();
        assert!(ledger.is_depleted());
    }
}
