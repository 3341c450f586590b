use serde::{Deserialize, Serialize};

use crate::Tick;

/// A caller's locked principal and reward accrual state.
///
/// Accrual is lazy: no background task ticks rewards forward. Between
/// two ticks `a < b`, a position earns
/// `principal * (b - a) / interval` whole tokens (integer floor).
/// Adding principal settles accrual-to-date first, so elapsed-time
/// arithmetic never applies new principal to old time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakePosition {
    /// Locked tokens, already debited from the owner's balance.
    pub principal: u64,
    /// Tick of the last principal change or claim.
    pub baseline: Tick,
    /// Rewards earned before the last principal change, not yet claimed.
    settled: u64,
}

impl StakePosition {
    /// Rewards accrued since the baseline, excluding the settled bucket.
    fn accrued(&self, now: Tick, interval: u64) -> u64 {
        let elapsed = (now - self.baseline).max(0) as u64;
        (self.principal as u128 * elapsed as u128 / interval as u128) as u64
    }

    /// Lock additional principal. Settles accrual-to-date and moves the
    /// baseline so the new principal starts earning from `now`.
    pub fn add(&mut self, amount: u64, now: Tick, interval: u64) {
        self.settled += self.accrued(now, interval);
        self.baseline = now;
        self.principal += amount;
    }

    /// Pay out everything earned so far and restart accrual from `now`.
    pub fn claim(&mut self, now: Tick, interval: u64) -> u64 {
        let reward = self.settled + self.accrued(now, interval);
        self.settled = 0;
        self.baseline = now;
        reward
    }

    /// Drop the position entirely. Unclaimed rewards are forfeited.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.principal == 0 && self.settled == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: u64 = 100;

    #[test]
    fn test_zero_elapsed_pays_nothing() {
        let mut stake = StakePosition::default();
        stake.add(50, 10, INTERVAL);
        assert_eq!(stake.claim(10, INTERVAL), 0);
    }

    #[test]
    fn test_accrual_is_proportional() {
        let mut stake = StakePosition::default();
        stake.add(200, 0, INTERVAL);
        // 200 staked for 50 ticks = 10_000 staked-token-ticks = 100 tokens
        assert_eq!(stake.claim(50, INTERVAL), 100);
        // Claim resets the baseline: another 50 ticks earns the same again
        assert_eq!(stake.claim(100, INTERVAL), 100);
    }

    #[test]
    fn test_sub_interval_accrual_floors_to_zero() {
        let mut stake = StakePosition::default();
        stake.add(10, 0, INTERVAL);
        // 10 * 9 = 90 staked-token-ticks, below one interval
        assert_eq!(stake.claim(9, INTERVAL), 0);
    }

    #[test]
    fn test_restaking_settles_earned_rewards() {
        let mut stake = StakePosition::default();
        stake.add(100, 0, INTERVAL);
        // 100 * 30 / 100 = 30 tokens earned before the top-up
        stake.add(100, 30, INTERVAL);
        assert_eq!(stake.principal, 200);
        assert_eq!(stake.baseline, 30);
        // 200 * 10 / 100 = 20 tokens after the top-up
        assert_eq!(stake.claim(40, INTERVAL), 50);
    }

    #[test]
    fn test_clear_forfeits_everything() {
        let mut stake = StakePosition::default();
        stake.add(100, 0, INTERVAL);
        stake.clear();
        assert!(stake.is_empty());
        assert_eq!(stake.claim(1000, INTERVAL), 0);
    }

    #[test]
    fn test_backwards_clock_does_not_underflow() {
        let mut stake = StakePosition::default();
        stake.add(100, 50, INTERVAL);
        assert_eq!(stake.claim(10, INTERVAL), 0);
    }
}
