//! Economic knobs and reward arithmetic.
//!
//! Every token amount the ledger mints, charges, or pays out comes from
//! an [`EconomyConfig`]. Defaults match the production deployment.

/// Reputation increment for minting a vibe.
pub const REP_MINT: f32 = 0.10;
/// Reputation increments for a like (engager / creator).
pub const REP_LIKE_ENGAGER: f32 = 0.01;
pub const REP_LIKE_CREATOR: f32 = 0.05;
/// Reputation increments for a share (engager / creator).
pub const REP_SHARE_ENGAGER: f32 = 0.02;
pub const REP_SHARE_CREATOR: f32 = 0.10;

/// Token economics for one ledger instance.
#[derive(Debug, Clone)]
pub struct EconomyConfig {
    /// Balance granted to an account on first touch and on reset.
    pub initial_grant: u64,
    /// Tokens debited from the creator per mint.
    pub mint_cost: u64,
    /// Flat reward paid to the caller who likes a vibe.
    pub like_reward: u64,
    /// Base reward paid to the vibe's creator per like, scaled by the
    /// creator's reputation.
    pub like_reward_creator: u64,
    /// Flat reward paid to the caller who shares a vibe. Strictly
    /// greater than `like_reward`: a share carries the vibe further.
    pub share_reward: u64,
    /// Base reward paid to the vibe's creator per share, scaled by the
    /// creator's reputation.
    pub share_reward_creator: u64,
    /// Staked-token-ticks required to accrue one reward token.
    pub stake_reward_interval: u64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            initial_grant: 100,
            mint_cost: 5,
            like_reward: 1,
            like_reward_creator: 2,
            share_reward: 2,
            share_reward_creator: 3,
            stake_reward_interval: 100,
        }
    }
}

impl EconomyConfig {
    /// Set the initial grant.
    pub fn with_initial_grant(mut self, amount: u64) -> Self {
        self.initial_grant = amount;
        self
    }

    /// Set the mint cost.
    pub fn with_mint_cost(mut self, amount: u64) -> Self {
        self.mint_cost = amount;
        self
    }

    /// Set the engager-side like and share rewards.
    pub fn with_engagement_rewards(mut self, like: u64, share: u64) -> Self {
        self.like_reward = like;
        self.share_reward = share;
        self
    }

    /// Set the creator-side like and share rewards.
    pub fn with_creator_rewards(mut self, like: u64, share: u64) -> Self {
        self.like_reward_creator = like;
        self.share_reward_creator = share;
        self
    }

    /// Set the staking accrual interval.
    pub fn with_stake_reward_interval(mut self, ticks: u64) -> Self {
        self.stake_reward_interval = ticks;
        self
    }
}

/// Scale a base reward by a reputation multiplier, flooring to whole
/// tokens. Reputation is always >= 1.0, so this never pays less than
/// the base.
pub fn reputation_scaled(base: u64, reputation: f32) -> u64 {
    (base as f32 * reputation) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_keep_share_above_like() {
        let config = EconomyConfig::default();
        assert!(config.share_reward > config.like_reward);
        assert!(config.share_reward_creator > config.like_reward_creator);
    }

    #[test]
    fn test_reputation_scaling_floors() {
        assert_eq!(reputation_scaled(2, 1.0), 2);
        assert_eq!(reputation_scaled(2, 1.4), 2);
        assert_eq!(reputation_scaled(2, 1.5), 3);
        assert_eq!(reputation_scaled(3, 2.0), 6);
    }

    #[test]
    fn test_builder_chain() {
        let config = EconomyConfig::default()
            .with_initial_grant(50)
            .with_mint_cost(10)
            .with_stake_reward_interval(20);
        assert_eq!(config.initial_grant, 50);
        assert_eq!(config.mint_cost, 10);
        assert_eq!(config.stake_reward_interval, 20);
    }
}
