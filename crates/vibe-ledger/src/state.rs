use crate::account::AccountBook;
use crate::economy::{
    reputation_scaled, EconomyConfig, REP_LIKE_CREATOR, REP_LIKE_ENGAGER, REP_MINT,
    REP_SHARE_CREATOR, REP_SHARE_ENGAGER,
};
use crate::engagement::{EngagementKind, EngagementLog};
use crate::error::LedgerError;
use crate::identity::CallerId;
use crate::leaderboard::{self, Leaderboard};
use crate::vibe::{Vibe, VibeId, VibeStore};
use crate::Tick;

type Result<T> = std::result::Result<T, LedgerError>;

/// The whole ledger: one owned value, mutated by exactly one call at a
/// time.
///
/// The service boundary passes `&mut LedgerState` into each operation
/// for the duration of one call; no component keeps hidden state of its
/// own. Every operation validates before it mutates, so a failed call
/// leaves the state exactly as it found it.
pub struct LedgerState {
    config: EconomyConfig,
    accounts: AccountBook,
    vibes: VibeStore,
    engagements: EngagementLog,
}

impl LedgerState {
    pub fn new(config: EconomyConfig) -> Self {
        let accounts = AccountBook::new(config.initial_grant);
        Self {
            config,
            accounts,
            vibes: VibeStore::new(),
            engagements: EngagementLog::new(),
        }
    }

    pub fn config(&self) -> &EconomyConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Vibe store
    // -----------------------------------------------------------------------

    /// Charge the mint cost and store a fresh vibe. Fails with
    /// `InsufficientFunds` before anything is recorded. Content is
    /// opaque: it was produced entirely on the caller's side, and a
    /// generation failure over there never reaches this ledger.
    pub fn mint_vibe(&mut self, caller: CallerId, content: String, now: Tick) -> Result<VibeId> {
        self.accounts.debit(caller, self.config.mint_cost)?;
        let id = self.vibes.mint(caller, content, now);
        self.accounts.bump_reputation(caller, REP_MINT);
        Ok(id)
    }

    /// The caller's vibes in creation order.
    pub fn my_vibes(&self, caller: &CallerId) -> Vec<Vibe> {
        self.vibes.owned_by(caller)
    }

    /// Engagement counters for any vibe.
    pub fn vibe_stats(&self, vibe_id: &VibeId) -> Result<(u64, u64)> {
        self.vibes.stats(vibe_id)
    }

    // -----------------------------------------------------------------------
    // Engagement
    // -----------------------------------------------------------------------

    /// Like a vibe: one reward per (caller, vibe) for the lifetime of
    /// the account. Returns the new like count.
    pub fn like_vibe(&mut self, caller: CallerId, vibe_id: VibeId) -> Result<u64> {
        self.engage(caller, vibe_id, EngagementKind::Like)
    }

    /// Share a vibe. Same dedupe discipline as a like, higher rewards.
    pub fn share_vibe(&mut self, caller: CallerId, vibe_id: VibeId) -> Result<u64> {
        self.engage(caller, vibe_id, EngagementKind::Share)
    }

    fn engage(&mut self, caller: CallerId, vibe_id: VibeId, kind: EngagementKind) -> Result<u64> {
        // Validate everything up front; mutations below cannot fail.
        let creator = self.vibes.creator_of(&vibe_id)?;
        if self.engagements.is_recorded(&caller, kind, &vibe_id) {
            return Err(LedgerError::AlreadyEngaged);
        }

        let (engager_reward, creator_base, engager_rep, creator_rep) = match kind {
            EngagementKind::Like => (
                self.config.like_reward,
                self.config.like_reward_creator,
                REP_LIKE_ENGAGER,
                REP_LIKE_CREATOR,
            ),
            EngagementKind::Share => (
                self.config.share_reward,
                self.config.share_reward_creator,
                REP_SHARE_ENGAGER,
                REP_SHARE_CREATOR,
            ),
        };
        let creator_reward = reputation_scaled(creator_base, self.accounts.reputation(&creator));

        let new_count = match kind {
            EngagementKind::Like => self.vibes.add_like(&vibe_id)?,
            EngagementKind::Share => self.vibes.add_share(&vibe_id)?,
        };
        self.engagements.record(caller, kind, vibe_id);
        self.accounts.credit(caller, engager_reward);
        self.accounts.credit(creator, creator_reward);
        self.accounts.bump_reputation(caller, engager_rep);
        self.accounts.bump_reputation(creator, creator_rep);
        Ok(new_count)
    }

    // -----------------------------------------------------------------------
    // Account ledger
    // -----------------------------------------------------------------------

    pub fn balance(&self, caller: &CallerId) -> u64 {
        self.accounts.balance(caller)
    }

    pub fn reputation(&self, caller: &CallerId) -> f32 {
        self.accounts.reputation(caller)
    }

    /// Reinitialize the caller's account: initial grant back, reputation
    /// to 1.0, stake dropped, engagement pairs cleared, owned-vibe index
    /// cleared. Minted vibes and their counters survive.
    pub fn reset_account(&mut self, caller: CallerId) {
        self.accounts.reset(caller);
        self.engagements.clear_identity(&caller);
        self.vibes.clear_owner_index(&caller);
    }

    // -----------------------------------------------------------------------
    // Staking
    // -----------------------------------------------------------------------

    /// Lock tokens. The debit and the principal update happen inside
    /// one call, so the tokens are never in both places or neither.
    pub fn stake_tokens(&mut self, caller: CallerId, amount: u64, now: Tick) -> Result<()> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        self.accounts.debit(caller, amount)?;
        let interval = self.config.stake_reward_interval;
        self.accounts
            .account_mut(caller)
            .stake
            .add(amount, now, interval);
        Ok(())
    }

    /// Pay out accrued staking rewards. With nothing staked or nothing
    /// elapsed this returns `Ok(0)`: repeated claims are harmless.
    pub fn claim_staking_rewards(&mut self, caller: CallerId, now: Tick) -> Result<u64> {
        let interval = self.config.stake_reward_interval;
        let reward = self.accounts.account_mut(caller).stake.claim(now, interval);
        if reward > 0 {
            self.accounts.credit(caller, reward);
        }
        Ok(reward)
    }

    /// Currently staked principal.
    pub fn staked(&self, caller: &CallerId) -> u64 {
        self.accounts
            .get(caller)
            .map(|a| a.stake.principal)
            .unwrap_or(0)
    }

    // -----------------------------------------------------------------------
    // Leaderboard
    // -----------------------------------------------------------------------

    /// Full ranked views over accounts and vibes. Pure read.
    pub fn leaderboard(&self) -> Leaderboard {
        leaderboard::compute(&self.accounts, &self.vibes)
    }
}
