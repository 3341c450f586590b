use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::identity::CallerId;
use crate::staking::StakePosition;

type Result<T> = std::result::Result<T, LedgerError>;

/// Per-identity ledger entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Spendable tokens. Never negative: debits are checked.
    pub balance: u64,
    /// Positive multiplier, starts at 1.0, never decreased by engagement.
    pub reputation: f32,
    /// Locked stake and accrual state.
    pub stake: StakePosition,
    /// Insertion sequence, assigned at lazy creation. Used for
    /// deterministic leaderboard tie-breaking; survives reset.
    pub created_seq: u64,
}

impl Account {
    fn new(initial_grant: u64, created_seq: u64) -> Self {
        Self {
            balance: initial_grant,
            reputation: 1.0,
            stake: StakePosition::default(),
            created_seq,
        }
    }
}

/// Owns every account. Accounts are created lazily on first touch, so
/// balance and reputation reads never fail for unseen identities.
pub struct AccountBook {
    accounts: HashMap<CallerId, Account>,
    next_seq: u64,
    initial_grant: u64,
}

impl AccountBook {
    pub fn new(initial_grant: u64) -> Self {
        Self {
            accounts: HashMap::new(),
            next_seq: 0,
            initial_grant,
        }
    }

    /// Get-or-default-insert. The only place accounts are created.
    pub fn account_mut(&mut self, id: CallerId) -> &mut Account {
        let Self {
            accounts,
            next_seq,
            initial_grant,
        } = self;
        accounts.entry(id).or_insert_with(|| {
            let account = Account::new(*initial_grant, *next_seq);
            *next_seq += 1;
            account
        })
    }

    /// Read-only lookup without creation.
    pub fn get(&self, id: &CallerId) -> Option<&Account> {
        self.accounts.get(id)
    }

    /// Read-only balance. Unseen identities read as the initial grant
    /// without creating an account.
    pub fn balance(&self, id: &CallerId) -> u64 {
        self.accounts
            .get(id)
            .map(|a| a.balance)
            .unwrap_or(self.initial_grant)
    }

    /// Read-only reputation. Unseen identities read as 1.0.
    pub fn reputation(&self, id: &CallerId) -> f32 {
        self.accounts.get(id).map(|a| a.reputation).unwrap_or(1.0)
    }

    /// Add tokens. Saturates rather than wrapping at the u64 ceiling.
    pub fn credit(&mut self, id: CallerId, amount: u64) {
        let account = self.account_mut(id);
        account.balance = account.balance.saturating_add(amount);
    }

    /// Remove tokens, failing the whole call if the balance is short.
    /// A failed debit leaves no trace: the account is only materialized
    /// on success.
    pub fn debit(&mut self, id: CallerId, amount: u64) -> Result<()> {
        let available = self.balance(&id);
        let remaining =
            available
                .checked_sub(amount)
                .ok_or(LedgerError::InsufficientFunds {
                    needed: amount,
                    available,
                })?;
        self.account_mut(id).balance = remaining;
        Ok(())
    }

    /// Raise reputation by a fixed increment. Increments are always
    /// positive, so reputation is monotone in engagement.
    pub fn bump_reputation(&mut self, id: CallerId, delta: f32) {
        let account = self.account_mut(id);
        account.reputation += delta;
    }

    /// Reinitialize an account to defaults. The creation sequence is
    /// kept so leaderboard tie-breaking stays stable across resets.
    pub fn reset(&mut self, id: CallerId) {
        let initial_grant = self.initial_grant;
        let account = self.account_mut(id);
        account.balance = initial_grant;
        account.reputation = 1.0;
        account.stake.clear();
    }

    /// All materialized accounts, in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&CallerId, &Account)> {
        self.accounts.iter()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
