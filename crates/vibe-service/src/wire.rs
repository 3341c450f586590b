//! The fixed request/response contract.
//!
//! Caller identity is deliberately absent from [`Request`]: it is
//! derived from the authenticated channel by the boundary, which is the
//! only authorization mechanism. A caller can never name another
//! account.

use serde::{Deserialize, Serialize};

use vibe_ledger::{Leaderboard, Vibe, VibeId};

/// Calls accepted by the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Request {
    MintVibe { content: String },
    LikeVibe { vibe_id: VibeId },
    ShareVibe { vibe_id: VibeId },
    GetMyVibes,
    GetMyBalance,
    GetMyReputation,
    GetVibeStats { vibe_id: VibeId },
    GetLeaderboard,
    StakeTokens { amount: u64 },
    ClaimStakingRewards,
    ResetAccount,
}

impl Request {
    /// Whether this call mutates ledger state.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Request::MintVibe { .. }
                | Request::LikeVibe { .. }
                | Request::ShareVibe { .. }
                | Request::StakeTokens { .. }
                | Request::ClaimStakingRewards
                | Request::ResetAccount
        )
    }

    /// Wire method name, for logging.
    pub fn method(&self) -> &'static str {
        match self {
            Request::MintVibe { .. } => "mint_vibe",
            Request::LikeVibe { .. } => "like_vibe",
            Request::ShareVibe { .. } => "share_vibe",
            Request::GetMyVibes => "get_my_vibes",
            Request::GetMyBalance => "get_my_balance",
            Request::GetMyReputation => "get_my_reputation",
            Request::GetVibeStats { .. } => "get_vibe_stats",
            Request::GetLeaderboard => "get_leaderboard",
            Request::StakeTokens { .. } => "stake_tokens",
            Request::ClaimStakingRewards => "claim_staking_rewards",
            Request::ResetAccount => "reset_account",
        }
    }

    /// Serialize to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        postcard::to_allocvec(self)
    }

    /// Deserialize from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, postcard::Error> {
        postcard::from_bytes(data)
    }
}

/// Results returned by the ledger, one variant per method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Response {
    Minted { vibe_id: VibeId },
    LikeCount(u64),
    ShareCount(u64),
    Vibes(Vec<Vibe>),
    Balance(u64),
    Reputation(f32),
    VibeStats { likes: u64, shares: u64 },
    Board(Leaderboard),
    Staked,
    RewardsClaimed(u64),
    AccountReset,
}

impl Response {
    /// Serialize to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        postcard::to_allocvec(self)
    }

    /// Deserialize from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, postcard::Error> {
        postcard::from_bytes(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_round_trip() {
        let request = Request::MintVibe {
            content: "wire check".to_string(),
        };
        let bytes = request.to_bytes().unwrap();
        let decoded = Request::from_bytes(&bytes).unwrap();
        assert!(matches!(decoded, Request::MintVibe { content } if content == "wire check"));
    }

    #[test]
    fn test_response_round_trip() {
        let response = Response::VibeStats {
            likes: 3,
            shares: 1,
        };
        let bytes = response.to_bytes().unwrap();
        let decoded = Response::from_bytes(&bytes).unwrap();
        assert!(matches!(
            decoded,
            Response::VibeStats { likes: 3, shares: 1 }
        ));
    }

    #[test]
    fn test_mutating_split_matches_contract() {
        assert!(Request::ResetAccount.is_mutating());
        assert!(Request::StakeTokens { amount: 1 }.is_mutating());
        assert!(!Request::GetLeaderboard.is_mutating());
        assert!(!Request::GetMyBalance.is_mutating());
    }
}
