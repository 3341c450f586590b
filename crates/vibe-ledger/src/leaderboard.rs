use serde::{Deserialize, Serialize};

use crate::account::AccountBook;
use crate::identity::CallerId;
use crate::vibe::{VibeId, VibeStore};

/// Derived rankings over the whole ledger. Computed on demand, never
/// stored: cost is proportional to the number of accounts and vibes,
/// and callers wanting cheap repeated access cache on their side.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    /// Every materialized account, by balance descending.
    pub top_creators: Vec<(CallerId, u64)>,
    /// Every vibe, by like count descending.
    pub most_liked: Vec<(VibeId, u64)>,
    /// Every vibe, by share count descending.
    pub most_shared: Vec<(VibeId, u64)>,
}

/// Compute all three rankings from current state. Pure read.
///
/// Exact ties rank earlier-created entities first, via the creation
/// sequence baked into accounts and vibes, so repeated calls over
/// unchanged state return identical orderings.
pub fn compute(accounts: &AccountBook, vibes: &VibeStore) -> Leaderboard {
    let top_creators = rank_desc(
        accounts
            .iter()
            .map(|(id, account)| (*id, account.balance, account.created_seq))
            .collect(),
    );
    let most_liked = rank_desc(vibes.iter().map(|v| (v.id, v.likes, v.seq)).collect());
    let most_shared = rank_desc(vibes.iter().map(|v| (v.id, v.shares, v.seq)).collect());

    Leaderboard {
        top_creators,
        most_liked,
        most_shared,
    }
}

/// Sort (key, count, seq) triples by count descending, seq ascending,
/// then drop the seq. The explicit secondary key makes determinism
/// independent of map iteration order.
fn rank_desc<K>(mut entries: Vec<(K, u64, u64)>) -> Vec<(K, u64)> {
    entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    entries.into_iter().map(|(key, count, _)| (key, count)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_desc_orders_by_count_then_seq() {
        let ranked = rank_desc(vec![("c", 5, 2), ("a", 9, 0), ("b", 5, 1), ("d", 0, 3)]);
        assert_eq!(ranked, vec![("a", 9), ("b", 5), ("c", 5), ("d", 0)]);
    }

    #[test]
    fn test_empty_state_yields_empty_board() {
        let board = compute(&AccountBook::new(100), &VibeStore::new());
        assert!(board.top_creators.is_empty());
        assert!(board.most_liked.is_empty());
        assert!(board.most_shared.is_empty());
    }
}
