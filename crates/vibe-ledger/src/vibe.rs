use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::identity::CallerId;
use crate::Tick;

type Result<T> = std::result::Result<T, LedgerError>;

/// Identifies a minted vibe. Content-derived by BLAKE3 over
/// (creator, mint sequence, content): collision-free and stable for the
/// life of the record, even when one creator mints identical content
/// twice.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VibeId([u8; 32]);

impl VibeId {
    pub fn bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for VibeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex: String = self.0.iter().take(4).map(|b| format!("{b:02x}")).collect();
        write!(f, "Vibe({hex}..)")
    }
}

impl fmt::Display for VibeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Derive a vibe id at mint time.
fn mint_id(creator: &CallerId, seq: u64, content: &str) -> VibeId {
    let mut hasher = blake3::Hasher::new();
    hasher.update(creator.bytes());
    hasher.update(&seq.to_le_bytes());
    hasher.update(content.as_bytes());
    VibeId(*hasher.finalize().as_bytes())
}

/// An immutable minted record with mutable engagement counters.
///
/// Identifier, creator, content, sequence, and creation tick are fixed
/// at mint; only the counters move, and only through the engagement
/// tracker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vibe {
    pub id: VibeId,
    pub creator: CallerId,
    /// Opaque text payload. The ledger never validates content;
    /// generation quality is the client's problem.
    pub content: String,
    pub created_at: Tick,
    /// Global mint sequence, used for creation ordering and
    /// leaderboard tie-breaking.
    pub seq: u64,
    pub likes: u64,
    pub shares: u64,
}

/// Owns every minted vibe plus a per-creator index in creation order.
#[derive(Default)]
pub struct VibeStore {
    vibes: HashMap<VibeId, Vibe>,
    by_creator: HashMap<CallerId, Vec<VibeId>>,
    next_seq: u64,
}

impl VibeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fresh vibe with zero counters. Infallible: payment and
    /// any other validation happen before the store is touched.
    pub fn mint(&mut self, creator: CallerId, content: String, now: Tick) -> VibeId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = mint_id(&creator, seq, &content);
        let vibe = Vibe {
            id,
            creator,
            content,
            created_at: now,
            seq,
            likes: 0,
            shares: 0,
        };
        self.vibes.insert(id, vibe);
        self.by_creator.entry(creator).or_default().push(id);
        id
    }

    pub fn get(&self, id: &VibeId) -> Option<&Vibe> {
        self.vibes.get(id)
    }

    /// The creator of a vibe, or `NotFound`.
    pub fn creator_of(&self, id: &VibeId) -> Result<CallerId> {
        self.vibes
            .get(id)
            .map(|v| v.creator)
            .ok_or(LedgerError::NotFound)
    }

    /// Engagement counters for a vibe, or `NotFound`.
    pub fn stats(&self, id: &VibeId) -> Result<(u64, u64)> {
        self.vibes
            .get(id)
            .map(|v| (v.likes, v.shares))
            .ok_or(LedgerError::NotFound)
    }

    /// Increment the like counter, returning the new count.
    pub fn add_like(&mut self, id: &VibeId) -> Result<u64> {
        let vibe = self.vibes.get_mut(id).ok_or(LedgerError::NotFound)?;
        vibe.likes += 1;
        Ok(vibe.likes)
    }

    /// Increment the share counter, returning the new count.
    pub fn add_share(&mut self, id: &VibeId) -> Result<u64> {
        let vibe = self.vibes.get_mut(id).ok_or(LedgerError::NotFound)?;
        vibe.shares += 1;
        Ok(vibe.shares)
    }

    /// A creator's vibes in creation order. Cloned for the wire.
    pub fn owned_by(&self, creator: &CallerId) -> Vec<Vibe> {
        self.by_creator
            .get(creator)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.vibes.get(id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Forget which vibes an identity minted. The records themselves
    /// survive with counters and creator intact; only the ownership
    /// view is cleared (account reset policy).
    pub fn clear_owner_index(&mut self, creator: &CallerId) {
        self.by_creator.remove(creator);
    }

    /// All vibes, in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Vibe> {
        self.vibes.values()
    }

    pub fn len(&self) -> usize {
        self.vibes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vibes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIN: CallerId = CallerId([1u8; 32]);
    const ODE: CallerId = CallerId([2u8; 32]);

    #[test]
    fn test_identical_content_gets_distinct_ids() {
        let mut store = VibeStore::new();
        let a = store.mint(LIN, "same words".to_string(), 10);
        let b = store.mint(LIN, "same words".to_string(), 10);
        assert_ne!(a, b);
    }

    #[test]
    fn test_mint_starts_with_zero_counters() {
        let mut store = VibeStore::new();
        let id = store.mint(LIN, "hello".to_string(), 42);
        assert_eq!(store.stats(&id).unwrap(), (0, 0));
        let vibe = store.get(&id).unwrap();
        assert_eq!(vibe.created_at, 42);
        assert_eq!(vibe.creator, LIN);
    }

    #[test]
    fn test_stats_unknown_id_is_not_found() {
        let store = VibeStore::new();
        let ghost = mint_id(&LIN, 999, "ghost");
        assert!(matches!(store.stats(&ghost), Err(LedgerError::NotFound)));
    }

    #[test]
    fn test_owned_by_preserves_creation_order() {
        let mut store = VibeStore::new();
        let first = store.mint(LIN, "one".to_string(), 1);
        store.mint(ODE, "noise".to_string(), 2);
        let second = store.mint(LIN, "two".to_string(), 3);

        let owned = store.owned_by(&LIN);
        assert_eq!(owned.len(), 2);
        assert_eq!(owned[0].id, first);
        assert_eq!(owned[1].id, second);
    }

    #[test]
    fn test_clear_owner_index_keeps_records() {
        let mut store = VibeStore::new();
        let id = store.mint(LIN, "kept".to_string(), 1);
        store.add_like(&id).unwrap();

        store.clear_owner_index(&LIN);
        assert!(store.owned_by(&LIN).is_empty());
        assert_eq!(store.stats(&id).unwrap(), (1, 0));
        assert_eq!(store.creator_of(&id).unwrap(), LIN);
    }
}
