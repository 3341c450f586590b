use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::identity::CallerId;
use crate::vibe::VibeId;

/// A like or a share. Each kind has its own dedupe space: liking a vibe
/// does not consume the caller's one share of it, and vice versa.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngagementKind {
    Like,
    Share,
}

/// The set of (caller, vibe, kind) pairs already rewarded.
///
/// Pair existence is the sole gate against duplicate rewards: the
/// server enforces at-most-once here because clients only hold a
/// best-effort local cache and can (and do) retry.
#[derive(Default)]
pub struct EngagementLog {
    likes: HashMap<CallerId, HashSet<VibeId>>,
    shares: HashMap<CallerId, HashSet<VibeId>>,
}

impl EngagementLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn set_for(&self, kind: EngagementKind) -> &HashMap<CallerId, HashSet<VibeId>> {
        match kind {
            EngagementKind::Like => &self.likes,
            EngagementKind::Share => &self.shares,
        }
    }

    fn set_for_mut(&mut self, kind: EngagementKind) -> &mut HashMap<CallerId, HashSet<VibeId>> {
        match kind {
            EngagementKind::Like => &mut self.likes,
            EngagementKind::Share => &mut self.shares,
        }
    }

    /// Whether the pair already exists.
    pub fn is_recorded(&self, caller: &CallerId, kind: EngagementKind, vibe: &VibeId) -> bool {
        self.set_for(kind)
            .get(caller)
            .is_some_and(|vibes| vibes.contains(vibe))
    }

    /// Record a pair. Returns false if it was already present.
    pub fn record(&mut self, caller: CallerId, kind: EngagementKind, vibe: VibeId) -> bool {
        self.set_for_mut(kind).entry(caller).or_default().insert(vibe)
    }

    /// Drop every pair recorded for an identity, across both kinds.
    /// Called on account reset: the identity becomes eligible to engage
    /// the same vibes again.
    pub fn clear_identity(&mut self, caller: &CallerId) {
        self.likes.remove(caller);
        self.shares.remove(caller);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KAI: CallerId = CallerId([9u8; 32]);

    fn some_vibe() -> VibeId {
        let mut store = crate::vibe::VibeStore::new();
        store.mint(KAI, "x".to_string(), 0)
    }

    #[test]
    fn test_kinds_do_not_collide() {
        let mut log = EngagementLog::new();
        let vibe = some_vibe();

        assert!(log.record(KAI, EngagementKind::Like, vibe));
        assert!(!log.is_recorded(&KAI, EngagementKind::Share, &vibe));
        assert!(log.record(KAI, EngagementKind::Share, vibe));
    }

    #[test]
    fn test_duplicate_record_is_rejected() {
        let mut log = EngagementLog::new();
        let vibe = some_vibe();

        assert!(log.record(KAI, EngagementKind::Like, vibe));
        assert!(!log.record(KAI, EngagementKind::Like, vibe));
    }

    #[test]
    fn test_clear_identity_reopens_both_kinds() {
        let mut log = EngagementLog::new();
        let vibe = some_vibe();

        log.record(KAI, EngagementKind::Like, vibe);
        log.record(KAI, EngagementKind::Share, vibe);
        log.clear_identity(&KAI);

        assert!(!log.is_recorded(&KAI, EngagementKind::Like, &vibe));
        assert!(log.record(KAI, EngagementKind::Like, vibe));
        assert!(log.record(KAI, EngagementKind::Share, vibe));
    }
}
