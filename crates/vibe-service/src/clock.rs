//! Tick sources for the dispatch loop.
//!
//! The ledger core never reads a wall clock; every operation takes an
//! injected tick. In production that tick is wall-clock seconds, in
//! tests a hand-advanced counter.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use vibe_ledger::Tick;

/// Source of the tick stamped onto each dispatched call.
pub trait Clock: Send + 'static {
    fn now(&self) -> Tick;
}

/// Wall-clock seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Tick {
        chrono::Utc::now().timestamp()
    }
}

/// Hand-advanced clock for tests. Clones share the same instant.
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Arc<AtomicI64>);

impl ManualClock {
    pub fn new(start: Tick) -> Self {
        Self(Arc::new(AtomicI64::new(start)))
    }

    pub fn set(&self, tick: Tick) {
        self.0.store(tick, Ordering::SeqCst);
    }

    pub fn advance(&self, ticks: i64) {
        self.0.fetch_add(ticks, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Tick {
        self.0.load(Ordering::SeqCst)
    }
}
