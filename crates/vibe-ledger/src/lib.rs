pub mod account;
pub mod economy;
pub mod engagement;
pub mod error;
pub mod identity;
pub mod leaderboard;
pub mod staking;
pub mod state;
pub mod vibe;

/// Logical clock value. The ledger never reads a wall clock itself;
/// the service boundary stamps every call with the current tick.
pub type Tick = i64;

pub use account::{Account, AccountBook};
pub use economy::{reputation_scaled, EconomyConfig};
pub use engagement::{EngagementKind, EngagementLog};
pub use error::LedgerError;
pub use identity::CallerId;
pub use leaderboard::Leaderboard;
pub use staking::StakePosition;
pub use state::LedgerState;
pub use vibe::{Vibe, VibeId, VibeStore};
