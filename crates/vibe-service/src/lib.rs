//! # Vibe Service
//!
//! The service boundary in front of [`vibe_ledger`]: one dispatch task
//! owns the whole [`LedgerState`](vibe_ledger::LedgerState) and
//! processes every call to completion before starting the next, so two
//! calls can never interleave their effects. Client handles are bound
//! to one authenticated caller identity each; the identity travels on
//! the channel, never inside a request payload.
//!
//! ## Example
//!
//! ```rust,ignore
//! use vibe_service::{VibeService, SystemClock};
//! use vibe_ledger::{CallerId, EconomyConfig};
//!
//! let service = VibeService::spawn(EconomyConfig::default(), SystemClock);
//! let client = service.connect(CallerId([7u8; 32]));
//!
//! let vibe_id = client.mint_vibe("fresh words").await?;
//! let likes = client.like_vibe(vibe_id).await?;
//! ```

mod clock;
mod error;
mod service;
mod wire;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ServiceError, ServiceResult};
pub use service::{dispatch, ServiceHandle, VibeService};
pub use wire::{Request, Response};
