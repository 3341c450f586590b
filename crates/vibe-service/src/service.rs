//! The serialized dispatcher.
//!
//! One task owns the [`LedgerState`]. Calls arrive as envelopes on an
//! mpsc queue and are executed one at a time, each to completion, so a
//! like and a concurrent second like from the same identity can never
//! both observe "not yet engaged": the second strictly follows the
//! first. There is no cancellation once a call is queued; each call
//! either fully succeeds or fully fails with no side effects.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use vibe_ledger::{
    CallerId, EconomyConfig, Leaderboard, LedgerError, LedgerState, Tick, Vibe, VibeId,
};

use crate::clock::Clock;
use crate::error::{ServiceError, ServiceResult};
use crate::wire::{Request, Response};

/// Pending calls allowed in the queue before senders wait.
const DEFAULT_QUEUE_DEPTH: usize = 256;

struct Envelope {
    caller: CallerId,
    request: Request,
    reply: oneshot::Sender<Result<Response, LedgerError>>,
}

/// Owns the dispatch task. [`VibeService::shutdown`] stops the task;
/// the call currently executing finishes first, queued calls are
/// answered with a channel error on the client side.
pub struct VibeService {
    tx: mpsc::Sender<Envelope>,
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl VibeService {
    /// Start the dispatch task over a fresh ledger.
    pub fn spawn(config: EconomyConfig, clock: impl Clock) -> Self {
        let (tx, rx) = mpsc::channel(DEFAULT_QUEUE_DEPTH);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let state = LedgerState::new(config);
        let task = tokio::spawn(dispatch_loop(state, clock, rx, shutdown_rx));
        info!("vibe service started");
        Self { tx, shutdown_tx, task }
    }

    /// Bind a client handle to an authenticated caller identity. The
    /// handle is the only place identity enters the system.
    pub fn connect(&self, caller: CallerId) -> ServiceHandle {
        ServiceHandle {
            caller,
            tx: self.tx.clone(),
        }
    }

    /// Stop the dispatch task and wait for it to exit. Outstanding
    /// handles keep working until this is called, regardless of how
    /// many clones exist.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.task.await {
            warn!("dispatch task ended abnormally: {e}");
        }
    }
}

async fn dispatch_loop(
    mut state: LedgerState,
    clock: impl Clock,
    mut rx: mpsc::Receiver<Envelope>,
    mut shutdown: oneshot::Receiver<()>,
) {
    loop {
        let envelope = tokio::select! {
            _ = &mut shutdown => break,
            received = rx.recv() => match received {
                Some(envelope) => envelope,
                None => break,
            },
        };
        let now = clock.now();
        let method = envelope.request.method();
        let result = dispatch(&mut state, envelope.caller, envelope.request, now);
        match &result {
            Ok(_) => debug!(caller = %envelope.caller, method, tick = now, "dispatched"),
            Err(e) => debug!(caller = %envelope.caller, method, tick = now, error = %e, "rejected"),
        }
        if envelope.reply.send(result).is_err() {
            // Caller hung up; the call already took effect.
            warn!(method, "reply dropped");
        }
    }
    debug!("dispatch queue closed");
}

/// Execute one call against the ledger. Exposed for direct use in
/// tests and embeddings that bring their own serialization discipline.
pub fn dispatch(
    state: &mut LedgerState,
    caller: CallerId,
    request: Request,
    now: Tick,
) -> Result<Response, LedgerError> {
    match request {
        Request::MintVibe { content } => state
            .mint_vibe(caller, content, now)
            .map(|vibe_id| Response::Minted { vibe_id }),
        Request::LikeVibe { vibe_id } => {
            state.like_vibe(caller, vibe_id).map(Response::LikeCount)
        }
        Request::ShareVibe { vibe_id } => {
            state.share_vibe(caller, vibe_id).map(Response::ShareCount)
        }
        Request::GetMyVibes => Ok(Response::Vibes(state.my_vibes(&caller))),
        Request::GetMyBalance => Ok(Response::Balance(state.balance(&caller))),
        Request::GetMyReputation => Ok(Response::Reputation(state.reputation(&caller))),
        Request::GetVibeStats { vibe_id } => state
            .vibe_stats(&vibe_id)
            .map(|(likes, shares)| Response::VibeStats { likes, shares }),
        Request::GetLeaderboard => Ok(Response::Board(state.leaderboard())),
        Request::StakeTokens { amount } => state
            .stake_tokens(caller, amount, now)
            .map(|()| Response::Staked),
        Request::ClaimStakingRewards => state
            .claim_staking_rewards(caller, now)
            .map(Response::RewardsClaimed),
        Request::ResetAccount => {
            state.reset_account(caller);
            Ok(Response::AccountReset)
        }
    }
}

/// A client's connection to the service, bound to one caller identity.
/// Cheap to clone; clones share the queue and the identity.
#[derive(Clone)]
pub struct ServiceHandle {
    caller: CallerId,
    tx: mpsc::Sender<Envelope>,
}

impl ServiceHandle {
    /// The identity this handle is bound to.
    pub fn caller(&self) -> &CallerId {
        &self.caller
    }

    async fn call(&self, request: Request) -> ServiceResult<Response> {
        let (reply, rx) = oneshot::channel();
        let envelope = Envelope {
            caller: self.caller,
            request,
            reply,
        };
        self.tx
            .send(envelope)
            .await
            .map_err(|_| ServiceError::Channel("dispatch queue closed".to_string()))?;
        let result = rx
            .await
            .map_err(|_| ServiceError::Channel("dispatch task dropped the call".to_string()))?;
        Ok(result?)
    }

    /// Mint a vibe from already-produced content.
    pub async fn mint_vibe(&self, content: impl Into<String>) -> ServiceResult<VibeId> {
        match self
            .call(Request::MintVibe {
                content: content.into(),
            })
            .await?
        {
            Response::Minted { vibe_id } => Ok(vibe_id),
            _ => Err(ServiceError::UnexpectedResponse),
        }
    }

    /// Like a vibe, returning its new like count.
    pub async fn like_vibe(&self, vibe_id: VibeId) -> ServiceResult<u64> {
        match self.call(Request::LikeVibe { vibe_id }).await? {
            Response::LikeCount(count) => Ok(count),
            _ => Err(ServiceError::UnexpectedResponse),
        }
    }

    /// Share a vibe, returning its new share count.
    pub async fn share_vibe(&self, vibe_id: VibeId) -> ServiceResult<u64> {
        match self.call(Request::ShareVibe { vibe_id }).await? {
            Response::ShareCount(count) => Ok(count),
            _ => Err(ServiceError::UnexpectedResponse),
        }
    }

    /// The caller's vibes in creation order.
    pub async fn my_vibes(&self) -> ServiceResult<Vec<Vibe>> {
        match self.call(Request::GetMyVibes).await? {
            Response::Vibes(vibes) => Ok(vibes),
            _ => Err(ServiceError::UnexpectedResponse),
        }
    }

    pub async fn balance(&self) -> ServiceResult<u64> {
        match self.call(Request::GetMyBalance).await? {
            Response::Balance(balance) => Ok(balance),
            _ => Err(ServiceError::UnexpectedResponse),
        }
    }

    pub async fn reputation(&self) -> ServiceResult<f32> {
        match self.call(Request::GetMyReputation).await? {
            Response::Reputation(reputation) => Ok(reputation),
            _ => Err(ServiceError::UnexpectedResponse),
        }
    }

    /// Like and share counters for any vibe.
    pub async fn vibe_stats(&self, vibe_id: VibeId) -> ServiceResult<(u64, u64)> {
        match self.call(Request::GetVibeStats { vibe_id }).await? {
            Response::VibeStats { likes, shares } => Ok((likes, shares)),
            _ => Err(ServiceError::UnexpectedResponse),
        }
    }

    /// Full ranked views over the whole ledger.
    pub async fn leaderboard(&self) -> ServiceResult<Leaderboard> {
        match self.call(Request::GetLeaderboard).await? {
            Response::Board(board) => Ok(board),
            _ => Err(ServiceError::UnexpectedResponse),
        }
    }

    /// Lock tokens for staking.
    pub async fn stake_tokens(&self, amount: u64) -> ServiceResult<()> {
        match self.call(Request::StakeTokens { amount }).await? {
            Response::Staked => Ok(()),
            _ => Err(ServiceError::UnexpectedResponse),
        }
    }

    /// Claim accrued staking rewards, returning the amount credited.
    pub async fn claim_staking_rewards(&self) -> ServiceResult<u64> {
        match self.call(Request::ClaimStakingRewards).await? {
            Response::RewardsClaimed(amount) => Ok(amount),
            _ => Err(ServiceError::UnexpectedResponse),
        }
    }

    /// Reinitialize the caller's own account. Never anyone else's.
    pub async fn reset_account(&self) -> ServiceResult<()> {
        match self.call(Request::ResetAccount).await? {
            Response::AccountReset => Ok(()),
            _ => Err(ServiceError::UnexpectedResponse),
        }
    }
}
