use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },
    #[error("already engaged with this vibe")]
    AlreadyEngaged,
    #[error("vibe not found")]
    NotFound,
    #[error("stake amount must be positive")]
    InvalidAmount,
}
