use crate::types::{Level, UserId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LadderError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Wallet write failed: {reason}")]
    StoreWrite { reason: String },

    #[error("Level {level} is outside the reward table (1..={max})")]
    UnknownLevel { level: Level, max: Level },

    #[error("Insufficient diamonds for level {level}: cost {cost}, have {available}")]
    InsufficientFunds {
        level: Level,
        cost: u64,
        available: u64,
    },

    #[error("Level {level} is already unlocked")]
    AlreadyUnlocked { level: Level },

    #[error("Level {level} is not unlocked")]
    NotUnlocked { level: Level },

    #[error("Level {level} has already been claimed")]
    AlreadyClaimed { level: Level },

    #[error("No wallet for user '{user_id}'")]
    WalletNotFound { user_id: UserId },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LadderError {
    /// Idempotency guards: the action already happened, nothing was charged
    /// or credited twice. The UI reports these as notices, not failures.
    pub fn is_benign_noop(&self) -> bool {
        matches!(
            self,
            LadderError::AlreadyUnlocked { .. } | LadderError::AlreadyClaimed { .. }
        )
    }

    /// Transient store failures. The in-memory wallet is unchanged and the
    /// caller may retry the whole transition.
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            LadderError::Database(_)
                | LadderError::Serialization(_)
                | LadderError::StoreWrite { .. }
        )
    }
}

pub type LadderResult<T> = Result<T, LadderError>;
