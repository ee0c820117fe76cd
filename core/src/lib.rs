//! Lucete reward-ladder core.
//!
//! The VIP reward ladder of the Lucete portal: an immutable reward table
//! generated from configuration, user wallets tracking unlock and claim
//! progress, and session-scoped transitions that persist through a
//! pluggable profile store.
//!
//! The primary entrypoint is [`session::LadderSession`].

pub mod classify;
pub mod config;
pub mod error;
pub mod session;
pub mod store;
pub mod table;
pub mod transition;
pub mod types;
pub mod wallet;

pub use classify::{classify, progress, summarize, LadderSummary, LevelState};
pub use config::{LadderConfig, MilestoneBonus};
pub use error::{LadderError, LadderResult};
pub use session::LadderSession;
pub use store::{ProfileStore, SqliteProfileStore};
pub use table::{PrimaryReward, RewardKind, RewardLevel, RewardTable, SecondaryReward};
pub use types::{Level, UserId};
pub use wallet::{UserWallet, WalletPatch};
