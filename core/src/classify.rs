//! Level-state classification.
//!
//! Two views of the same progress: `progress` reads the wallet alone and
//! reports the coarse stored state (locked / unlocked / claimed), while
//! `classify` also consults the reward table and splits the locked bucket
//! by affordability. A classified level is never plain `Locked`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::table::{RewardLevel, RewardTable};
use crate::types::Level;
use crate::wallet::UserWallet;

/// Where a level sits in the unlock-then-claim lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelState {
    /// Not unlocked; affordability not evaluated.
    Locked,
    /// Not unlocked, and the user holds enough diamonds to unlock it.
    Unlockable,
    /// Not unlocked, and the user cannot cover the unlock cost.
    Unaffordable,
    /// Unlocked, rewards still waiting to be claimed.
    Unlocked,
    /// Unlocked and rewards collected. Terminal.
    Claimed,
}

impl LevelState {
    pub fn is_locked(&self) -> bool {
        matches!(
            self,
            LevelState::Locked | LevelState::Unlockable | LevelState::Unaffordable
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, LevelState::Claimed)
    }
}

impl fmt::Display for LevelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LevelState::Locked => "locked",
            LevelState::Unlockable => "unlockable",
            LevelState::Unaffordable => "unaffordable",
            LevelState::Unlocked => "unlocked",
            LevelState::Claimed => "claimed",
        };
        write!(f, "{label}")
    }
}

/// Coarse state from the wallet alone: claimed beats unlocked beats locked.
pub fn progress(level: Level, wallet: &UserWallet) -> LevelState {
    if wallet.has_claimed(level) {
        LevelState::Claimed
    } else if wallet.has_unlocked(level) {
        LevelState::Unlocked
    } else {
        LevelState::Locked
    }
}

/// Full state for a table row, refining `Locked` by whether the wallet's
/// diamond balance covers the unlock cost. Equality counts as affordable.
pub fn classify(entry: &RewardLevel, wallet: &UserWallet) -> LevelState {
    match progress(entry.level, wallet) {
        LevelState::Locked => {
            if wallet.diamonds >= entry.unlock_cost {
                LevelState::Unlockable
            } else {
                LevelState::Unaffordable
            }
        }
        state => state,
    }
}

/// Aggregate ladder position for one wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LadderSummary {
    pub level_count:     u32,
    pub unlocked:        u32,
    pub claimed:         u32,
    pub diamonds_spent:  u64,
    pub next_affordable: Option<Level>,
    pub claimable:       Vec<Level>,
}

/// Walk the whole table once and fold per-level states into a summary.
/// Claimed levels count as unlocked; `claimable` lists unlocked levels
/// whose rewards are still pending, ascending.
pub fn summarize(table: &RewardTable, wallet: &UserWallet) -> LadderSummary {
    let mut summary = LadderSummary {
        level_count:     table.max_level(),
        unlocked:        0,
        claimed:         0,
        diamonds_spent:  0,
        next_affordable: None,
        claimable:       Vec::new(),
    };
    for entry in table.levels() {
        match classify(entry, wallet) {
            LevelState::Claimed => {
                summary.unlocked += 1;
                summary.claimed += 1;
                summary.diamonds_spent += entry.unlock_cost;
            }
            LevelState::Unlocked => {
                summary.unlocked += 1;
                summary.diamonds_spent += entry.unlock_cost;
                summary.claimable.push(entry.level);
            }
            LevelState::Unlockable => {
                if summary.next_affordable.is_none() {
                    summary.next_affordable = Some(entry.level);
                }
            }
            LevelState::Locked | LevelState::Unaffordable => {}
        }
    }
    summary
}
