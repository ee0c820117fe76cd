//! User wallet: currency balances plus ladder progress.
//!
//! RULE: `unlocked_levels` and `claimed_levels` are kept sorted ascending and
//! free of duplicates, and every claimed level is also unlocked. The record
//! helpers preserve this by construction; `normalize` repairs ordering on
//! wallets read back from storage.

use serde::{Deserialize, Serialize};

use crate::types::Level;

/// A user's balances and per-level ladder progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserWallet {
    pub gold:            u64,
    pub diamonds:        u64,
    pub unlocked_levels: Vec<Level>,
    pub claimed_levels:  Vec<Level>,
}

impl UserWallet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_unlocked(&self, level: Level) -> bool {
        self.unlocked_levels.binary_search(&level).is_ok()
    }

    pub fn has_claimed(&self, level: Level) -> bool {
        self.claimed_levels.binary_search(&level).is_ok()
    }

    /// Insert `level` into the unlocked list, keeping it sorted. Idempotent.
    pub fn record_unlock(&mut self, level: Level) {
        if let Err(pos) = self.unlocked_levels.binary_search(&level) {
            self.unlocked_levels.insert(pos, level);
        }
    }

    /// Insert `level` into the claimed list, keeping it sorted. Idempotent.
    pub fn record_claim(&mut self, level: Level) {
        if let Err(pos) = self.claimed_levels.binary_search(&level) {
            self.claimed_levels.insert(pos, level);
        }
    }

    /// Sort and dedup both progress lists. Storage is free to hand back
    /// lists in any order; everything downstream assumes sorted.
    pub fn normalize(&mut self) {
        self.unlocked_levels.sort_unstable();
        self.unlocked_levels.dedup();
        self.claimed_levels.sort_unstable();
        self.claimed_levels.dedup();
    }
}

/// A partial wallet update: only the populated fields are written back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletPatch {
    pub gold:            Option<u64>,
    pub diamonds:        Option<u64>,
    pub unlocked_levels: Option<Vec<Level>>,
    pub claimed_levels:  Option<Vec<Level>>,
}

impl WalletPatch {
    pub fn is_empty(&self) -> bool {
        self.gold.is_none()
            && self.diamonds.is_none()
            && self.unlocked_levels.is_none()
            && self.claimed_levels.is_none()
    }
}
