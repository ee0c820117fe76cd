//! Session-scoped ladder context.
//!
//! RULE: no global state. A session owns its reward table, its wallet copy
//! and its store handle; two sessions never share mutable data.
//! RULE: mutations are compute-then-persist. The next wallet is computed
//! as a value, written back through the store, and adopted locally only
//! when the write succeeds. A failed write leaves the session wallet
//! exactly as it was.

use uuid::Uuid;

use crate::classify::{classify, summarize, LadderSummary, LevelState};
use crate::config::LadderConfig;
use crate::error::{LadderError, LadderResult};
use crate::store::ProfileStore;
use crate::table::{RewardLevel, RewardTable};
use crate::transition;
use crate::types::{Level, UserId};
use crate::wallet::{UserWallet, WalletPatch};

pub struct LadderSession<S: ProfileStore> {
    session_id: Uuid,
    user_id:    UserId,
    table:      RewardTable,
    store:      S,
    wallet:     UserWallet,
}

impl<S: ProfileStore> LadderSession<S> {
    /// Open a session for `user_id`. The wallet must already exist in the
    /// store; absence is `WalletNotFound`. Provisioning a fresh wallet is
    /// the caller's decision, never a session side effect.
    pub fn open(config: &LadderConfig, store: S, user_id: &str) -> LadderResult<Self> {
        let wallet = store
            .fetch_wallet(user_id)?
            .ok_or_else(|| LadderError::WalletNotFound {
                user_id: user_id.to_string(),
            })?;
        let session_id = Uuid::new_v4();
        log::info!(
            "session={session_id} ladder: opened user={user_id} gold={} diamonds={} unlocked={} claimed={}",
            wallet.gold,
            wallet.diamonds,
            wallet.unlocked_levels.len(),
            wallet.claimed_levels.len()
        );
        Ok(Self {
            session_id,
            user_id: user_id.to_string(),
            table: RewardTable::generate(config),
            store,
            wallet,
        })
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn table(&self) -> &RewardTable {
        &self.table
    }

    /// The full ordered reward table, as handed to the UI layer.
    pub fn levels(&self) -> &[RewardLevel] {
        self.table.levels()
    }

    /// The session's current view of the wallet. Reflects every adopted
    /// mutation and nothing that failed to persist.
    pub fn wallet(&self) -> &UserWallet {
        &self.wallet
    }

    pub fn classify_level(&self, level: Level) -> LadderResult<LevelState> {
        let entry = self.entry(level)?;
        Ok(classify(entry, &self.wallet))
    }

    pub fn summary(&self) -> LadderSummary {
        summarize(&self.table, &self.wallet)
    }

    /// Unlock `level`, spending diamonds. Persists the diamond balance and
    /// the unlocked list; gold and claims are untouched and not written.
    pub fn unlock(&mut self, level: Level) -> LadderResult<&UserWallet> {
        let entry = *self.entry(level)?;
        let next = transition::unlock(&entry, &self.wallet)?;
        let patch = WalletPatch {
            diamonds: Some(next.diamonds),
            unlocked_levels: Some(next.unlocked_levels.clone()),
            ..Default::default()
        };
        if let Err(e) = self.store.persist_wallet(&self.user_id, &patch) {
            log::warn!(
                "session={} ladder: unlock level={level} not adopted, write-back failed: {e}",
                self.session_id
            );
            return Err(e);
        }
        log::info!(
            "session={} ladder: unlocked level={level} cost={} diamonds_left={}",
            self.session_id,
            entry.unlock_cost,
            next.diamonds
        );
        self.wallet = next;
        Ok(&self.wallet)
    }

    /// Credit diamonds bought elsewhere in the portal. Persists the diamond
    /// balance only.
    pub fn credit_diamonds(&mut self, amount: u64) -> LadderResult<&UserWallet> {
        let mut next = self.wallet.clone();
        next.diamonds += amount;
        let patch = WalletPatch {
            diamonds: Some(next.diamonds),
            ..Default::default()
        };
        if let Err(e) = self.store.persist_wallet(&self.user_id, &patch) {
            log::warn!(
                "session={} ladder: credit of {amount} diamonds not adopted, write-back failed: {e}",
                self.session_id
            );
            return Err(e);
        }
        log::info!(
            "session={} ladder: credited diamonds={amount} balance={}",
            self.session_id,
            next.diamonds
        );
        self.wallet = next;
        Ok(&self.wallet)
    }

    /// Claim the rewards of an unlocked `level`. Persists both balances and
    /// the claimed list; the unlocked list is untouched and not written.
    pub fn claim(&mut self, level: Level) -> LadderResult<&UserWallet> {
        let entry = *self.entry(level)?;
        let next = transition::claim(&entry, &self.wallet)?;
        let patch = WalletPatch {
            gold: Some(next.gold),
            diamonds: Some(next.diamonds),
            claimed_levels: Some(next.claimed_levels.clone()),
            ..Default::default()
        };
        if let Err(e) = self.store.persist_wallet(&self.user_id, &patch) {
            log::warn!(
                "session={} ladder: claim level={level} not adopted, write-back failed: {e}",
                self.session_id
            );
            return Err(e);
        }
        log::info!(
            "session={} ladder: claimed level={level} primary={:?} amount={} gold={} diamonds={}",
            self.session_id,
            entry.primary.kind,
            entry.primary.amount,
            next.gold,
            next.diamonds
        );
        self.wallet = next;
        Ok(&self.wallet)
    }

    fn entry(&self, level: Level) -> LadderResult<&RewardLevel> {
        self.table.get(level).ok_or(LadderError::UnknownLevel {
            level,
            max: self.table.max_level(),
        })
    }
}
