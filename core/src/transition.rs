//! Unlock and claim transitions.
//!
//! RULE: transitions are pure. They take the current wallet by reference
//! and return the wallet as it would look after the operation; callers
//! adopt the result only once the write-back has succeeded. Precondition
//! failures are distinct errors so a caller can tell a benign repeat from
//! a real refusal.

use crate::error::{LadderError, LadderResult};
use crate::table::{RewardKind, RewardLevel};
use crate::wallet::UserWallet;

/// Spend diamonds to unlock a level.
///
/// Checks run in order: a repeat unlock is reported before affordability,
/// so an already-unlocked level never surfaces as `InsufficientFunds`.
pub fn unlock(entry: &RewardLevel, wallet: &UserWallet) -> LadderResult<UserWallet> {
    if wallet.has_unlocked(entry.level) {
        return Err(LadderError::AlreadyUnlocked { level: entry.level });
    }
    if wallet.diamonds < entry.unlock_cost {
        return Err(LadderError::InsufficientFunds {
            level:     entry.level,
            cost:      entry.unlock_cost,
            available: wallet.diamonds,
        });
    }
    let mut next = wallet.clone();
    next.diamonds -= entry.unlock_cost;
    next.record_unlock(entry.level);
    Ok(next)
}

/// Collect the rewards of an unlocked level.
///
/// The primary reward lands in whichever currency the table names for the
/// level. Secondary gold is credited as gold; secondary gems are credited
/// as diamonds.
pub fn claim(entry: &RewardLevel, wallet: &UserWallet) -> LadderResult<UserWallet> {
    if !wallet.has_unlocked(entry.level) {
        return Err(LadderError::NotUnlocked { level: entry.level });
    }
    if wallet.has_claimed(entry.level) {
        return Err(LadderError::AlreadyClaimed { level: entry.level });
    }
    let mut next = wallet.clone();
    match entry.primary.kind {
        RewardKind::Gold => next.gold += entry.primary.amount,
        RewardKind::Diamond => next.diamonds += entry.primary.amount,
    }
    next.gold += entry.secondary.gold_amount;
    next.diamonds += entry.secondary.gem_amount;
    next.record_claim(entry.level);
    Ok(next)
}
