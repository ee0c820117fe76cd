//! Unlock and claim are pure value transitions; these tests pin the
//! arithmetic and the precondition ordering.

use lucete_core::{
    config::LadderConfig,
    error::LadderError,
    table::{RewardKind, RewardTable},
    transition::{claim, unlock},
    wallet::UserWallet,
};

// ── Test helpers ──────────────────────────────────────────────

fn reference_table() -> RewardTable {
    RewardTable::generate(&LadderConfig::default())
}

fn wallet_with(gold: u64, diamonds: u64) -> UserWallet {
    UserWallet {
        gold,
        diamonds,
        ..Default::default()
    }
}

// ── Unlock ────────────────────────────────────────────────────

#[test]
fn unlock_spends_diamonds_and_records_level() {
    let table = reference_table();
    let wallet = wallet_with(0, 150);
    let next = unlock(table.get(1).unwrap(), &wallet).unwrap();
    assert_eq!(next.diamonds, 50);
    assert_eq!(next.gold, 0);
    assert_eq!(next.unlocked_levels, vec![1]);
    assert!(next.claimed_levels.is_empty());
    // The input wallet is untouched.
    assert_eq!(wallet.diamonds, 150);
    assert!(wallet.unlocked_levels.is_empty());
}

#[test]
fn unlock_with_exact_balance_drains_to_zero() {
    let table = reference_table();
    let next = unlock(table.get(1).unwrap(), &wallet_with(0, 100)).unwrap();
    assert_eq!(next.diamonds, 0);
    assert_eq!(next.unlocked_levels, vec![1]);

    // A second unlock on the drained wallet is the repeat guard, not a
    // second charge.
    let err = unlock(table.get(1).unwrap(), &next).unwrap_err();
    assert!(matches!(err, LadderError::AlreadyUnlocked { level: 1 }));
    assert_eq!(next.diamonds, 0);
}

#[test]
fn unlock_short_one_diamond_is_refused() {
    let table = reference_table();
    let err = unlock(table.get(2).unwrap(), &wallet_with(0, 199)).unwrap_err();
    match err {
        LadderError::InsufficientFunds {
            level,
            cost,
            available,
        } => {
            assert_eq!(level, 2);
            assert_eq!(cost, 200);
            assert_eq!(available, 199);
        }
        other => panic!("expected InsufficientFunds, got {other:?}"),
    }
}

#[test]
fn repeat_unlock_reports_already_unlocked_before_affordability() {
    let table = reference_table();
    let mut wallet = wallet_with(0, 0);
    wallet.record_unlock(1);
    // Zero diamonds: if affordability were checked first this would come
    // back as InsufficientFunds.
    let err = unlock(table.get(1).unwrap(), &wallet).unwrap_err();
    assert!(matches!(err, LadderError::AlreadyUnlocked { level: 1 }));
    assert!(err.is_benign_noop());
}

// ── Claim ─────────────────────────────────────────────────────

#[test]
fn claim_after_unlock_matches_reference_walkthrough() {
    let table = reference_table();
    let unlocked = unlock(table.get(1).unwrap(), &wallet_with(0, 150)).unwrap();
    let claimed = claim(table.get(1).unwrap(), &unlocked).unwrap();
    // Level 1 pays 115 gold primary, then 60 gold and 2 gems secondary.
    assert_eq!(claimed.gold, 175);
    assert_eq!(claimed.diamonds, 52);
    assert_eq!(claimed.unlocked_levels, vec![1]);
    assert_eq!(claimed.claimed_levels, vec![1]);
}

#[test]
fn even_level_primary_lands_in_diamonds() {
    let table = reference_table();
    let mut wallet = wallet_with(0, 0);
    wallet.record_unlock(2);
    let entry = table.get(2).unwrap();
    assert_eq!(entry.primary.kind, RewardKind::Diamond);
    let next = claim(entry, &wallet).unwrap();
    // 215 primary diamonds plus 4 gems credited as diamonds.
    assert_eq!(next.diamonds, 219);
    assert_eq!(next.gold, 110);
}

#[test]
fn milestone_claim_includes_surcharge() {
    let table = reference_table();
    let mut wallet = wallet_with(0, 0);
    wallet.record_unlock(5);
    let next = claim(table.get(5).unwrap(), &wallet).unwrap();
    assert_eq!(next.gold, 565 + 285);
    assert_eq!(next.diamonds, 10);
}

#[test]
fn claim_of_locked_level_is_refused() {
    let table = reference_table();
    let err = claim(table.get(3).unwrap(), &wallet_with(0, 1000)).unwrap_err();
    assert!(matches!(err, LadderError::NotUnlocked { level: 3 }));
    assert!(!err.is_benign_noop());
}

#[test]
fn repeat_claim_is_a_benign_noop() {
    let table = reference_table();
    let mut wallet = wallet_with(0, 0);
    wallet.record_unlock(4);
    wallet.record_claim(4);
    let err = claim(table.get(4).unwrap(), &wallet).unwrap_err();
    assert!(matches!(err, LadderError::AlreadyClaimed { level: 4 }));
    assert!(err.is_benign_noop());
}

#[test]
fn claimed_levels_stay_a_subset_of_unlocked_levels() {
    let table = reference_table();
    let mut wallet = wallet_with(0, 1000);
    for level in [1, 2, 3] {
        wallet = unlock(table.get(level).unwrap(), &wallet).unwrap();
    }
    for level in [1, 3] {
        wallet = claim(table.get(level).unwrap(), &wallet).unwrap();
    }
    for claimed in &wallet.claimed_levels {
        assert!(
            wallet.has_unlocked(*claimed),
            "claimed level {claimed} must also be unlocked"
        );
    }
    assert_eq!(wallet.claimed_levels, vec![1, 3]);
    assert_eq!(wallet.unlocked_levels, vec![1, 2, 3]);
}

#[test]
fn claim_does_not_mutate_the_input_wallet() {
    let table = reference_table();
    let mut wallet = wallet_with(3, 9);
    wallet.record_unlock(1);
    let before = wallet.clone();
    let _ = claim(table.get(1).unwrap(), &wallet).unwrap();
    assert_eq!(wallet, before);
}
