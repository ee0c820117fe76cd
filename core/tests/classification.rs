use lucete_core::{
    classify::{classify, progress, summarize, LevelState},
    config::LadderConfig,
    table::RewardTable,
    wallet::UserWallet,
};

fn reference_table() -> RewardTable {
    RewardTable::generate(&LadderConfig::default())
}

#[test]
fn exact_balance_counts_as_unlockable() {
    let table = reference_table();
    let wallet = UserWallet {
        diamonds: 100,
        ..Default::default()
    };
    assert_eq!(
        classify(table.get(1).unwrap(), &wallet),
        LevelState::Unlockable
    );
}

#[test]
fn one_diamond_short_is_unaffordable() {
    let table = reference_table();
    let wallet = UserWallet {
        diamonds: 99,
        ..Default::default()
    };
    assert_eq!(
        classify(table.get(1).unwrap(), &wallet),
        LevelState::Unaffordable
    );
}

#[test]
fn unlocked_beats_affordability() {
    let table = reference_table();
    let mut wallet = UserWallet::new();
    wallet.record_unlock(3);
    // No diamonds at all, yet the level reads unlocked.
    assert_eq!(
        classify(table.get(3).unwrap(), &wallet),
        LevelState::Unlocked
    );
}

#[test]
fn claimed_is_terminal() {
    let table = reference_table();
    let mut wallet = UserWallet::new();
    wallet.record_unlock(2);
    wallet.record_claim(2);
    let state = classify(table.get(2).unwrap(), &wallet);
    assert_eq!(state, LevelState::Claimed);
    assert!(state.is_terminal());
    assert!(!state.is_locked());
}

#[test]
fn progress_reports_coarse_locked_without_affordability() {
    let wallet = UserWallet {
        diamonds: 1_000_000,
        ..Default::default()
    };
    assert_eq!(progress(9, &wallet), LevelState::Locked);
    assert!(progress(9, &wallet).is_locked());
}

#[test]
fn classified_levels_are_never_plain_locked() {
    let table = reference_table();
    for diamonds in [0, 99, 100, 1000, 5000] {
        let wallet = UserWallet {
            diamonds,
            ..Default::default()
        };
        for entry in table.levels() {
            assert_ne!(
                classify(entry, &wallet),
                LevelState::Locked,
                "level {} with {} diamonds",
                entry.level,
                diamonds
            );
        }
    }
}

#[test]
fn empty_wallet_summary_is_all_locked() {
    let summary = summarize(&reference_table(), &UserWallet::new());
    assert_eq!(summary.level_count, 20);
    assert_eq!(summary.unlocked, 0);
    assert_eq!(summary.claimed, 0);
    assert_eq!(summary.diamonds_spent, 0);
    assert_eq!(summary.next_affordable, None);
    assert!(summary.claimable.is_empty());
}

#[test]
fn summary_counts_progress_and_spend() {
    let table = reference_table();
    let mut wallet = UserWallet {
        gold: 175,
        diamonds: 300,
        ..Default::default()
    };
    wallet.record_unlock(1);
    wallet.record_unlock(2);
    wallet.record_claim(1);

    let summary = summarize(&table, &wallet);
    assert_eq!(summary.unlocked, 2, "claimed levels still count as unlocked");
    assert_eq!(summary.claimed, 1);
    assert_eq!(summary.diamonds_spent, 300);
    // Level 3 costs exactly 300, so it is the first affordable unlock.
    assert_eq!(summary.next_affordable, Some(3));
    assert_eq!(summary.claimable, vec![2]);
}
