//! Reward-table generation.
//!
//! RULE: the table is derived from `LadderConfig` once and never mutated.
//! Levels are dense (1..=N), unlock costs strictly increase with level, and
//! the primary reward currency alternates by level parity: odd levels pay
//! gold, even levels pay diamonds.

use serde::{Deserialize, Serialize};

use crate::config::LadderConfig;
use crate::types::Level;

/// Currency of a level's primary reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardKind {
    Gold,
    Diamond,
}

/// The headline reward of a level, paid in a single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryReward {
    pub kind:   RewardKind,
    pub amount: u64,
}

/// The side rewards of a level. Gems are the legacy third currency; they
/// are credited as diamonds when claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryReward {
    pub gold_amount: u64,
    pub gem_amount:  u64,
}

/// One row of the reward table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardLevel {
    pub level:       Level,
    pub unlock_cost: u64,
    pub primary:     PrimaryReward,
    pub secondary:   SecondaryReward,
}

/// The full ladder, indexed by level number.
#[derive(Debug, Clone)]
pub struct RewardTable {
    levels: Vec<RewardLevel>,
}

impl RewardTable {
    /// Build the table from configuration. Same config, same table: there
    /// is no randomness anywhere in the generation.
    pub fn generate(config: &LadderConfig) -> Self {
        let mut levels = Vec::with_capacity(config.level_count as usize);
        for level in 1..=config.level_count {
            let i = u64::from(level);
            let kind = if level % 2 == 1 {
                RewardKind::Gold
            } else {
                RewardKind::Diamond
            };
            let mut primary_amount = config.primary_per_level * i + config.primary_base;
            let mut gold_amount =
                config.secondary_gold_per_level * i + config.secondary_gold_base;
            let mut gem_amount = config.gem_per_level * i + config.gem_base;
            for bonus in &config.milestones {
                if level % bonus.interval == 0 {
                    primary_amount += bonus.primary_bonus;
                    gold_amount += bonus.secondary_gold_bonus;
                    gem_amount += bonus.gem_bonus;
                }
            }
            levels.push(RewardLevel {
                level,
                unlock_cost: config.unlock_cost_step * i,
                primary: PrimaryReward {
                    kind,
                    amount: primary_amount,
                },
                secondary: SecondaryReward {
                    gold_amount,
                    gem_amount,
                },
            });
        }
        Self { levels }
    }

    /// Look up a level. `None` for 0 or anything past the top of the ladder.
    pub fn get(&self, level: Level) -> Option<&RewardLevel> {
        if level == 0 {
            return None;
        }
        self.levels.get(level as usize - 1)
    }

    pub fn levels(&self) -> &[RewardLevel] {
        &self.levels
    }

    pub fn max_level(&self) -> Level {
        self.levels.len() as Level
    }
}
