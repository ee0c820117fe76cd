//! Ladder configuration: the data that drives reward-table generation.
//!
//! The reference ladder (20 levels, 100-diamond cost step, milestone bonuses
//! at every 5th and 10th level) ships as the `Default`. Deployments override
//! it with a JSON file; missing fields keep their reference values.

use serde::{Deserialize, Serialize};

/// A surcharge applied to every level whose number the interval divides.
/// Bonuses are additive and independent: a level divisible by several
/// intervals receives every matching bonus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneBonus {
    pub interval: u32,
    pub primary_bonus: u64,
    pub secondary_gold_bonus: u64,
    pub gem_bonus: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LadderConfig {
    /// Number of levels in the ladder (N). Levels run 1..=N, no gaps.
    pub level_count: u32,
    /// Diamonds to unlock level i: `unlock_cost_step × i`.
    pub unlock_cost_step: u64,
    /// Primary reward for level i: `primary_per_level × i + primary_base`.
    pub primary_per_level: u64,
    pub primary_base: u64,
    /// Secondary gold for level i: `secondary_gold_per_level × i + secondary_gold_base`.
    pub secondary_gold_per_level: u64,
    pub secondary_gold_base: u64,
    /// Secondary gems for level i: `gem_per_level × i + gem_base`.
    pub gem_per_level: u64,
    pub gem_base: u64,
    /// Milestone surcharges, applied in list order (5 before 10 in the
    /// reference data; the order is part of the numeric contract).
    pub milestones: Vec<MilestoneBonus>,
}

impl Default for LadderConfig {
    fn default() -> Self {
        Self {
            level_count: 20,
            unlock_cost_step: 100,
            primary_per_level: 100,
            primary_base: 15,
            secondary_gold_per_level: 50,
            secondary_gold_base: 10,
            gem_per_level: 2,
            gem_base: 0,
            milestones: vec![
                MilestoneBonus {
                    interval: 5,
                    primary_bonus: 50,
                    secondary_gold_bonus: 25,
                    gem_bonus: 0,
                },
                MilestoneBonus {
                    interval: 10,
                    primary_bonus: 150,
                    secondary_gold_bonus: 75,
                    gem_bonus: 10,
                },
            ],
        }
    }
}

impl LadderConfig {
    /// Load from a JSON file. Fields absent from the file keep the
    /// reference-data defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: LadderConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the generator cannot honor.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.level_count == 0 {
            anyhow::bail!("level_count must be at least 1");
        }
        if self.unlock_cost_step == 0 {
            anyhow::bail!("unlock_cost_step must be positive: unlock costs are strictly increasing");
        }
        let mut seen: Vec<u32> = Vec::new();
        for m in &self.milestones {
            if m.interval < 2 {
                anyhow::bail!("milestone interval {} is below 2", m.interval);
            }
            if seen.contains(&m.interval) {
                anyhow::bail!("duplicate milestone interval {}", m.interval);
            }
            seen.push(m.interval);
        }
        Ok(())
    }
}
