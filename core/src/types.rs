//! Shared primitive types used across the reward ladder.

/// A reward-ladder level number. Levels are dense, starting at 1.
pub type Level = u32;

/// The portal's stable identifier for a user account.
pub type UserId = String;
