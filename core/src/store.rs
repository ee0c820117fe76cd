//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database.
//! Sessions go through the `ProfileStore` trait and never execute SQL.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, ToSql};

use crate::error::{LadderError, LadderResult};
use crate::wallet::{UserWallet, WalletPatch};

/// The profile-store seam: everything the ladder needs from persistence.
///
/// `fetch_wallet` returns `Ok(None)` for users the store has never seen;
/// `persist_wallet` writes only the fields the patch populates and fails
/// with `WalletNotFound` if no row exists to update.
pub trait ProfileStore {
    fn fetch_wallet(&self, user_id: &str) -> LadderResult<Option<UserWallet>>;
    fn insert_wallet(&self, user_id: &str, wallet: &UserWallet) -> LadderResult<()>;
    fn persist_wallet(&self, user_id: &str, patch: &WalletPatch) -> LadderResult<()>;
}

pub struct SqliteProfileStore {
    conn: Connection,
    path: Option<String>, // None for :memory:, Some(path) for file
}

impl SqliteProfileStore {
    pub fn open(path: &str) -> LadderResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> LadderResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn, path: None })
    }

    /// Reopen a new connection to the same database.
    /// For in-memory databases, this returns a new in-memory database (isolated).
    /// For file-based databases, this opens the same file.
    pub fn reopen(&self) -> LadderResult<Self> {
        match &self.path {
            Some(p) => Self::open(p),
            None => Self::in_memory(),
        }
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> LadderResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_wallets.sql"))?;
        Ok(())
    }

    // ── Test helper methods ───────────────────────────────────────

    pub fn wallet_count(&self) -> LadderResult<i64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM wallet", [], |row| row.get(0))?;
        Ok(count)
    }
}

impl ProfileStore for SqliteProfileStore {
    fn fetch_wallet(&self, user_id: &str) -> LadderResult<Option<UserWallet>> {
        let row: Option<(i64, i64, String, String)> = self
            .conn
            .query_row(
                "SELECT gold, diamonds, unlocked_levels, claimed_levels
                 FROM wallet WHERE user_id = ?1",
                params![user_id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .optional()?;
        match row {
            None => Ok(None),
            Some((gold, diamonds, unlocked_json, claimed_json)) => {
                let mut wallet = UserWallet {
                    gold:            gold as u64,
                    diamonds:        diamonds as u64,
                    unlocked_levels: serde_json::from_str(&unlocked_json)?,
                    claimed_levels:  serde_json::from_str(&claimed_json)?,
                };
                wallet.normalize();
                Ok(Some(wallet))
            }
        }
    }

    fn insert_wallet(&self, user_id: &str, wallet: &UserWallet) -> LadderResult<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO wallet (user_id, gold, diamonds, unlocked_levels, claimed_levels, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                user_id,
                wallet.gold as i64,
                wallet.diamonds as i64,
                serde_json::to_string(&wallet.unlocked_levels)?,
                serde_json::to_string(&wallet.claimed_levels)?,
                now,
                now,
            ],
        )?;
        Ok(())
    }

    fn persist_wallet(&self, user_id: &str, patch: &WalletPatch) -> LadderResult<()> {
        if patch.is_empty() {
            return Ok(());
        }
        let gold = patch.gold.map(|v| v as i64);
        let diamonds = patch.diamonds.map(|v| v as i64);
        let unlocked = match &patch.unlocked_levels {
            Some(levels) => Some(serde_json::to_string(levels)?),
            None => None,
        };
        let claimed = match &patch.claimed_levels {
            Some(levels) => Some(serde_json::to_string(levels)?),
            None => None,
        };
        let updated_at = Utc::now().to_rfc3339();

        let mut sets: Vec<String> = Vec::new();
        let mut values: Vec<&dyn ToSql> = Vec::new();
        if let Some(v) = &gold {
            sets.push(format!("gold = ?{}", values.len() + 1));
            values.push(v);
        }
        if let Some(v) = &diamonds {
            sets.push(format!("diamonds = ?{}", values.len() + 1));
            values.push(v);
        }
        if let Some(v) = &unlocked {
            sets.push(format!("unlocked_levels = ?{}", values.len() + 1));
            values.push(v);
        }
        if let Some(v) = &claimed {
            sets.push(format!("claimed_levels = ?{}", values.len() + 1));
            values.push(v);
        }
        sets.push(format!("updated_at = ?{}", values.len() + 1));
        values.push(&updated_at);

        let sql = format!(
            "UPDATE wallet SET {} WHERE user_id = ?{}",
            sets.join(", "),
            values.len() + 1
        );
        values.push(&user_id);

        let changed = self.conn.execute(&sql, &values[..])?;
        if changed == 0 {
            return Err(LadderError::WalletNotFound {
                user_id: user_id.to_string(),
            });
        }
        Ok(())
    }
}
