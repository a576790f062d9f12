//! Time-bounded storage of normalized releases
//!
//! Entries expire lazily: an expired entry reads as absent and stays in place
//! until the next `set` for the same key overwrites it.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

#[cfg(test)]
use mockall::automock;

use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

use crate::package::types::PackageKind;
use crate::release::error::CacheError;
use crate::release::types::NormalizedRelease;

/// Source of the current time in milliseconds since the UNIX epoch
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Cache key for a package: kind namespace + identity.
///
/// Plugins and themes never share keys even when identities collide.
pub fn cache_key(kind: PackageKind, identity: &str) -> String {
    format!("{}_release_{}", kind.as_str(), identity)
}

/// Trait for storing and retrieving normalized releases
#[cfg_attr(test, automock)]
pub trait ReleaseStore: Send + Sync {
    /// Returns the stored release, or `None` when missing or expired
    fn get(&self, key: &str) -> Result<Option<NormalizedRelease>, CacheError>;

    /// Stores `value` under `key` for `ttl_ms` milliseconds, replacing any
    /// previous entry
    fn set(&self, key: &str, value: &NormalizedRelease, ttl_ms: i64) -> Result<(), CacheError>;

    /// Removes the entry for `key` if present
    fn delete(&self, key: &str) -> Result<(), CacheError>;
}

/// SQLite-backed release cache shared by every process using the same file
pub struct SqliteReleaseCache {
    conn: Mutex<Connection>,
    clock: Arc<dyn Clock>,
}

impl SqliteReleaseCache {
    pub fn new(db_path: &Path) -> Result<Self, CacheError> {
        Self::with_clock(db_path, Arc::new(SystemClock))
    }

    pub fn with_clock(db_path: &Path, clock: Arc<dyn Clock>) -> Result<Self, CacheError> {
        info!("Initializing release cache at {:?}", db_path);

        let conn = Connection::open(db_path)?;

        // Enable WAL mode for better concurrency
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        Self::from_connection(conn, clock)
    }

    /// Cache living only as long as this value
    pub fn in_memory(clock: Arc<dyn Clock>) -> Result<Self, CacheError> {
        Self::from_connection(Connection::open_in_memory()?, clock)
    }

    fn from_connection(conn: Connection, clock: Arc<dyn Clock>) -> Result<Self, CacheError> {
        let cache = Self {
            conn: Mutex::new(conn),
            clock,
        };

        cache.create_schema()?;
        debug!("Release cache ready");

        Ok(cache)
    }

    /// Acquire database connection lock with proper error handling
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>, CacheError> {
        self.conn.lock().map_err(|_| CacheError::LockPoisoned)
    }

    fn create_schema(&self) -> Result<(), CacheError> {
        let conn = self.lock_conn()?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS releases (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                expires_at INTEGER NOT NULL
            )
            "#,
            [],
        )?;

        Ok(())
    }
}

impl ReleaseStore for SqliteReleaseCache {
    fn get(&self, key: &str) -> Result<Option<NormalizedRelease>, CacheError> {
        let conn = self.lock_conn()?;
        let row: Option<(String, i64)> = conn
            .query_row(
                "SELECT value, expires_at FROM releases WHERE key = ?1",
                [key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        drop(conn);

        let Some((value, expires_at)) = row else {
            return Ok(None);
        };

        if expires_at <= self.clock.now_ms() {
            debug!("Cached release for {} expired", key);
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&value)?))
    }

    fn set(&self, key: &str, value: &NormalizedRelease, ttl_ms: i64) -> Result<(), CacheError> {
        let encoded = serde_json::to_string(value)?;
        let expires_at = self.clock.now_ms().saturating_add(ttl_ms.max(0));

        let conn = self.lock_conn()?;
        conn.execute(
            r#"
            INSERT INTO releases (key, value, expires_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, expires_at = excluded.expires_at
            "#,
            (key, encoded, expires_at),
        )?;

        debug!("Cached release for {} until {}", key, expires_at);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let conn = self.lock_conn()?;
        conn.execute("DELETE FROM releases WHERE key = ?1", [key])?;
        Ok(())
    }
}

/// In-process release cache
pub struct MemoryReleaseCache {
    entries: Mutex<HashMap<String, (NormalizedRelease, i64)>>,
    clock: Arc<dyn Clock>,
}

impl MemoryReleaseCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    fn lock_entries(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<String, (NormalizedRelease, i64)>>, CacheError> {
        self.entries.lock().map_err(|_| CacheError::LockPoisoned)
    }
}

impl Default for MemoryReleaseCache {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl ReleaseStore for MemoryReleaseCache {
    fn get(&self, key: &str) -> Result<Option<NormalizedRelease>, CacheError> {
        let now = self.clock.now_ms();
        let entries = self.lock_entries()?;

        Ok(entries
            .get(key)
            .filter(|(_, expires_at)| *expires_at > now)
            .map(|(value, _)| value.clone()))
    }

    fn set(&self, key: &str, value: &NormalizedRelease, ttl_ms: i64) -> Result<(), CacheError> {
        let expires_at = self.clock.now_ms().saturating_add(ttl_ms.max(0));
        self.lock_entries()?
            .insert(key.to_string(), (value.clone(), expires_at));
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.lock_entries()?.remove(key);
        Ok(())
    }
}
