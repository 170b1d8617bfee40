//! Cumulative per-user statistics kept outside the in-memory sessions.
//!
//! The engine only needs a handful of calls: look a user up, insert one if
//! missing, and bump counters after each scored answer. Two backends ship
//! with the crate:
//! - [`MemoryUserStore`]: process-local map, used by tests and demos
//! - [`JsonFileUserStore`]: pretty-printed JSON file, `{"users": {"<id>": {...}}}`

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::quiz_engine::{
    error::Result,
    models::{PlayerId, UserStats},
};

pub trait UserStore: Send + Sync {
    fn get_user_stats(&self, user_id: PlayerId) -> Result<Option<UserStats>>;

    /// Insert a record if none exists. Existing records are left untouched.
    fn ensure_user_exists(&self, user_id: PlayerId, username: &str) -> Result<()>;

    /// Count one won (`true`) or lost (`false`) round.
    fn record_outcome(&self, user_id: PlayerId, won: bool) -> Result<()>;

    fn add_coins(&self, user_id: PlayerId, coins: u32) -> Result<()>;
}

fn apply_outcome(stats: &mut UserStats, won: bool) {
    if won {
        stats.wins = stats.wins.saturating_add(1);
    } else {
        stats.losses = stats.losses.saturating_add(1);
    }
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<PlayerId, UserStats>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn update(&self, user_id: PlayerId, f: impl FnOnce(&mut UserStats)) -> Result<()> {
        let mut users = self.users.lock().unwrap_or_else(|e| e.into_inner());
        f(users.entry(user_id).or_insert_with(|| UserStats::new(user_id, "")));
        Ok(())
    }
}

impl UserStore for MemoryUserStore {
    fn get_user_stats(&self, user_id: PlayerId) -> Result<Option<UserStats>> {
        let users = self.users.lock().unwrap_or_else(|e| e.into_inner());
        Ok(users.get(&user_id).cloned())
    }

    fn ensure_user_exists(&self, user_id: PlayerId, username: &str) -> Result<()> {
        let mut users = self.users.lock().unwrap_or_else(|e| e.into_inner());
        users
            .entry(user_id)
            .or_insert_with(|| UserStats::new(user_id, username));
        Ok(())
    }

    fn record_outcome(&self, user_id: PlayerId, won: bool) -> Result<()> {
        self.update(user_id, |s| apply_outcome(s, won))
    }

    fn add_coins(&self, user_id: PlayerId, coins: u32) -> Result<()> {
        self.update(user_id, |s| s.coins = s.coins.saturating_add(coins))
    }
}

// ---------------------------------------------------------------------------
// JSON file backend
// ---------------------------------------------------------------------------

/// On-disk schema.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct UsersFile {
    #[serde(default)]
    pub users: BTreeMap<String, UserStats>,
}

/// Whole-file read-modify-write store. Writes are serialized in-process.
#[derive(Debug)]
pub struct JsonFileUserStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileUserStore {
    /// Create the parent directory if needed. The file itself appears on first write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        Ok(JsonFileUserStore { path, lock: Mutex::new(()) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<UsersFile> {
        if !self.path.exists() {
            return Ok(UsersFile::default());
        }
        let text = fs::read_to_string(&self.path)?;
        if text.trim().is_empty() {
            return Ok(UsersFile::default());
        }
        Ok(serde_json::from_str(&text)?)
    }

    fn save(&self, file: &UsersFile) -> Result<()> {
        let data = serde_json::to_string_pretty(file)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;
        debug!("user store: wrote {} records to {}", file.users.len(), self.path.display());
        Ok(())
    }

    fn update(&self, user_id: PlayerId, f: impl FnOnce(&mut UserStats)) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut file = self.load()?;
        let stats = file
            .users
            .entry(user_id.to_string())
            .or_insert_with(|| UserStats::new(user_id, ""));
        f(stats);
        self.save(&file)
    }
}

impl UserStore for JsonFileUserStore {
    fn get_user_stats(&self, user_id: PlayerId) -> Result<Option<UserStats>> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        Ok(self.load()?.users.remove(&user_id.to_string()))
    }

    fn ensure_user_exists(&self, user_id: PlayerId, username: &str) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut file = self.load()?;
        let key = user_id.to_string();
        if file.users.contains_key(&key) {
            return Ok(());
        }
        file.users.insert(key, UserStats::new(user_id, username));
        self.save(&file)
    }

    fn record_outcome(&self, user_id: PlayerId, won: bool) -> Result<()> {
        self.update(user_id, |s| apply_outcome(s, won))
    }

    fn add_coins(&self, user_id: PlayerId, coins: u32) -> Result<()> {
        self.update(user_id, |s| s.coins = s.coins.saturating_add(coins))
    }
}
