//! Whole-file JSON records on local disk.
//!
//! The store keeps exactly three records under its root directory:
//! `session.json`, `activities.json`, and `purchases.json`. Each is read
//! in full on load and rewritten in full on save; there is no partial
//! update and a single writer is assumed.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use model::{Activity, ActivityId, Language, UserRole};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const SESSION_FILE: &str = "session.json";
const ACTIVITIES_FILE: &str = "activities.json";
const PURCHASES_FILE: &str = "purchases.json";

/// The signed-in user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub user_id: String,
    pub name: String,
    pub role: UserRole,
    pub language: Language,
}

/// A marketplace purchase, cached locally.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub activity_id: ActivityId,
    pub buyer_id: String,
    pub purchased_at: DateTime<Utc>,
}

/// File-backed store rooted at a single directory.
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Open (creating if needed) a store at the given root.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .with_context(|| format!("creating store directory {}", root.display()))?;
        log::debug!("store opened at {}", root.display());
        Ok(Self { root })
    }

    /// The conventional per-user store location, `~/.chitra`.
    pub fn default_root() -> Result<PathBuf> {
        let home = dirs::home_dir().context("could not determine home directory")?;
        Ok(home.join(".chitra"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn load_session(&self) -> Result<Option<SessionRecord>> {
        self.read_record(SESSION_FILE)
    }

    pub fn save_session(&self, session: &SessionRecord) -> Result<()> {
        self.write_record(SESSION_FILE, session)
    }

    /// Missing file reads as an empty list.
    pub fn load_activities(&self) -> Result<Vec<Activity>> {
        Ok(self.read_record(ACTIVITIES_FILE)?.unwrap_or_default())
    }

    pub fn save_activities(&self, activities: &[Activity]) -> Result<()> {
        self.write_record(ACTIVITIES_FILE, &activities)
    }

    pub fn load_purchases(&self) -> Result<Vec<PurchaseRecord>> {
        Ok(self.read_record(PURCHASES_FILE)?.unwrap_or_default())
    }

    pub fn save_purchases(&self, purchases: &[PurchaseRecord]) -> Result<()> {
        self.write_record(PURCHASES_FILE, &purchases)
    }

    fn read_record<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.root.join(name);
        if !path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let value = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(value))
    }

    fn write_record<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.root.join(name);
        let text = serde_json::to_string_pretty(value).context("serializing record")?;
        std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
        log::debug!("wrote {}", path.display());
        Ok(())
    }
}
