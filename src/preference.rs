//! Theme preference persistence
//!
//! The only state that outlives a session: a single `theme` flag.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core_types::THEME_KEY;

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Preference file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Preference file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================
// THEME
// ============================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

// ============================================================
// STORES
// ============================================================

/// Key/value preference storage (browser localStorage equivalent)
pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept as one flat JSON object on disk.
/// A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        Ok(())
    }
}

// ============================================================
// THEME HELPERS
// ============================================================

/// Stored theme, `Light` when absent or unrecognised
pub fn load_theme(store: &dyn PreferenceStore) -> Result<Theme, PreferenceError> {
    let stored = store.get(THEME_KEY)?;
    Ok(match stored.as_deref().map(Theme::from_str) {
        Some(Ok(theme)) => theme,
        Some(Err(reason)) => {
            tracing::warn!(%reason, "ignoring stored theme");
            Theme::default()
        }
        None => Theme::default(),
    })
}

/// Flip the stored theme and persist it. Returns the new theme.
pub fn toggle_theme(store: &mut dyn PreferenceStore) -> Result<Theme, PreferenceError> {
    let next = load_theme(store)?.toggle();
    store.set(THEME_KEY, next.as_str())?;
    tracing::info!(theme = %next, "theme changed");
    Ok(next)
}
