//! Theme preference: a dark-mode flag persisted through a swappable key-value store.
//!
//! The report pipeline never looks at this; only the CLI's `theme` command does.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Setting name the dark-mode flag is stored under
pub const DARK_MODE_KEY: &str = "darkMode";

/// Durable string key-value storage for user preferences
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

#[cfg(test)]
impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON object on disk, rewritten on every `set`
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let s = fs::read_to_string(&self.path)
            .with_context(|| format!("read {}", self.path.display()))?;
        serde_json::from_str(&s).with_context(|| format!("parse {}", self.path.display()))
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut all = self.read_all()?;
        all.insert(key.to_string(), value.to_string());
        let json = serde_json::to_string_pretty(&all)?;
        fs::write(&self.path, json).with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }
}

/// Dark-mode setting owned by the caller and backed by an injected store
#[derive(Debug)]
pub struct ThemeSettings<S: PreferenceStore> {
    store: S,
    dark_mode: bool,
}

impl<S: PreferenceStore> ThemeSettings<S> {
    /// Read the stored flag. When nothing is stored yet, `system_prefers_dark` is
    /// consulted once; its answer is not persisted until the first toggle.
    pub fn load(store: S, system_prefers_dark: impl FnOnce() -> bool) -> Result<Self> {
        let dark_mode = match store.get(DARK_MODE_KEY)? {
            Some(v) => v.trim() == "true",
            None => {
                let dark = system_prefers_dark();
                debug!(dark, "no stored theme, using system preference");
                dark
            }
        };
        Ok(Self { store, dark_mode })
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Flip the flag and persist it.
    pub fn toggle(&mut self) -> Result<bool> {
        self.dark_mode = !self.dark_mode;
        let value = if self.dark_mode { "true" } else { "false" };
        self.store.set(DARK_MODE_KEY, value)?;
        Ok(self.dark_mode)
    }

    #[cfg(test)]
    pub fn into_store(self) -> S {
        self.store
    }
}

/// Terminal light/dark signal from `COLORFGBG` ("fg;bg"); dark backgrounds are
/// colors 0-6 and 8.
pub fn terminal_prefers_dark() -> bool {
    colorfgbg_is_dark(std::env::var("COLORFGBG").ok().as_deref())
}

fn colorfgbg_is_dark(value: Option<&str>) -> bool {
    value
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok())
        .is_some_and(|bg| bg <= 6 || bg == 8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_fallback_only_when_unset() {
        let theme = ThemeSettings::load(MemoryStore::default(), || true).unwrap();
        assert!(theme.dark_mode());

        let mut store = MemoryStore::default();
        store.set(DARK_MODE_KEY, "false").unwrap();
        let theme = ThemeSettings::load(store, || panic!("system signal must not be read")).unwrap();
        assert!(!theme.dark_mode());
    }

    #[test]
    fn test_toggle_persists() {
        let mut theme = ThemeSettings::load(MemoryStore::default(), || false).unwrap();
        assert!(theme.toggle().unwrap());
        let store = theme.into_store();
        assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));

        let mut theme = ThemeSettings::load(store, || false).unwrap();
        assert!(theme.dark_mode());
        assert!(!theme.toggle().unwrap());
    }

    #[test]
    fn test_file_store_survives_reload() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("prefs.json");

        let mut theme = ThemeSettings::load(FileStore::new(&path), || false).unwrap();
        theme.toggle().unwrap();

        let reloaded = ThemeSettings::load(FileStore::new(&path), || false).unwrap();
        assert!(reloaded.dark_mode());

        let mut store = FileStore::new(&path);
        store.set("other", "x").unwrap();
        assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_corrupt_prefs_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();
        assert!(ThemeSettings::load(FileStore::new(&path), || false).is_err());
    }

    #[test]
    fn test_colorfgbg() {
        assert!(colorfgbg_is_dark(Some("15;0")));
        assert!(colorfgbg_is_dark(Some("15;default;8")));
        assert!(!colorfgbg_is_dark(Some("0;15")));
        assert!(!colorfgbg_is_dark(Some("garbage")));
        assert!(!colorfgbg_is_dark(None));
    }
}
