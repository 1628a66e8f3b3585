use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default home: `$HOME/.tally`
pub fn default_tally_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".tally"))
}

/// Resolve the home directory (explicit override or default) and create it.
pub fn ensure_tally_home(home: Option<&Path>) -> Result<PathBuf> {
    let dir = match home {
        Some(p) => p.to_path_buf(),
        None => default_tally_home()?,
    };
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn config_path(home: &Path) -> PathBuf {
    home.join("config.toml")
}

pub fn prefs_path(home: &Path) -> PathBuf {
    home.join("prefs.json")
}

pub fn read_statement(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}
