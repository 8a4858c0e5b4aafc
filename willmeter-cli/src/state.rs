use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$WILLMETER_HOME`, or `~/.willmeter`.
pub fn willmeter_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("WILLMETER_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".willmeter"))
}

pub fn ensure_willmeter_home() -> Result<PathBuf> {
    let dir = willmeter_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Key-value file holding the willpower record.
pub fn store_path() -> Result<PathBuf> {
    Ok(ensure_willmeter_home()?.join("store.json"))
}

pub fn tasks_path() -> Result<PathBuf> {
    Ok(ensure_willmeter_home()?.join("tasks.json"))
}
