use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use willmeter_store::CatalogTranslator;

use crate::state::ensure_willmeter_home;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplaySection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySection {
    /// One of the supported language codes (en, ja, zh-Hans).
    pub language: String,
    /// Extra TOML catalog merged into `language`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            catalog: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_willmeter_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    read_config(&p)
}

pub fn read_config(path: &Path) -> Result<Config> {
    let s = fs::read_to_string(path)
        .with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).context("parse config.toml")
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

/// Builtin English catalog, plus the configured catalog and language.
pub fn build_translator(cfg: &Config) -> Result<CatalogTranslator> {
    let mut translator = CatalogTranslator::builtin();
    let language = cfg.display.language.as_str();

    if let Some(path) = &cfg.display.catalog {
        translator
            .load_catalog_file(language, path)
            .with_context(|| format!("load catalog {}", path.display()))?;
    }
    if !translator.change_language(language) {
        bail!("unsupported language in config: {}", language);
    }
    Ok(translator)
}
