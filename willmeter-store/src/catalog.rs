//! CatalogTranslator: TOML string tables per language.
//!
//! Tables nest by key segment, so `[willpower.status] high = "..."` answers
//! the key `willpower.status.high`. Lookup order is current language, then
//! the fallback language, then the key itself.

use std::collections::HashMap;
use std::path::Path;

use tracing::warn;
use willmeter_core::Translator;

const BUILTIN_EN: &str = include_str!("catalog/en.toml");

pub const SUPPORTED_LANGUAGES: [&str; 3] = ["en", "ja", "zh-Hans"];
pub const FALLBACK_LANGUAGE: &str = "en";

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("catalog value at {0} is not a string")]
    NotString(String),
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
}

#[derive(Debug, Clone)]
pub struct CatalogTranslator {
    catalogs: HashMap<String, HashMap<String, String>>,
    supported: Vec<String>,
    current: String,
    fallback: String,
}

impl CatalogTranslator {
    /// Empty translator. `fallback` is added to `supported` if missing.
    pub fn new(supported: Vec<String>, fallback: impl Into<String>) -> Self {
        let fallback = fallback.into();
        let mut supported = supported;
        if !supported.contains(&fallback) {
            supported.push(fallback.clone());
        }
        Self {
            catalogs: HashMap::new(),
            supported,
            current: fallback.clone(),
            fallback,
        }
    }

    /// English strings for every core key.
    pub fn builtin() -> Self {
        let mut t = Self::new(
            SUPPORTED_LANGUAGES.iter().map(|s| s.to_string()).collect(),
            FALLBACK_LANGUAGE,
        );
        if let Err(e) = t.add_catalog_toml(FALLBACK_LANGUAGE, BUILTIN_EN) {
            warn!(error = %e, "builtin catalog failed to parse");
        }
        t
    }

    /// Merge a TOML catalog into `language`. Later entries overwrite earlier ones.
    pub fn add_catalog_toml(&mut self, language: &str, source: &str) -> Result<(), CatalogError> {
        if !self.supported.iter().any(|l| l == language) {
            return Err(CatalogError::UnsupportedLanguage(language.to_string()));
        }
        let table: toml::Table = source.parse()?;
        let mut flat = HashMap::new();
        flatten("", &table, &mut flat)?;
        self.catalogs
            .entry(language.to_string())
            .or_default()
            .extend(flat);
        Ok(())
    }

    pub fn load_catalog_file(&mut self, language: &str, path: &Path) -> Result<(), CatalogError> {
        let source = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        self.add_catalog_toml(language, &source)
    }

    /// Switch language. Unsupported codes are refused and the current one kept.
    pub fn change_language(&mut self, language: &str) -> bool {
        if !self.supported.iter().any(|l| l == language) {
            warn!(language, "unsupported language");
            return false;
        }
        self.current = language.to_string();
        true
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        [self.current.as_str(), self.fallback.as_str()]
            .into_iter()
            .filter_map(|lang| self.catalogs.get(lang))
            .find_map(|c| c.get(key))
            .map(String::as_str)
    }
}

fn flatten(
    prefix: &str,
    table: &toml::Table,
    out: &mut HashMap<String, String>,
) -> Result<(), CatalogError> {
    for (k, v) in table {
        let key = if prefix.is_empty() {
            k.clone()
        } else {
            format!("{prefix}.{k}")
        };
        match v {
            toml::Value::String(s) => {
                out.insert(key, s.clone());
            }
            toml::Value::Table(t) => flatten(&key, t, out)?,
            _ => return Err(CatalogError::NotString(key)),
        }
    }
    Ok(())
}

impl Translator for CatalogTranslator {
    fn translate(&self, key: &str) -> String {
        self.lookup(key).unwrap_or(key).to_string()
    }

    /// `count == 1` reads `<key>.singular`, anything else `<key>.plural`;
    /// either falls back to `<key>`. `{count}` is substituted.
    fn translate_count(&self, key: &str, count: i64) -> String {
        let plural_key = if count == 1 {
            format!("{key}.singular")
        } else {
            format!("{key}.plural")
        };
        let template = self
            .lookup(&plural_key)
            .or_else(|| self.lookup(key))
            .unwrap_or(key);
        template.replace("{count}", &count.to_string())
    }

    fn language(&self) -> &str {
        &self.current
    }

    fn supported_languages(&self) -> &[String] {
        &self.supported
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use willmeter_core::{WillPowerStatus, keys};

    #[test]
    fn builtin_covers_every_core_key() {
        let t = CatalogTranslator::builtin();
        for key in keys::ALL {
            let direct = t.translate(key);
            let counted = t.translate_count(key, 2);
            assert!(
                direct != *key || counted != *key,
                "missing builtin string for {key}"
            );
        }
    }

    #[test]
    fn builtin_parses_cleanly() {
        let mut t = CatalogTranslator::new(vec!["en".to_string()], "en");
        t.add_catalog_toml("en", BUILTIN_EN).unwrap();
    }

    #[test]
    fn status_keys_translate() {
        let t = CatalogTranslator::builtin();
        assert_eq!(
            t.translate(WillPowerStatus::High.localization_key()),
            "Excellent"
        );
        assert_eq!(
            t.translate(WillPowerStatus::Critical.localization_key()),
            "Critical"
        );
    }

    #[test]
    fn unknown_key_returns_key() {
        let t = CatalogTranslator::builtin();
        assert_eq!(t.translate("no.such.key"), "no.such.key");
    }

    #[test]
    fn plural_forms() {
        let t = CatalogTranslator::builtin();
        assert_eq!(t.translate_count(keys::task::COUNT, 1), "1 task");
        assert_eq!(t.translate_count(keys::task::COUNT, 0), "0 tasks");
        assert_eq!(t.translate_count(keys::task::COUNT, 5), "5 tasks");
    }

    #[test]
    fn plural_falls_back_to_base_key() {
        let mut t = CatalogTranslator::new(vec![], "en");
        t.add_catalog_toml("en", "[items]\nleft = \"{count} left\"").unwrap();
        assert_eq!(t.translate_count("items.left", 3), "3 left");
    }

    #[test]
    fn language_switch_and_fallback() {
        let mut t = CatalogTranslator::builtin();
        t.add_catalog_toml("ja", "[willpower.status]\nhigh = \"絶好調\"")
            .unwrap();

        assert!(t.change_language("ja"));
        assert_eq!(t.language(), "ja");
        assert_eq!(t.translate(keys::willpower::status::HIGH), "絶好調");
        // missing in ja, found in en
        assert_eq!(t.translate(keys::willpower::status::LOW), "Low");

        assert!(!t.change_language("fr"));
        assert_eq!(t.language(), "ja");
    }

    #[test]
    fn rejects_non_string_values() {
        let mut t = CatalogTranslator::new(vec![], "en");
        let err = t.add_catalog_toml("en", "[a]\nb = 3").unwrap_err();
        assert!(matches!(err, CatalogError::NotString(k) if k == "a.b"));
    }

    #[test]
    fn rejects_unsupported_catalog_language() {
        let mut t = CatalogTranslator::builtin();
        assert!(matches!(
            t.add_catalog_toml("fr", "a = \"b\""),
            Err(CatalogError::UnsupportedLanguage(_))
        ));
    }
}
