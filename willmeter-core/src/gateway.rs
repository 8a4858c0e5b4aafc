//! External gateways the core depends on but does not implement.
//!
//! Concrete stores and translators live in `willmeter-store`.

use crate::task::{Task, TaskCategory, TaskStatus};
use crate::willpower::{DEFAULT_WILLPOWER, WillPower};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no stored data")]
    NotFound,
    #[error("save failed: {0}")]
    Save(String),
    #[error("load failed: {0}")]
    Load(String),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for the single WillPower value.
///
/// Contract: after `save(c, m)`, `load` yields `(c, m)` unless `m` is zero or
/// missing, in which case it yields `create_default()`. An empty store answers
/// `StoreError::NotFound`.
#[allow(async_fn_in_trait)]
pub trait WillPowerStore {
    async fn save(&self, will_power: &WillPower) -> StoreResult<()>;

    async fn load(&self) -> StoreResult<WillPower>;

    fn create_default(&self) -> WillPower {
        WillPower::from_snapshot(DEFAULT_WILLPOWER)
    }
}

/// Persistence for tasks, keyed by id.
#[allow(async_fn_in_trait)]
pub trait TaskStore {
    async fn all(&self) -> StoreResult<Vec<Task>>;

    async fn get(&self, id: &str) -> StoreResult<Option<Task>>;

    /// Insert or replace by id.
    async fn save(&self, task: &Task) -> StoreResult<()>;

    /// Returns whether a task was removed.
    async fn delete(&self, id: &str) -> StoreResult<bool>;

    /// `None` matches everything for that field.
    async fn find(
        &self,
        status: Option<TaskStatus>,
        category: Option<TaskCategory>,
    ) -> StoreResult<Vec<Task>> {
        let tasks = self.all().await?;
        Ok(tasks
            .into_iter()
            .filter(|t| status.is_none_or(|s| t.status() == s))
            .filter(|t| category.is_none_or(|c| t.category == c))
            .collect())
    }
}

/// Key -> display string lookup.
pub trait Translator {
    fn translate(&self, key: &str) -> String;

    /// Pluralized lookup for a quantity.
    fn translate_count(&self, key: &str, count: i64) -> String;

    fn language(&self) -> &str;

    fn supported_languages(&self) -> &[String];
}

/// Translator that answers every key with itself.
#[derive(Debug, Clone, Default)]
pub struct KeyEcho {
    languages: Vec<String>,
}

impl Translator for KeyEcho {
    fn translate(&self, key: &str) -> String {
        key.to_string()
    }

    fn translate_count(&self, key: &str, count: i64) -> String {
        format!("{key} {count}")
    }

    fn language(&self) -> &str {
        "und"
    }

    fn supported_languages(&self) -> &[String] {
        &self.languages
    }
}
