//! willmeter-store: file and in-memory gateways for willmeter-core

pub mod catalog;
mod json_file;
pub mod kv;
pub mod task_store;
pub mod willpower_store;

pub use catalog::{CatalogError, CatalogTranslator};
pub use kv::{JsonFileKv, KeyValueStore, MemoryKv};
pub use task_store::JsonTaskStore;
pub use willpower_store::{KvWillPowerStore, MemoryWillPowerStore};
