//! WillPower persistence.
//!
//! On-disk shape (v1): `"willpower_data_v1": {"current": c, "max": m}`.
//! Older installs wrote two bare integers under `current_willpower` and
//! `max_willpower`; those are read when v1 is missing or unreadable and then
//! copied forward under the v1 key.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};
use willmeter_core::{StoreError, StoreResult, WillPower, WillPowerSnapshot, WillPowerStore};

use crate::kv::KeyValueStore;

pub const VERSIONED_KEY: &str = "willpower_data_v1";
pub const LEGACY_CURRENT_KEY: &str = "current_willpower";
pub const LEGACY_MAX_KEY: &str = "max_willpower";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct VersionedRecord {
    current: i32,
    max: i32,
}

fn int_value(v: Option<&Value>) -> i32 {
    v.and_then(Value::as_i64)
        .and_then(|n| i32::try_from(n).ok())
        .unwrap_or(0)
}

#[derive(Debug)]
pub struct KvWillPowerStore<K> {
    kv: K,
}

impl<K: KeyValueStore> KvWillPowerStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }

    async fn load_versioned(&self) -> StoreResult<Option<VersionedRecord>> {
        let Some(value) = self.kv.get(VERSIONED_KEY).await? else {
            return Ok(None);
        };
        match serde_json::from_value::<VersionedRecord>(value) {
            Ok(r) => Ok(Some(r)),
            Err(e) => {
                warn!(
                    error = %e,
                    key = VERSIONED_KEY,
                    "unreadable willpower record, trying legacy keys"
                );
                Ok(None)
            }
        }
    }

    async fn load_legacy(&self) -> StoreResult<Option<VersionedRecord>> {
        let Some(current) = self.kv.get(LEGACY_CURRENT_KEY).await? else {
            return Ok(None);
        };
        let max = self.kv.get(LEGACY_MAX_KEY).await?;
        Ok(Some(VersionedRecord {
            current: int_value(Some(&current)),
            max: int_value(max.as_ref()),
        }))
    }

    async fn write_versioned(&self, record: VersionedRecord) -> StoreResult<()> {
        let value =
            serde_json::to_value(record).map_err(|e| StoreError::Save(e.to_string()))?;
        self.kv.set(VERSIONED_KEY, value).await
    }
}

impl<K: KeyValueStore> WillPowerStore for KvWillPowerStore<K> {
    async fn save(&self, will_power: &WillPower) -> StoreResult<()> {
        let record = VersionedRecord {
            current: will_power.current_value(),
            max: will_power.max_value(),
        };
        self.write_versioned(record).await?;
        debug!(current = record.current, max = record.max, "saved willpower");
        Ok(())
    }

    async fn load(&self) -> StoreResult<WillPower> {
        let record = match self.load_versioned().await? {
            Some(r) => r,
            None => match self.load_legacy().await? {
                Some(r) => {
                    info!(
                        current = r.current,
                        max = r.max,
                        "migrating legacy willpower keys"
                    );
                    if let Err(e) = self.write_versioned(r).await {
                        warn!(error = %e, "could not write migrated willpower record");
                    }
                    r
                }
                None => return Err(StoreError::NotFound),
            },
        };

        if record.max <= 0 {
            return Ok(self.create_default());
        }
        Ok(WillPower::new(record.current, record.max))
    }
}

/// Process-local store. Empty until the first save.
#[derive(Debug, Default)]
pub struct MemoryWillPowerStore {
    slot: Mutex<Option<WillPowerSnapshot>>,
}

impl MemoryWillPowerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WillPowerStore for MemoryWillPowerStore {
    async fn save(&self, will_power: &WillPower) -> StoreResult<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| StoreError::Save(e.to_string()))?;
        *slot = Some(will_power.snapshot());
        Ok(())
    }

    async fn load(&self) -> StoreResult<WillPower> {
        let slot = self
            .slot
            .lock()
            .map_err(|e| StoreError::Load(e.to_string()))?;
        match *slot {
            Some(s) if s.max_value <= 0 => Ok(self.create_default()),
            Some(s) => Ok(WillPower::from_snapshot(s)),
            None => Err(StoreError::NotFound),
        }
    }
}
