//! Willpower commands.
//!
//! The use-case only logs auto-save failures. A one-shot command has nobody
//! to read that log, so each command saves again and fails on error.

use anyhow::{Context, Result, bail};
use willmeter_core::{Translator, WillMeter, WillPowerStore};

pub async fn consume<S, T>(meter: &mut WillMeter<S, T>, amount: i32) -> Result<()>
where
    S: WillPowerStore,
    T: Translator,
{
    if !meter.consume(amount).await {
        bail!(
            "cannot consume {} (have {} of {})",
            amount,
            meter.current_value(),
            meter.max_value()
        );
    }
    meter.save().await.context("saving willpower")
}

pub async fn restore<S, T>(meter: &mut WillMeter<S, T>, amount: i32) -> Result<()>
where
    S: WillPowerStore,
    T: Translator,
{
    meter.restore(amount).await;
    meter.save().await.context("saving willpower")
}

pub async fn reset<S, T>(meter: &mut WillMeter<S, T>) -> Result<()>
where
    S: WillPowerStore,
    T: Translator,
{
    meter.reset().await;
    meter.save().await.context("saving willpower")
}

#[cfg(test)]
mod tests {
    use super::*;
    use willmeter_core::{KeyEcho, StoreError, WillPower};
    use willmeter_store::{JsonFileKv, KvWillPowerStore};

    fn file_meter(
        dir: &tempfile::TempDir,
        current: i32,
    ) -> WillMeter<KvWillPowerStore<JsonFileKv>, KeyEcho> {
        let store = KvWillPowerStore::new(JsonFileKv::new(dir.path().join("store.json")));
        WillMeter::with_will_power(WillPower::new(current, 100), store, KeyEcho::default())
    }

    async fn reopen(dir: &tempfile::TempDir) -> Result<WillPower, StoreError> {
        KvWillPowerStore::new(JsonFileKv::new(dir.path().join("store.json")))
            .load()
            .await
    }

    #[tokio::test]
    async fn consume_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut meter = file_meter(&dir, 100);

        consume(&mut meter, 30).await.unwrap();
        assert_eq!(reopen(&dir).await.unwrap().current_value(), 70);
    }

    #[tokio::test]
    async fn consume_over_budget_fails_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let mut meter = file_meter(&dir, 10);

        let err = consume(&mut meter, 30).await.unwrap_err();
        assert!(err.to_string().contains("cannot consume 30"));
        assert!(matches!(reopen(&dir).await, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn write_failure_fails_the_command() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("store.json.tmp")).unwrap();
        let mut meter = file_meter(&dir, 100);

        let err = consume(&mut meter, 30).await.unwrap_err();
        assert!(err.to_string().contains("saving willpower"));
        assert!(restore(&mut meter, 5).await.is_err());
        assert!(reset(&mut meter).await.is_err());
        assert!(matches!(reopen(&dir).await, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn restore_and_reset_persist() {
        let dir = tempfile::tempdir().unwrap();
        let mut meter = file_meter(&dir, 40);

        restore(&mut meter, 15).await.unwrap();
        assert_eq!(reopen(&dir).await.unwrap().current_value(), 55);

        reset(&mut meter).await.unwrap();
        assert_eq!(reopen(&dir).await.unwrap().current_value(), 100);
    }
}
