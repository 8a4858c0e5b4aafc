//! Whole-file JSON documents shared by the file-backed stores.
//!
//! A missing or blank file reads as `T::default()`. Writes go to a sibling
//! `.tmp` file that is then renamed over the target, so readers never see a
//! half-written document.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use willmeter_core::{StoreError, StoreResult};

pub(crate) async fn read_json<T>(path: &Path) -> StoreResult<T>
where
    T: DeserializeOwned + Default,
{
    let s = match tokio::fs::read_to_string(path).await {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => {
            return Err(StoreError::Load(format!("read {}: {e}", path.display())));
        }
    };
    if s.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(&s)
        .map_err(|e| StoreError::InvalidData(format!("parse {}: {e}", path.display())))
}

pub(crate) async fn write_json<T>(path: &Path, value: &T) -> StoreResult<()>
where
    T: Serialize + ?Sized,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Save(format!("create {}: {e}", parent.display())))?;
        }
    }
    let json =
        serde_json::to_string_pretty(value).map_err(|e| StoreError::Save(e.to_string()))?;

    let tmp = tmp_path(path);
    tokio::fs::write(&tmp, json)
        .await
        .map_err(|e| StoreError::Save(format!("write {}: {e}", tmp.display())))?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| StoreError::Save(format!("rename to {}: {e}", path.display())))?;
    Ok(())
}

/// `store.json` -> `store.json.tmp`.
pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
