//! Tasks as a JSON array of `TaskRecord`s, in insertion order.

use std::path::{Path, PathBuf};

use tracing::debug;
use willmeter_core::{StoreResult, Task, TaskRecord, TaskStore};

use crate::json_file::{read_json, write_json};

#[derive(Debug, Clone)]
pub struct JsonTaskStore {
    path: PathBuf,
}

impl JsonTaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_records(&self) -> StoreResult<Vec<TaskRecord>> {
        read_json(&self.path).await
    }

    async fn write_records(&self, records: &[TaskRecord]) -> StoreResult<()> {
        write_json(&self.path, records).await
    }
}

impl TaskStore for JsonTaskStore {
    async fn all(&self) -> StoreResult<Vec<Task>> {
        Ok(self
            .read_records()
            .await?
            .into_iter()
            .map(Task::from_record)
            .collect())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Task>> {
        Ok(self
            .read_records()
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .map(Task::from_record))
    }

    async fn save(&self, task: &Task) -> StoreResult<()> {
        let mut records = self.read_records().await?;
        let record = task.to_record();
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => *slot = record,
            None => records.push(record),
        }
        self.write_records(&records).await?;
        debug!(task_id = task.id(), "saved task");
        Ok(())
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut records = self.read_records().await?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.write_records(&records).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use willmeter_core::{TaskCategory, TaskPriority, TaskStatus};

    fn store() -> (tempfile::TempDir, JsonTaskStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonTaskStore::new(dir.path().join("tasks.json"));
        (dir, store)
    }

    #[tokio::test]
    async fn empty_file_means_no_tasks() {
        let (_dir, store) = store();
        assert!(store.all().await.unwrap().is_empty());
        assert!(store.get("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn upsert_keeps_order_and_replaces() {
        let (_dir, store) = store();
        store.save(&Task::new("a", "first").with_cost(5)).await.unwrap();
        store.save(&Task::new("b", "second")).await.unwrap();

        let mut a = store.get("a").await.unwrap().unwrap();
        a.start();
        a.update_will_power_cost(12);
        store.save(&a).await.unwrap();

        let all = store.all().await.unwrap();
        let ids: Vec<&str> = all.iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(all[0].status(), TaskStatus::InProgress);
        assert_eq!(all[0].will_power_cost(), 12);
        assert!(all[0].started_at().is_some());
    }

    #[tokio::test]
    async fn failed_write_leaves_file_intact() {
        let (_dir, store) = store();
        store.save(&Task::new("a", "first")).await.unwrap();

        std::fs::create_dir(crate::json_file::tmp_path(store.path())).unwrap();
        let err = store.save(&Task::new("b", "second")).await.unwrap_err();
        assert!(matches!(err, willmeter_core::StoreError::Save(_)));

        let ids: Vec<String> = store
            .all()
            .await
            .unwrap()
            .iter()
            .map(|t| t.id().to_string())
            .collect();
        assert_eq!(ids, vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn delete_reports_presence() {
        let (_dir, store) = store();
        store.save(&Task::new("a", "x")).await.unwrap();
        assert!(store.delete("a").await.unwrap());
        assert!(!store.delete("a").await.unwrap());
        assert!(store.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_uses_stored_fields() {
        let (_dir, store) = store();
        store
            .save(
                &Task::new("w", "report")
                    .with_category(TaskCategory::Work)
                    .with_priority(TaskPriority::High),
            )
            .await
            .unwrap();
        let mut done = Task::new("h", "run").with_category(TaskCategory::Health);
        done.mark_as_completed();
        store.save(&done).await.unwrap();

        let completed = store.find(Some(TaskStatus::Completed), None).await.unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id(), "h");

        let work = store.find(None, Some(TaskCategory::Work)).await.unwrap();
        assert_eq!(work[0].priority, TaskPriority::High);
    }
}
