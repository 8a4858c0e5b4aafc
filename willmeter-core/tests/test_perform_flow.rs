use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use willmeter_core::{
    KeyEcho, StoreError, StoreResult, Task, TaskCategory, TaskPriority, TaskStatus, WillMeter,
    WillPower, WillPowerSnapshot, WillPowerStatus, WillPowerStore,
};

#[derive(Default)]
struct SnapshotStore {
    slot: Mutex<Option<WillPowerSnapshot>>,
}

impl WillPowerStore for SnapshotStore {
    async fn save(&self, will_power: &WillPower) -> StoreResult<()> {
        *self.slot.lock().unwrap() = Some(will_power.snapshot());
        Ok(())
    }

    async fn load(&self) -> StoreResult<WillPower> {
        self.slot
            .lock()
            .unwrap()
            .map(WillPower::from_snapshot)
            .ok_or(StoreError::NotFound)
    }
}

fn day_plan() -> Vec<Task> {
    vec![
        Task::new("inbox", "clear inbox")
            .with_cost(10)
            .with_priority(TaskPriority::Medium)
            .with_category(TaskCategory::Work),
        Task::new("gym", "leg day")
            .with_cost(40)
            .with_priority(TaskPriority::High)
            .with_category(TaskCategory::Health),
        Task::new("review", "code review")
            .with_cost(25)
            .with_priority(TaskPriority::High)
            .with_category(TaskCategory::Development),
        Task::new("taxes", "file taxes")
            .with_cost(80)
            .with_priority(TaskPriority::High)
            .with_category(TaskCategory::Urgent),
    ]
}

/// Fresh install: default willpower, work through suggestions until nothing fits.
#[tokio::test]
async fn test_day_of_work_from_fresh_install() {
    let mut meter = WillMeter::load(SnapshotStore::default(), KeyEcho::default())
        .await
        .unwrap();
    assert_eq!(meter.display_text(), "100 / 100");
    assert_eq!(meter.status(), WillPowerStatus::High);

    let notified = Arc::new(AtomicUsize::new(0));
    let n = Arc::clone(&notified);
    meter.subscribe(move |_| {
        n.fetch_add(1, Ordering::SeqCst);
    });

    let mut tasks = day_plan();

    let first: Vec<String> = meter
        .suggested_tasks(&tasks)
        .iter()
        .map(|t| t.id().to_string())
        .collect();
    assert_eq!(first, vec!["review", "gym", "taxes", "inbox"]);

    // perform best suggestion repeatedly
    loop {
        let next_id = {
            let pending: Vec<&Task> = tasks
                .iter()
                .filter(|t| !t.is_completed())
                .collect();
            match meter.suggested_tasks(pending).first() {
                Some(t) => t.id().to_string(),
                None => break,
            }
        };
        let task = tasks.iter_mut().find(|t| t.id() == next_id).unwrap();
        assert!(meter.perform_task(task).await);
    }

    // review(25) + gym(40) + inbox(10) = 75, taxes never affordable after that
    assert_eq!(meter.current_value(), 25);
    assert_eq!(meter.status(), WillPowerStatus::Low);
    assert_eq!(notified.load(Ordering::SeqCst), 3);

    let taxes = tasks.iter().find(|t| t.id() == "taxes").unwrap();
    assert_eq!(taxes.status(), TaskStatus::Pending);
    assert!(!meter.can_perform_task(taxes));

    let reloaded = meter.store().load().await.unwrap();
    assert_eq!(reloaded.current_value(), 25);
}

#[tokio::test]
async fn test_rest_restores_capacity() {
    let mut meter = WillMeter::load(SnapshotStore::default(), KeyEcho::default())
        .await
        .unwrap();
    assert!(meter.consume(95).await);
    assert!(meter.is_critical());

    let mut task = Task::new("walk", "walk").with_cost(30);
    assert!(!meter.perform_task(&mut task).await);

    meter.restore(25).await;
    assert!(meter.perform_task(&mut task).await);
    assert_eq!(meter.current_value(), 0);

    meter.reset().await;
    assert_eq!(meter.current_value(), 100);
}
