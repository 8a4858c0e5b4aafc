use anyhow::{Context, Result, bail};
use clap::Subcommand;
use std::time::Duration;
use willmeter_core::{
    Task, TaskCategory, TaskPriority, TaskStatus, TaskStore, Translator, WillMeter, WillPowerStore,
    keys,
};
use willmeter_store::JsonTaskStore;

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// Add a task (starts as pending)
    Add {
        title: String,

        /// Willpower cost (negative values clamp to 0)
        #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
        cost: i32,

        /// low | medium | high
        #[arg(long, default_value = "medium")]
        priority: TaskPriority,

        /// work | personal | health | learning | development | urgent | maintenance
        #[arg(long, default_value = "personal")]
        category: TaskCategory,

        #[arg(long)]
        description: Option<String>,

        /// Estimated duration in minutes
        #[arg(long)]
        minutes: Option<u64>,
    },

    /// List tasks, optionally filtered
    List {
        #[arg(long)]
        status: Option<TaskStatus>,

        #[arg(long)]
        category: Option<TaskCategory>,
    },

    /// pending | paused -> in_progress
    Start { id: String },

    /// in_progress -> paused
    Pause { id: String },

    /// paused -> in_progress
    Resume { id: String },

    /// Mark completed without spending willpower (see `willmeter perform`)
    Complete { id: String },

    Cancel { id: String },

    /// Change the willpower cost
    Cost {
        id: String,
        #[arg(allow_negative_numbers = true)]
        cost: i32,
    },

    /// Delete a task
    Remove { id: String },
}

pub async fn run(
    command: TaskCommand,
    store: &JsonTaskStore,
    translator: &impl Translator,
) -> Result<()> {
    match command {
        TaskCommand::Add {
            title,
            cost,
            priority,
            category,
            description,
            minutes,
        } => {
            let mut task = Task::new(Task::generate_id(), title)
                .with_cost(cost)
                .with_priority(priority)
                .with_category(category);
            if let Some(d) = description {
                task = task.with_description(d);
            }
            if let Some(m) = minutes {
                task = task.with_duration(Duration::from_secs(m * 60));
            }
            store.save(&task).await.context("saving task")?;
            println!("Added {}", task.id());
        }

        TaskCommand::List { status, category } => {
            let tasks = store.find(status, category).await.context("loading tasks")?;
            let count = translator.translate_count(keys::task::COUNT, tasks.len() as i64);
            println!("{count}\n");
            for t in &tasks {
                println!("{}", format_task(t, translator));
            }
        }

        TaskCommand::Start { id } => transition(store, &id, Task::start).await?,
        TaskCommand::Pause { id } => transition(store, &id, Task::pause).await?,
        TaskCommand::Resume { id } => transition(store, &id, Task::resume).await?,
        TaskCommand::Complete { id } => transition(store, &id, Task::mark_as_completed).await?,
        TaskCommand::Cancel { id } => transition(store, &id, Task::cancel).await?,

        TaskCommand::Cost { id, cost } => {
            let mut task = load_task(store, &id).await?;
            task.update_will_power_cost(cost);
            store.save(&task).await.context("saving task")?;
            println!("{} now costs {}", task.id(), task.will_power_cost());
        }

        TaskCommand::Remove { id } => {
            if !store.delete(&id).await.context("deleting task")? {
                bail!("no task with id {}", id);
            }
            println!("Removed {}", id);
        }
    }

    Ok(())
}

pub async fn load_task(store: &JsonTaskStore, id: &str) -> Result<Task> {
    store
        .get(id)
        .await
        .context("loading tasks")?
        .with_context(|| format!("no task with id {}", id))
}

/// Pending, in progress or paused.
pub fn is_open(t: &Task) -> bool {
    matches!(
        t.status(),
        TaskStatus::Pending | TaskStatus::InProgress | TaskStatus::Paused
    )
}

/// Pay for an open task and mark it completed, then persist both sides.
///
/// Willpower is written first. If the task write then fails, the error says
/// that the charge already landed.
pub async fn perform<S, T>(
    meter: &mut WillMeter<S, T>,
    store: &JsonTaskStore,
    id: &str,
) -> Result<Task>
where
    S: WillPowerStore,
    T: Translator,
{
    let mut task = load_task(store, id).await?;
    if !is_open(&task) {
        bail!(
            "{} is {}, only open tasks can be performed",
            task.title,
            task.status()
        );
    }
    if !meter.perform_task(&mut task).await {
        bail!(
            "not enough willpower for {}: costs {}, have {}",
            task.title,
            task.will_power_cost(),
            meter.current_value()
        );
    }
    meter.save().await.context("saving willpower")?;
    store.save(&task).await.with_context(|| {
        format!(
            "willpower was charged {} but task {} was not marked completed",
            task.will_power_cost(),
            id
        )
    })?;
    Ok(task)
}

async fn transition(store: &JsonTaskStore, id: &str, apply: fn(&mut Task)) -> Result<()> {
    let mut task = load_task(store, id).await?;
    let before = task.status();
    apply(&mut task);
    let after = task.status();

    let terminal = matches!(after, TaskStatus::Completed | TaskStatus::Cancelled);
    if before == after && !terminal {
        println!("{} stays {} (transition not allowed from {})", id, after, before);
        return Ok(());
    }
    store.save(&task).await.context("saving task")?;
    println!("{}: {} -> {}", id, before, after);
    Ok(())
}

pub fn format_task(t: &Task, translator: &impl Translator) -> String {
    let minutes = t
        .estimated_duration()
        .map(|d| format!(" | ~{}m", d.as_secs() / 60))
        .unwrap_or_default();
    format!(
        "- [{}] {} | cost={} | {} | {} | {}{}",
        translator.translate(t.status().localization_key()),
        t.title,
        t.will_power_cost(),
        translator.translate(t.priority.localization_key()),
        translator.translate(t.category.localization_key()),
        t.id(),
        minutes
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use willmeter_core::{KeyEcho, WillPower};
    use willmeter_store::MemoryWillPowerStore;

    type TestMeter = WillMeter<MemoryWillPowerStore, KeyEcho>;

    fn meter(current: i32) -> TestMeter {
        WillMeter::with_will_power(
            WillPower::new(current, 100),
            MemoryWillPowerStore::new(),
            KeyEcho::default(),
        )
    }

    async fn seeded_tasks(dir: &tempfile::TempDir, task: Task) -> JsonTaskStore {
        let store = JsonTaskStore::new(dir.path().join("tasks.json"));
        store.save(&task).await.unwrap();
        store
    }

    #[tokio::test]
    async fn perform_charges_and_completes_once() {
        let dir = tempfile::tempdir().unwrap();
        let tasks = seeded_tasks(&dir, Task::new("gym", "gym").with_cost(20)).await;
        let mut meter = meter(80);

        let done = perform(&mut meter, &tasks, "gym").await.unwrap();
        assert!(done.is_completed());
        assert_eq!(meter.current_value(), 60);
        assert_eq!(meter.store().load().await.unwrap().current_value(), 60);
        assert!(tasks.get("gym").await.unwrap().unwrap().is_completed());

        let err = perform(&mut meter, &tasks, "gym").await.unwrap_err();
        assert!(err.to_string().contains("only open tasks"));
        assert_eq!(meter.current_value(), 60);
    }

    #[tokio::test]
    async fn perform_refuses_closed_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let mut cancelled = Task::new("c", "skipped").with_cost(5);
        cancelled.cancel();
        let tasks = seeded_tasks(&dir, cancelled).await;
        let mut completed = Task::new("d", "done").with_cost(5);
        completed.mark_as_completed();
        tasks.save(&completed).await.unwrap();
        let mut meter = meter(50);

        assert!(perform(&mut meter, &tasks, "c").await.is_err());
        assert!(perform(&mut meter, &tasks, "d").await.is_err());
        assert_eq!(meter.current_value(), 50);
    }

    #[tokio::test]
    async fn perform_accepts_paused_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let mut paused = Task::new("p", "essay").with_cost(15);
        paused.start();
        paused.pause();
        let tasks = seeded_tasks(&dir, paused).await;
        let mut meter = meter(50);

        perform(&mut meter, &tasks, "p").await.unwrap();
        assert_eq!(meter.current_value(), 35);
    }

    #[tokio::test]
    async fn perform_unaffordable_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let tasks = seeded_tasks(&dir, Task::new("big", "move house").with_cost(90)).await;
        let mut meter = meter(40);

        let err = perform(&mut meter, &tasks, "big").await.unwrap_err();
        assert!(err.to_string().contains("not enough willpower"));
        assert_eq!(meter.current_value(), 40);
        assert!(!tasks.get("big").await.unwrap().unwrap().is_completed());
    }

    #[tokio::test]
    async fn perform_reports_task_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let tasks = seeded_tasks(&dir, Task::new("t", "taxes").with_cost(10)).await;
        std::fs::create_dir(dir.path().join("tasks.json.tmp")).unwrap();
        let mut meter = meter(50);

        let err = perform(&mut meter, &tasks, "t").await.unwrap_err();
        assert!(err.to_string().contains("willpower was charged 10"));
        assert!(!tasks.get("t").await.unwrap().unwrap().is_completed());
    }

    #[tokio::test]
    async fn perform_unknown_id() {
        let dir = tempfile::tempdir().unwrap();
        let tasks = JsonTaskStore::new(dir.path().join("tasks.json"));
        let err = perform(&mut meter(50), &tasks, "nope").await.unwrap_err();
        assert!(err.to_string().contains("no task with id nope"));
    }
}
