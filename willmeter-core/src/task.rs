//! Task model: a unit of work with a willpower cost and a small lifecycle.
//!
//! Lifecycle:
//! - `start`: pending | paused -> in_progress (stamps `started_at` once)
//! - `pause`: in_progress -> paused
//! - `resume`: paused -> in_progress
//! - `mark_as_completed`: any -> completed (re-stamps `completed_at`)
//! - `cancel`: any -> cancelled
//!
//! Guarded calls from the wrong state do nothing and notify nobody.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::keys;
use crate::notifier::{ChangeNotifier, ObserverId};
use crate::willpower::WillPower;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown task {kind}: {value:?}")]
pub struct ParseTaskFieldError {
    kind: &'static str,
    value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
    Paused,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
            TaskStatus::Paused => "paused",
        }
    }

    pub fn localization_key(&self) -> &'static str {
        match self {
            TaskStatus::Pending => keys::task::status::PENDING,
            TaskStatus::InProgress => keys::task::status::IN_PROGRESS,
            TaskStatus::Completed => keys::task::status::COMPLETED,
            TaskStatus::Cancelled => keys::task::status::CANCELLED,
            TaskStatus::Paused => keys::task::status::PAUSED,
        }
    }
}

impl FromStr for TaskStatus {
    type Err = ParseTaskFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            "cancelled" => Ok(TaskStatus::Cancelled),
            "paused" => Ok(TaskStatus::Paused),
            _ => Err(ParseTaskFieldError { kind: "status", value: s.to_string() }),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low = 1,
    Medium = 2,
    High = 3,
}

impl TaskPriority {
    pub fn value(&self) -> i32 {
        *self as i32
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }

    pub fn localization_key(&self) -> &'static str {
        match self {
            TaskPriority::Low => keys::task::priority::LOW,
            TaskPriority::Medium => keys::task::priority::MEDIUM,
            TaskPriority::High => keys::task::priority::HIGH,
        }
    }
}

impl FromStr for TaskPriority {
    type Err = ParseTaskFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" | "1" => Ok(TaskPriority::Low),
            "medium" | "2" => Ok(TaskPriority::Medium),
            "high" | "3" => Ok(TaskPriority::High),
            _ => Err(ParseTaskFieldError { kind: "priority", value: s.to_string() }),
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Work,
    Personal,
    Health,
    Learning,
    Development,
    Urgent,
    Maintenance,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 7] = [
        TaskCategory::Work,
        TaskCategory::Personal,
        TaskCategory::Health,
        TaskCategory::Learning,
        TaskCategory::Development,
        TaskCategory::Urgent,
        TaskCategory::Maintenance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Work => "work",
            TaskCategory::Personal => "personal",
            TaskCategory::Health => "health",
            TaskCategory::Learning => "learning",
            TaskCategory::Development => "development",
            TaskCategory::Urgent => "urgent",
            TaskCategory::Maintenance => "maintenance",
        }
    }

    pub fn localization_key(&self) -> &'static str {
        match self {
            TaskCategory::Work => keys::task::category::WORK,
            TaskCategory::Personal => keys::task::category::PERSONAL,
            TaskCategory::Health => keys::task::category::HEALTH,
            TaskCategory::Learning => keys::task::category::LEARNING,
            TaskCategory::Development => keys::task::category::DEVELOPMENT,
            TaskCategory::Urgent => keys::task::category::URGENT,
            TaskCategory::Maintenance => keys::task::category::MAINTENANCE,
        }
    }
}

impl FromStr for TaskCategory {
    type Err = ParseTaskFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        TaskCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or(ParseTaskFieldError { kind: "category", value: s.to_string() })
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serializable form of a [`Task`]. Observers are not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub will_power_cost: i32,
    pub priority: TaskPriority,
    pub category: TaskCategory,
    pub status: TaskStatus,
    /// Whole seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration_secs: Option<u64>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub struct Task {
    id: String,
    pub title: String,
    pub description: Option<String>,
    will_power_cost: i32,
    pub priority: TaskPriority,
    pub category: TaskCategory,
    status: TaskStatus,
    estimated_duration: Option<Duration>,

    created_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,

    observers: ChangeNotifier<Task>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            will_power_cost: 0,
            priority: TaskPriority::Medium,
            category: TaskCategory::Personal,
            status: TaskStatus::Pending,
            estimated_duration: None,
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
            observers: ChangeNotifier::new(),
        }
    }

    /// Fresh random id (UUID v4).
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    pub fn with_cost(mut self, cost: i32) -> Self {
        self.will_power_cost = cost.max(0);
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_category(mut self, category: TaskCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.estimated_duration = Some(duration);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn will_power_cost(&self) -> i32 {
        self.will_power_cost
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn estimated_duration(&self) -> Option<Duration> {
        self.estimated_duration
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    pub fn priority_score(&self) -> i32 {
        self.priority.value()
    }

    pub fn add_observer<F>(&mut self, callback: F) -> ObserverId
    where
        F: Fn(&Task) + Send + Sync + 'static,
    {
        self.observers.add_observer(callback)
    }

    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.remove_observer(id)
    }

    pub fn start(&mut self) {
        if !matches!(self.status, TaskStatus::Pending | TaskStatus::Paused) {
            return;
        }
        self.status = TaskStatus::InProgress;
        if self.started_at.is_none() {
            self.started_at = Some(Utc::now());
        }
        self.observers.notify(self);
    }

    // Accepted from every state, terminal ones included.
    pub fn mark_as_completed(&mut self) {
        self.status = TaskStatus::Completed;
        self.completed_at = Some(Utc::now());
        self.observers.notify(self);
    }

    pub fn cancel(&mut self) {
        self.status = TaskStatus::Cancelled;
        self.observers.notify(self);
    }

    pub fn pause(&mut self) {
        if self.status != TaskStatus::InProgress {
            return;
        }
        self.status = TaskStatus::Paused;
        self.observers.notify(self);
    }

    pub fn resume(&mut self) {
        if self.status != TaskStatus::Paused {
            return;
        }
        self.status = TaskStatus::InProgress;
        self.observers.notify(self);
    }

    pub fn set_estimated_duration(&mut self, duration: Duration) {
        self.estimated_duration = Some(duration);
    }

    pub fn can_be_performed(&self, will_power: &WillPower) -> bool {
        will_power.can_perform_task(self.will_power_cost)
    }

    /// Plain field write: clamps to zero, does not notify.
    pub fn update_will_power_cost(&mut self, new_cost: i32) {
        self.will_power_cost = new_cost.max(0);
    }

    pub fn to_record(&self) -> TaskRecord {
        TaskRecord {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            will_power_cost: self.will_power_cost,
            priority: self.priority,
            category: self.category,
            status: self.status,
            estimated_duration_secs: self.estimated_duration.map(|d| d.as_secs()),
            created_at: self.created_at,
            started_at: self.started_at,
            completed_at: self.completed_at,
        }
    }

    /// Rebuild a task from storage. Status and timestamps are taken as-is.
    pub fn from_record(record: TaskRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            will_power_cost: record.will_power_cost.max(0),
            priority: record.priority,
            category: record.category,
            status: record.status,
            estimated_duration: record.estimated_duration_secs.map(Duration::from_secs),
            created_at: record.created_at,
            started_at: record.started_at,
            completed_at: record.completed_at,
            observers: ChangeNotifier::new(),
        }
    }
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        Task::from_record(record)
    }
}
