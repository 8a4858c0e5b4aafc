//! willmeter-core: willpower accounting, task lifecycle, and suggestion rules

pub mod gateway;
pub mod keys;
pub mod notifier;
pub mod selector;
pub mod session;
pub mod task;
pub mod willpower;

pub use gateway::{KeyEcho, StoreError, StoreResult, TaskStore, Translator, WillPowerStore};
pub use notifier::{ChangeNotifier, ObserverId};
pub use selector::suggest;
pub use session::WillMeter;
pub use task::{ParseTaskFieldError, Task, TaskCategory, TaskPriority, TaskRecord, TaskStatus};
pub use willpower::{DEFAULT_WILLPOWER, WillPower, WillPowerSnapshot, WillPowerStatus};
