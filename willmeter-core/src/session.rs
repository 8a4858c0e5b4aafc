//! WillMeter: coordinating layer over one WillPower, its store, and a translator.
//!
//! Entity mutations stay synchronous; persistence follows each accepted change
//! as an auto-save whose failure is logged and swallowed. Loading treats an
//! empty store as a first run and substitutes the store's default.

use tracing::{debug, info, warn};

use crate::gateway::{StoreError, StoreResult, Translator, WillPowerStore};
use crate::notifier::ObserverId;
use crate::selector;
use crate::task::Task;
use crate::willpower::{WillPower, WillPowerStatus};

#[derive(Debug)]
pub struct WillMeter<S, T> {
    store: S,
    translator: T,
    will_power: WillPower,
}

impl<S: WillPowerStore, T: Translator> WillMeter<S, T> {
    /// Load from `store`, falling back to `store.create_default()` when
    /// nothing has been saved yet. Any other store error is returned.
    pub async fn load(store: S, translator: T) -> StoreResult<Self> {
        let will_power = match store.load().await {
            Ok(wp) => wp,
            Err(StoreError::NotFound) => {
                info!("no saved willpower, starting from default");
                store.create_default()
            }
            Err(e) => return Err(e),
        };
        Ok(Self::with_will_power(will_power, store, translator))
    }

    pub fn with_will_power(will_power: WillPower, store: S, translator: T) -> Self {
        Self {
            store,
            translator,
            will_power,
        }
    }

    pub fn will_power(&self) -> &WillPower {
        &self.will_power
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn translator(&self) -> &T {
        &self.translator
    }

    pub fn current_value(&self) -> i32 {
        self.will_power.current_value()
    }

    pub fn max_value(&self) -> i32 {
        self.will_power.max_value()
    }

    pub fn percentage(&self) -> f64 {
        self.will_power.percentage()
    }

    pub fn status(&self) -> WillPowerStatus {
        self.will_power.status()
    }

    pub fn subscribe<F>(&mut self, callback: F) -> ObserverId
    where
        F: Fn(&WillPower) + Send + Sync + 'static,
    {
        self.will_power.add_observer(callback)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.will_power.remove_observer(id)
    }

    /// Saves only when the consume went through.
    pub async fn consume(&mut self, amount: i32) -> bool {
        let ok = self.will_power.consume(amount);
        if ok {
            debug!(
                amount,
                current = self.will_power.current_value(),
                "consumed willpower"
            );
            self.auto_save().await;
        }
        ok
    }

    pub async fn restore(&mut self, amount: i32) {
        self.will_power.restore(amount);
        debug!(
            amount,
            current = self.will_power.current_value(),
            "restored willpower"
        );
        self.auto_save().await;
    }

    pub async fn reset(&mut self) {
        self.will_power.reset();
        debug!(current = self.will_power.current_value(), "reset willpower");
        self.auto_save().await;
    }

    /// Explicit save that reports failure, unlike the auto-save after mutations.
    pub async fn save(&self) -> StoreResult<()> {
        self.store.save(&self.will_power).await
    }

    async fn auto_save(&self) {
        if let Err(e) = self.save().await {
            warn!(error = %e, "auto-save failed");
        }
    }

    pub fn can_perform_task(&self, task: &Task) -> bool {
        task.can_be_performed(&self.will_power)
    }

    /// Pay for `task` and mark it completed, as one step.
    ///
    /// Returns false, with neither side touched, when the task is unaffordable.
    pub async fn perform_task(&mut self, task: &mut Task) -> bool {
        if !self.can_perform_task(task) {
            return false;
        }
        if !self.will_power.consume(task.will_power_cost()) {
            return false;
        }
        task.mark_as_completed();
        debug!(
            task_id = task.id(),
            cost = task.will_power_cost(),
            "performed task"
        );
        self.auto_save().await;
        true
    }

    pub fn suggested_tasks<'a, I>(&self, tasks: I) -> Vec<&'a Task>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        selector::suggest(tasks, &self.will_power)
    }

    /// `"<current> / <max>"`.
    pub fn display_text(&self) -> String {
        format!("{} / {}", self.current_value(), self.max_value())
    }

    /// Translated status name with the whole percent, e.g. `"Low (20%)"`.
    pub fn status_text(&self) -> String {
        let name = self.translator.translate(self.status().localization_key());
        format!("{name} ({}%)", self.whole_percent())
    }

    /// Floor of the percentage, computed in integers so 29/100 reads 29.
    pub fn whole_percent(&self) -> i64 {
        let max = i64::from(self.max_value());
        if max <= 0 {
            return 0;
        }
        i64::from(self.current_value()) * 100 / max
    }

    pub fn recommended_action(&self) -> String {
        self.translator.translate(self.status().recommendation_key())
    }

    pub fn is_low(&self) -> bool {
        matches!(self.status(), WillPowerStatus::Low | WillPowerStatus::Critical)
    }

    pub fn is_critical(&self) -> bool {
        self.status() == WillPowerStatus::Critical
    }
}
