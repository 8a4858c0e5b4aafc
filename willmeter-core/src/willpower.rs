//! WillPower: bounded counter with derived percentage and status band.

use serde::{Deserialize, Serialize};

use crate::keys;
use crate::notifier::{ChangeNotifier, ObserverId};

/// Starting willpower for a fresh install or an unreadable store.
pub const DEFAULT_WILLPOWER: WillPowerSnapshot = WillPowerSnapshot {
    current_value: 100,
    max_value: 100,
};

/// Four-level banding of [`WillPower::percentage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WillPowerStatus {
    High,
    Medium,
    Low,
    Critical,
}

impl WillPowerStatus {
    pub const ALL: [WillPowerStatus; 4] = [
        WillPowerStatus::High,
        WillPowerStatus::Medium,
        WillPowerStatus::Low,
        WillPowerStatus::Critical,
    ];

    /// `>= 0.7` high, `>= 0.3` medium, `>= 0.1` low, anything else critical.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 0.7 {
            WillPowerStatus::High
        } else if percentage >= 0.3 {
            WillPowerStatus::Medium
        } else if percentage >= 0.1 {
            WillPowerStatus::Low
        } else {
            WillPowerStatus::Critical
        }
    }

    pub fn localization_key(&self) -> &'static str {
        match self {
            WillPowerStatus::High => keys::willpower::status::HIGH,
            WillPowerStatus::Medium => keys::willpower::status::MEDIUM,
            WillPowerStatus::Low => keys::willpower::status::LOW,
            WillPowerStatus::Critical => keys::willpower::status::CRITICAL,
        }
    }

    pub fn recommendation_key(&self) -> &'static str {
        match self {
            WillPowerStatus::High => keys::recommendation::HIGH,
            WillPowerStatus::Medium => keys::recommendation::MEDIUM,
            WillPowerStatus::Low => keys::recommendation::LOW,
            WillPowerStatus::Critical => keys::recommendation::CRITICAL,
        }
    }
}

/// Plain value form of a [`WillPower`], used by stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WillPowerSnapshot {
    pub current_value: i32,
    pub max_value: i32,
}

/// The user's remaining willpower.
///
/// Invariant: `0 <= current_value <= max_value`. Invalid input is rejected by
/// return value (`consume`) or ignored (`restore`), never by panicking.
#[derive(Debug)]
pub struct WillPower {
    current_value: i32,
    max_value: i32,
    observers: ChangeNotifier<WillPower>,
}

impl WillPower {
    /// A negative `max_value` is treated as zero; `current_value` is clamped into range.
    pub fn new(current_value: i32, max_value: i32) -> Self {
        let max_value = max_value.max(0);
        Self {
            current_value: current_value.clamp(0, max_value),
            max_value,
            observers: ChangeNotifier::new(),
        }
    }

    pub fn from_snapshot(snapshot: WillPowerSnapshot) -> Self {
        Self::new(snapshot.current_value, snapshot.max_value)
    }

    pub fn snapshot(&self) -> WillPowerSnapshot {
        WillPowerSnapshot {
            current_value: self.current_value,
            max_value: self.max_value,
        }
    }

    pub fn current_value(&self) -> i32 {
        self.current_value
    }

    pub fn max_value(&self) -> i32 {
        self.max_value
    }

    pub fn percentage(&self) -> f64 {
        if self.max_value <= 0 {
            return 0.0;
        }
        f64::from(self.current_value) / f64::from(self.max_value)
    }

    pub fn status(&self) -> WillPowerStatus {
        WillPowerStatus::from_percentage(self.percentage())
    }

    pub fn add_observer<F>(&mut self, callback: F) -> ObserverId
    where
        F: Fn(&WillPower) + Send + Sync + 'static,
    {
        self.observers.add_observer(callback)
    }

    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.remove_observer(id)
    }

    /// Spend `amount`. Returns false without touching state if `amount` is
    /// negative or more than what is left.
    pub fn consume(&mut self, amount: i32) -> bool {
        if amount < 0 || amount > self.current_value {
            return false;
        }
        self.current_value -= amount;
        self.observers.notify(self);
        true
    }

    /// Add `amount`, capped at `max_value`. Negative amounts are ignored.
    ///
    /// Observers hear about every non-negative restore, including ones that
    /// the cap swallows entirely.
    pub fn restore(&mut self, amount: i32) {
        if amount < 0 {
            return;
        }
        self.current_value = self
            .current_value
            .saturating_add(amount)
            .min(self.max_value);
        self.observers.notify(self);
    }

    pub fn can_perform_task(&self, cost: i32) -> bool {
        cost >= 0 && self.current_value >= cost
    }

    pub fn reset(&mut self) {
        self.restore(self.max_value - self.current_value);
    }
}

impl Default for WillPower {
    fn default() -> Self {
        Self::from_snapshot(DEFAULT_WILLPOWER)
    }
}

impl From<WillPowerSnapshot> for WillPower {
    fn from(snapshot: WillPowerSnapshot) -> Self {
        Self::from_snapshot(snapshot)
    }
}
