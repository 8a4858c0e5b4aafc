//! Localization keys. The core only hands these to a `Translator`; the
//! strings themselves live in catalogs outside this crate.

pub mod willpower {
    pub const TITLE: &str = "willpower.title";
    pub const CURRENT_VALUE: &str = "willpower.current.value";
    pub const MAX_VALUE: &str = "willpower.max.value";
    pub const PERCENTAGE: &str = "willpower.percentage";

    pub mod status {
        pub const HIGH: &str = "willpower.status.high";
        pub const MEDIUM: &str = "willpower.status.medium";
        pub const LOW: &str = "willpower.status.low";
        pub const CRITICAL: &str = "willpower.status.critical";
    }

    pub mod action {
        pub const CONSUME: &str = "willpower.action.consume";
        pub const RESTORE: &str = "willpower.action.restore";
        pub const RESET: &str = "willpower.action.reset";
    }
}

pub mod task {
    pub const COUNT: &str = "task.count";

    pub mod status {
        pub const PENDING: &str = "task.status.pending";
        pub const IN_PROGRESS: &str = "task.status.in_progress";
        pub const COMPLETED: &str = "task.status.completed";
        pub const CANCELLED: &str = "task.status.cancelled";
        pub const PAUSED: &str = "task.status.paused";
    }

    pub mod priority {
        pub const LOW: &str = "task.priority.low";
        pub const MEDIUM: &str = "task.priority.medium";
        pub const HIGH: &str = "task.priority.high";
    }

    pub mod category {
        pub const WORK: &str = "task.category.work";
        pub const PERSONAL: &str = "task.category.personal";
        pub const HEALTH: &str = "task.category.health";
        pub const LEARNING: &str = "task.category.learning";
        pub const DEVELOPMENT: &str = "task.category.development";
        pub const URGENT: &str = "task.category.urgent";
        pub const MAINTENANCE: &str = "task.category.maintenance";
    }
}

pub mod recommendation {
    pub const HIGH: &str = "recommendation.high";
    pub const MEDIUM: &str = "recommendation.medium";
    pub const LOW: &str = "recommendation.low";
    pub const CRITICAL: &str = "recommendation.critical";
}

/// Every key above, for catalog completeness checks.
pub const ALL: &[&str] = &[
    willpower::TITLE,
    willpower::CURRENT_VALUE,
    willpower::MAX_VALUE,
    willpower::PERCENTAGE,
    willpower::status::HIGH,
    willpower::status::MEDIUM,
    willpower::status::LOW,
    willpower::status::CRITICAL,
    willpower::action::CONSUME,
    willpower::action::RESTORE,
    willpower::action::RESET,
    task::COUNT,
    task::status::PENDING,
    task::status::IN_PROGRESS,
    task::status::COMPLETED,
    task::status::CANCELLED,
    task::status::PAUSED,
    task::priority::LOW,
    task::priority::MEDIUM,
    task::priority::HIGH,
    task::category::WORK,
    task::category::PERSONAL,
    task::category::HEALTH,
    task::category::LEARNING,
    task::category::DEVELOPMENT,
    task::category::URGENT,
    task::category::MAINTENANCE,
    recommendation::HIGH,
    recommendation::MEDIUM,
    recommendation::LOW,
    recommendation::CRITICAL,
];
