//! Task suggestion: which tasks can be afforded right now, best first.
//!
//! Algorithm (deterministic):
//! 1) keep tasks whose cost the willpower can cover
//! 2) rank by priority DESC then cost ASC
//! 3) stable sort, so full ties keep input order

use crate::task::Task;
use crate::willpower::WillPower;

pub fn suggest<'a, I>(tasks: I, will_power: &WillPower) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut candidates: Vec<&Task> = tasks
        .into_iter()
        .filter(|t| will_power.can_perform_task(t.will_power_cost()))
        .collect();

    candidates.sort_by(|a, b| {
        // priority desc
        b.priority
            .cmp(&a.priority)
            // then cheapest first
            .then_with(|| a.will_power_cost().cmp(&b.will_power_cost()))
    });

    candidates
}
