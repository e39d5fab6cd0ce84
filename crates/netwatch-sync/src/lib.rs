//! Ruleset synchronization: read the current rulesets back from the
//! service, plan the new rule text, and push it through a worker pool.

pub mod dispatch;
pub mod fetch;
pub mod plan;

#[cfg(test)]
pub(crate) mod testing;

pub use dispatch::{dispatch, SyncAction, SyncOutcome};
pub use fetch::{fetch_rulesets, Rulesets};
pub use plan::{build_tasks, current_domains, plan, SyncPlan};
