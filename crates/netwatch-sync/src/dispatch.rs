use std::fmt;

use futures::future::join_all;
use netwatch_core::config::ruleset_link;
use netwatch_core::types::SyncTask;
use serde::Serialize;
use tokio::sync::{mpsc, Mutex};
use vt_hunting::{HuntingApi, NewRuleset};

// ---------------------------------------------------------------------------
// SyncOutcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncAction {
    Update,
    Create,
}

/// What happened to one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncOutcome {
    Updated {
        name: String,
        id: String,
    },
    Created {
        name: String,
        id: String,
    },
    Failed {
        name: String,
        action: SyncAction,
        message: String,
    },
}

impl SyncOutcome {
    pub fn name(&self) -> &str {
        match self {
            SyncOutcome::Updated { name, .. }
            | SyncOutcome::Created { name, .. }
            | SyncOutcome::Failed { name, .. } => name,
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, SyncOutcome::Failed { .. })
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncOutcome::Updated { name, id } => {
                write!(f, "Ruleset {name} [{}] updated.", ruleset_link(id))
            }
            SyncOutcome::Created { name, id } => {
                write!(f, "Ruleset {name} [{}] created.", ruleset_link(id))
            }
            SyncOutcome::Failed {
                name,
                action: SyncAction::Update,
                message,
            } => write!(f, "Error updating {name}: {message}"),
            SyncOutcome::Failed {
                name,
                action: SyncAction::Create,
                message,
            } => write!(f, "Error saving {name}: {message}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Push every task through `workers` cooperative workers and wait for all of
/// them to finish.
///
/// Tasks are queued in order on a closed channel; each worker pulls the next
/// task until the queue is empty. Workers run concurrently on the calling
/// task and interleave only while awaiting the API. A failed write is
/// recorded as [`SyncOutcome::Failed`] and never stops the other workers.
/// Outcomes are returned in completion order.
pub async fn dispatch<A: HuntingApi>(
    api: &A,
    tasks: Vec<SyncTask>,
    workers: usize,
    tag: &str,
) -> Vec<SyncOutcome> {
    let total = tasks.len();
    let (tx, rx) = mpsc::channel(total.max(1));
    for task in tasks {
        // Capacity covers every task and the receiver is still alive.
        if tx.send(task).await.is_err() {
            break;
        }
    }
    drop(tx);

    let queue = Mutex::new(rx);
    let outcomes = Mutex::new(Vec::with_capacity(total));
    let pool = (0..workers.max(1)).map(|worker| run_worker(worker, api, &queue, &outcomes, tag));
    join_all(pool).await;

    outcomes.into_inner()
}

async fn run_worker<A: HuntingApi>(
    worker: usize,
    api: &A,
    queue: &Mutex<mpsc::Receiver<SyncTask>>,
    outcomes: &Mutex<Vec<SyncOutcome>>,
    tag: &str,
) {
    loop {
        let Some(task) = queue.lock().await.recv().await else {
            break;
        };
        let outcome = push_task(api, task, tag).await;
        tracing::debug!(worker, name = outcome.name(), ok = outcome.is_success(), "task done");
        outcomes.lock().await.push(outcome);
    }
}

async fn push_task<A: HuntingApi>(api: &A, task: SyncTask, tag: &str) -> SyncOutcome {
    match task.id {
        Some(id) => match api.update_rules(&id, &task.rules).await {
            Ok(()) => {
                tracing::info!(name = %task.name, id = %id, "ruleset updated");
                SyncOutcome::Updated {
                    name: task.name,
                    id,
                }
            }
            Err(e) => {
                tracing::warn!(name = %task.name, error = %e, "ruleset update failed");
                SyncOutcome::Failed {
                    name: task.name,
                    action: SyncAction::Update,
                    message: e.to_string(),
                }
            }
        },
        None => {
            let new = NewRuleset {
                name: task.name.clone(),
                match_object_type: task.kind.as_str().to_string(),
                enabled: true,
                tags: vec![tag.to_string()],
                rules: task.rules,
            };
            match api.create_ruleset(&new).await {
                Ok(created) => {
                    tracing::info!(name = %task.name, id = %created.id, "ruleset created");
                    SyncOutcome::Created {
                        name: task.name,
                        id: created.id,
                    }
                }
                Err(e) => {
                    tracing::warn!(name = %task.name, error = %e, "ruleset create failed");
                    SyncOutcome::Failed {
                        name: task.name,
                        action: SyncAction::Create,
                        message: e.to_string(),
                    }
                }
            }
        }
    }
}
