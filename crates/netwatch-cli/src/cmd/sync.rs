use crate::output::{print_domains, print_json};
use netwatch_core::config::Config;
use netwatch_core::reconcile::DomainChange;
use netwatch_core::template::TemplateSet;
use netwatch_core::types::DomainList;
use netwatch_core::NetwatchError;
use netwatch_sync::{dispatch, plan, Rulesets, SyncOutcome, SyncPlan};
use serde::Serialize;
use std::process::ExitCode;
use vt_hunting::HuntingApi;

#[derive(Serialize)]
struct SyncOutput<'a> {
    changed: bool,
    domains: &'a DomainList,
    added: Vec<&'a String>,
    removed: Vec<&'a String>,
    outcomes: &'a [SyncOutcome],
}

/// Apply `change` and push the regenerated rulesets.
///
/// Per-ruleset write failures are reported but do not change the exit code.
pub async fn run<A: HuntingApi>(
    api: &A,
    rulesets: &Rulesets,
    change: &DomainChange,
    templates: &TemplateSet,
    config: &Config,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let plan = match plan(rulesets, change, templates, &config.ruleset_prefix) {
        Ok(plan) => plan,
        Err(NetwatchError::DomainNotFound(domain)) => {
            println!("* {domain} not in list");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    match plan {
        SyncPlan::NothingToDo { domains } => {
            if json {
                print_json(&SyncOutput {
                    changed: false,
                    domains: &domains,
                    added: Vec::new(),
                    removed: Vec::new(),
                    outcomes: &[],
                })?;
            } else {
                println!("Nothing to do");
            }
        }
        SyncPlan::Update {
            reconciliation,
            tasks,
        } => {
            if !json {
                print_domains("Updating monitored list:", reconciliation.new.as_slice());
            }
            let outcomes = dispatch(api, tasks, config.workers, &config.ruleset_tag).await;
            if json {
                print_json(&SyncOutput {
                    changed: true,
                    domains: &reconciliation.new,
                    added: reconciliation.added().collect(),
                    removed: reconciliation.removed().collect(),
                    outcomes: &outcomes,
                })?;
            } else {
                for outcome in &outcomes {
                    println!("{outcome}");
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
