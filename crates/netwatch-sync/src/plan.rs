use netwatch_core::reconcile::{self, DomainChange, Reconciliation};
use netwatch_core::template::TemplateSet;
use netwatch_core::types::{DomainList, EntityKind, SyncTask};
use netwatch_core::Result;

use crate::fetch::Rulesets;

/// What a run has to do after reconciling the requested change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncPlan {
    NothingToDo { domains: DomainList },
    Update {
        reconciliation: Reconciliation,
        tasks: Vec<SyncTask>,
    },
}

/// The watched domains as stored remotely. The url ruleset is authoritative;
/// the other kinds are kept in lockstep with it.
pub fn current_domains(rulesets: &Rulesets) -> &[String] {
    rulesets
        .get(&EntityKind::Url)
        .map(|r| r.domains.as_slice())
        .unwrap_or_default()
}

/// Reconcile `change` against the stored list and, when the canonical list
/// moves, render one task per entity kind.
pub fn plan(
    rulesets: &Rulesets,
    change: &DomainChange,
    templates: &TemplateSet,
    prefix: &str,
) -> Result<SyncPlan> {
    let reconciliation = reconcile::reconcile(current_domains(rulesets), change)?;
    if reconciliation.is_unchanged() {
        return Ok(SyncPlan::NothingToDo {
            domains: reconciliation.new,
        });
    }

    let tasks = build_tasks(rulesets, &reconciliation.new, templates, prefix)?;
    Ok(SyncPlan::Update {
        reconciliation,
        tasks,
    })
}

/// One task per entity kind, carrying the existing remote id when there is
/// one.
pub fn build_tasks(
    rulesets: &Rulesets,
    domains: &DomainList,
    templates: &TemplateSet,
    prefix: &str,
) -> Result<Vec<SyncTask>> {
    EntityKind::all()
        .iter()
        .map(|&kind| {
            Ok(SyncTask {
                name: kind.ruleset_name(prefix),
                kind,
                rules: templates.render(kind, domains.as_slice())?,
                id: rulesets.get(&kind).and_then(|r| r.id.clone()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use netwatch_core::header;
    use netwatch_core::types::RulesetRecord;
    use netwatch_core::NetwatchError;

    const PREFIX: &str = "auto_network_watch_";

    fn templates() -> TemplateSet {
        TemplateSet::from_parts(
            "/*\n---\n${domain_list_json}\n---\n*/",
            EntityKind::all()
                .iter()
                .map(|k| (*k, format!("rule {k}_${{domain_escaped}} // ${{domain}}"))),
        )
    }

    fn stored(kind: EntityKind, id: &str, domains: &[&str]) -> (EntityKind, RulesetRecord) {
        (
            kind,
            RulesetRecord {
                id: Some(id.into()),
                name: kind.ruleset_name(PREFIX),
                kind,
                rules: String::new(),
                domains: domains.iter().map(|d| d.to_string()).collect(),
            },
        )
    }

    #[test]
    fn add_renders_four_tasks_with_new_header() {
        let rulesets: Rulesets = [stored(EntityKind::Url, "u1", &["b.com"])].into_iter().collect();
        let plan = plan(&rulesets, &DomainChange::add("a.com"), &templates(), PREFIX).unwrap();

        let SyncPlan::Update { reconciliation, tasks } = plan else {
            panic!("expected an update");
        };
        assert_eq!(reconciliation.new.as_slice(), ["a.com", "b.com"]);
        assert_eq!(tasks.len(), 4);
        for task in &tasks {
            assert_eq!(header::parse_domains(&task.rules).unwrap(), ["a.com", "b.com"]);
            assert_eq!(task.name, task.kind.ruleset_name(PREFIX));
        }
        let kinds: Vec<EntityKind> = tasks.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, EntityKind::all());
    }

    #[test]
    fn existing_ids_are_carried_per_kind() {
        let rulesets: Rulesets = [
            stored(EntityKind::Url, "u1", &["b.com"]),
            stored(EntityKind::File, "f1", &[]),
        ]
        .into_iter()
        .collect();
        let SyncPlan::Update { tasks, .. } =
            plan(&rulesets, &DomainChange::add("a.com"), &templates(), PREFIX).unwrap()
        else {
            panic!("expected an update");
        };

        let id_of = |kind: EntityKind| tasks.iter().find(|t| t.kind == kind).unwrap().id.clone();
        assert_eq!(id_of(EntityKind::Url).as_deref(), Some("u1"));
        assert_eq!(id_of(EntityKind::File).as_deref(), Some("f1"));
        assert_eq!(id_of(EntityKind::Domain), None);
        assert_eq!(id_of(EntityKind::IpAddress), None);
    }

    #[test]
    fn domains_come_from_url_ruleset_only() {
        let rulesets: Rulesets = [
            stored(EntityKind::Url, "u1", &["a.com"]),
            stored(EntityKind::File, "f1", &["other.com"]),
        ]
        .into_iter()
        .collect();
        assert_eq!(current_domains(&rulesets), ["a.com"]);
        assert!(current_domains(&Rulesets::new()).is_empty());
    }

    #[test]
    fn delete_of_absent_domain_produces_no_tasks() {
        let rulesets: Rulesets = [stored(EntityKind::Url, "u1", &["a.com", "b.com"])]
            .into_iter()
            .collect();
        let err = plan(&rulesets, &DomainChange::delete("c.com"), &templates(), PREFIX).unwrap_err();
        assert!(matches!(err, NetwatchError::DomainNotFound(_)));
    }

    #[test]
    fn unchanged_list_is_nothing_to_do() {
        let rulesets: Rulesets = [stored(EntityKind::Url, "u1", &["a.com"])].into_iter().collect();
        let plan = plan(&rulesets, &DomainChange::add("a.com"), &templates(), PREFIX).unwrap();
        assert!(matches!(plan, SyncPlan::NothingToDo { ref domains } if domains.as_slice().len() == 1));
    }

    #[test]
    fn domain_kind_renders_escaped_identifier() {
        let domains: DomainList = ["x.y-z.com"].into_iter().collect();
        let tasks = build_tasks(&Rulesets::new(), &domains, &templates(), PREFIX).unwrap();
        let domain_task = tasks.iter().find(|t| t.kind == EntityKind::Domain).unwrap();
        assert!(domain_task.rules.contains("rule domain_x_y_z_com // x.y-z.com"));
    }
}
