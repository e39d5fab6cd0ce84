use std::collections::HashMap;

use netwatch_core::config::Config;
use netwatch_core::header;
use netwatch_core::types::{EntityKind, RulesetRecord};
use vt_hunting::{HuntingApi, PageQuery, Ruleset};

/// Existing rulesets keyed by the entity kind they match.
pub type Rulesets = HashMap<EntityKind, RulesetRecord>;

/// Read back every ruleset this tool owns.
///
/// Pages through rulesets matching [`Config::ruleset_filter`] until the
/// service runs out of pages or `config.fetch_limit` rulesets were read. A
/// remote error ends the scan early: it is logged and whatever was collected
/// so far is returned.
pub async fn fetch_rulesets<A: HuntingApi>(api: &A, config: &Config) -> Rulesets {
    let mut rulesets = Rulesets::new();
    let mut remaining = config.fetch_limit;
    let mut cursor = None;

    while remaining > 0 {
        let query = PageQuery {
            filter: config.ruleset_filter(),
            limit: remaining,
            cursor: cursor.take(),
        };
        let page = match api.ruleset_page(&query).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(
                    "Error retrieving {}* rulesets: {e}",
                    config.ruleset_prefix
                );
                break;
            }
        };

        let served = page.items.len();
        for ruleset in page.items.into_iter().take(remaining) {
            if let Some(record) = to_record(ruleset, &config.ruleset_prefix) {
                rulesets.insert(record.kind, record);
            }
        }
        remaining = remaining.saturating_sub(served);

        match page.cursor {
            Some(next) if served > 0 => cursor = Some(next),
            _ => break,
        }
    }

    tracing::debug!(found = rulesets.len(), "fetched existing rulesets");
    rulesets
}

fn to_record(ruleset: Ruleset, prefix: &str) -> Option<RulesetRecord> {
    let Some(kind) = ruleset
        .name
        .strip_prefix(prefix)
        .and_then(|suffix| suffix.parse::<EntityKind>().ok())
    else {
        tracing::debug!(name = %ruleset.name, "skipping ruleset with unrecognized name");
        return None;
    };

    let domains = header::parse_domains(&ruleset.rules).unwrap_or_else(|e| {
        tracing::warn!(name = %ruleset.name, error = %e, "could not read domain header");
        Vec::new()
    });

    Some(RulesetRecord {
        id: Some(ruleset.id).filter(|id| !id.is_empty()),
        name: ruleset.name,
        kind,
        rules: ruleset.rules,
        domains,
    })
}
