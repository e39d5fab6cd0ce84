use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// The category of artifact a ruleset matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    File,
    Url,
    Domain,
    IpAddress,
}

impl EntityKind {
    pub fn all() -> &'static [EntityKind] {
        &[
            EntityKind::File,
            EntityKind::Url,
            EntityKind::Domain,
            EntityKind::IpAddress,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::File => "file",
            EntityKind::Url => "url",
            EntityKind::Domain => "domain",
            EntityKind::IpAddress => "ip_address",
        }
    }

    /// Ruleset name for this kind under `prefix`, e.g. `auto_network_watch_url`.
    pub fn ruleset_name(self, prefix: &str) -> String {
        format!("{prefix}{}", self.as_str())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = crate::error::NetwatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(EntityKind::File),
            "url" => Ok(EntityKind::Url),
            "domain" => Ok(EntityKind::Domain),
            "ip_address" => Ok(EntityKind::IpAddress),
            _ => Err(crate::error::NetwatchError::UnknownEntityKind(
                s.to_string(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// DomainList
// ---------------------------------------------------------------------------

/// Watched domains in canonical form: deduplicated and sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DomainList(Vec<String>);

impl DomainList {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.0.binary_search_by(|d| d.as_str().cmp(domain)).is_ok()
    }
}

impl<S: Into<String>> FromIterator<S> for DomainList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let set: BTreeSet<String> = iter.into_iter().map(Into::into).collect();
        Self(set.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for DomainList {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<String>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a DomainList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ---------------------------------------------------------------------------
// RulesetRecord
// ---------------------------------------------------------------------------

/// A ruleset as currently stored on the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RulesetRecord {
    pub id: Option<String>,
    pub name: String,
    pub kind: EntityKind,
    pub rules: String,
    /// Domains in the order they appear in the embedded header.
    pub domains: Vec<String>,
}

// ---------------------------------------------------------------------------
// SyncTask
// ---------------------------------------------------------------------------

/// Desired create-or-update operation for one ruleset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTask {
    pub name: String,
    pub kind: EntityKind,
    pub rules: String,
    /// Present when the ruleset already exists remotely.
    pub id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_kind_round_trips_through_str() {
        for kind in EntityKind::all() {
            assert_eq!(kind.as_str().parse::<EntityKind>().unwrap(), *kind);
        }
        assert!("registry".parse::<EntityKind>().is_err());
    }

    #[test]
    fn ruleset_name_appends_kind() {
        assert_eq!(
            EntityKind::IpAddress.ruleset_name("auto_network_watch_"),
            "auto_network_watch_ip_address"
        );
    }

    #[test]
    fn domain_list_is_sorted_and_unique() {
        let list: DomainList = ["c.com", "a.com", "c.com", "b.com"].into_iter().collect();
        assert_eq!(list.as_slice(), ["a.com", "b.com", "c.com"]);
        assert!(list.contains("b.com"));
        assert!(!list.contains("d.com"));
    }

    #[test]
    fn domain_list_deserializes_canonically() {
        let list: DomainList = serde_json::from_str(r#"["b.com","a.com","b.com"]"#).unwrap();
        assert_eq!(list.as_slice(), ["a.com", "b.com"]);
        assert_eq!(serde_json::to_string(&list).unwrap(), r#"["a.com","b.com"]"#);
    }
}
