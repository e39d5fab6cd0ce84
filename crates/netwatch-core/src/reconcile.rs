use crate::error::{NetwatchError, Result};
use crate::types::DomainList;

/// A single-invocation change to the watched domain list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainChange {
    pub add: Option<String>,
    pub delete: Option<String>,
}

impl DomainChange {
    pub fn add(domain: impl Into<String>) -> Self {
        Self {
            add: Some(domain.into()),
            delete: None,
        }
    }

    pub fn delete(domain: impl Into<String>) -> Self {
        Self {
            add: None,
            delete: Some(domain.into()),
        }
    }
}

/// Old and new canonical lists for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub old: DomainList,
    pub new: DomainList,
}

impl Reconciliation {
    pub fn is_unchanged(&self) -> bool {
        self.old == self.new
    }

    pub fn added(&self) -> impl Iterator<Item = &String> {
        self.new.iter().filter(|d| !self.old.contains(d))
    }

    pub fn removed(&self) -> impl Iterator<Item = &String> {
        self.old.iter().filter(|d| !self.new.contains(d))
    }
}

/// Apply `change` to `current`.
///
/// The add is applied first; the delete must then name a domain present in
/// the working list, otherwise [`NetwatchError::DomainNotFound`] is returned
/// and nothing is produced. Only the first occurrence is deleted, so a domain
/// that is both stored and re-added in the same run survives.
pub fn reconcile(current: &[String], change: &DomainChange) -> Result<Reconciliation> {
    let mut working: Vec<String> = current.to_vec();

    if let Some(domain) = &change.add {
        working.push(domain.clone());
    }

    if let Some(domain) = &change.delete {
        if !working.contains(domain) {
            return Err(NetwatchError::DomainNotFound(domain.clone()));
        }
        if let Some(i) = working.iter().position(|d| d == domain) {
            working.remove(i);
        }
    }

    let old: DomainList = current.iter().cloned().collect();
    let new: DomainList = working.into_iter().collect();
    tracing::debug!(
        old = old.as_slice().len(),
        new = new.as_slice().len(),
        "reconciled domain list"
    );
    Ok(Reconciliation { old, new })
}
