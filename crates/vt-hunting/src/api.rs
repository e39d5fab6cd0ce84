use std::future::Future;

use crate::types::{NewRuleset, Page, PageQuery, Ruleset};
use crate::Result;

/// The ruleset operations the sync engine needs from the remote service.
///
/// [`crate::VtClient`] is the production implementation; tests substitute
/// in-memory fakes.
pub trait HuntingApi {
    /// Fetch one page of rulesets matching `query.filter`.
    fn ruleset_page(&self, query: &PageQuery) -> impl Future<Output = Result<Page<Ruleset>>>;

    /// Replace the rule text of an existing ruleset, leaving other
    /// attributes untouched.
    fn update_rules(&self, id: &str, rules: &str) -> impl Future<Output = Result<()>>;

    /// Create a ruleset and return it with its assigned id.
    fn create_ruleset(&self, ruleset: &NewRuleset) -> impl Future<Output = Result<Ruleset>>;
}
