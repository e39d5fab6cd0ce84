use std::sync::Mutex;

use vt_hunting::{HuntingApi, HuntingError, NewRuleset, Page, PageQuery, Ruleset};

/// In-memory stand-in for the hunting API.
#[derive(Default)]
pub struct FakeApi {
    pub rulesets: Vec<Ruleset>,
    /// Items per page returned by `ruleset_page`.
    pub page_size: usize,
    /// Fail the listing once this many pages were served.
    pub fail_listing_after: Option<usize>,
    /// Ruleset ids or names whose writes fail.
    pub failing: Vec<String>,
    pub pages_served: Mutex<usize>,
    pub queries: Mutex<Vec<PageQuery>>,
    pub updates: Mutex<Vec<(String, String)>>,
    pub creates: Mutex<Vec<NewRuleset>>,
}

impl FakeApi {
    pub fn with_rulesets(rulesets: Vec<Ruleset>) -> Self {
        Self {
            rulesets,
            page_size: 10,
            ..Default::default()
        }
    }

    fn api_error(message: &str) -> HuntingError {
        HuntingError::Api {
            status: 500,
            code: "InternalError".into(),
            message: message.into(),
        }
    }
}

pub fn ruleset(id: &str, name: &str, rules: &str) -> Ruleset {
    Ruleset {
        id: id.into(),
        name: name.into(),
        rules: rules.into(),
        enabled: true,
        match_object_type: None,
        tags: vec!["autogenerated".into()],
    }
}

impl HuntingApi for FakeApi {
    async fn ruleset_page(&self, query: &PageQuery) -> vt_hunting::Result<Page<Ruleset>> {
        tokio::task::yield_now().await;
        self.queries.lock().unwrap().push(query.clone());

        let mut served = self.pages_served.lock().unwrap();
        if self.fail_listing_after.is_some_and(|n| *served >= n) {
            return Err(Self::api_error("listing failed"));
        }

        let start: usize = query.cursor.as_deref().map_or(0, |c| c.parse().unwrap());
        let end = (start + self.page_size.min(query.limit)).min(self.rulesets.len());
        *served += 1;
        Ok(Page {
            items: self.rulesets[start..end].to_vec(),
            cursor: (end < self.rulesets.len()).then(|| end.to_string()),
        })
    }

    async fn update_rules(&self, id: &str, rules: &str) -> vt_hunting::Result<()> {
        tokio::task::yield_now().await;
        if self.failing.iter().any(|f| f == id) {
            return Err(Self::api_error("update rejected"));
        }
        self.updates
            .lock()
            .unwrap()
            .push((id.to_string(), rules.to_string()));
        Ok(())
    }

    async fn create_ruleset(&self, ruleset: &NewRuleset) -> vt_hunting::Result<Ruleset> {
        tokio::task::yield_now().await;
        if self.failing.iter().any(|f| *f == ruleset.name) {
            return Err(Self::api_error("create rejected"));
        }
        let mut creates = self.creates.lock().unwrap();
        creates.push(ruleset.clone());
        Ok(Ruleset {
            id: format!("created-{}", creates.len()),
            name: ruleset.name.clone(),
            rules: ruleset.rules.clone(),
            enabled: ruleset.enabled,
            match_object_type: Some(ruleset.match_object_type.clone()),
            tags: ruleset.tags.clone(),
        })
    }
}
