use serde::{Deserialize, Serialize};

/// Object type of a Livehunt ruleset in the v3 API.
pub const RULESET_TYPE: &str = "hunting_ruleset";

// ─── Wire envelopes ───────────────────────────────────────────────────────

/// `{"type": ..., "id": ..., "attributes": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiObject<A> {
    #[serde(rename = "type")]
    pub object_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub attributes: A,
}

impl<A> ApiObject<A> {
    pub fn ruleset(attributes: A) -> Self {
        Self {
            object_type: RULESET_TYPE.to_string(),
            id: None,
            attributes,
        }
    }
}

/// `{"data": ...}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// A page of a collection endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: Option<CollectionMeta>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionMeta {
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

// ─── Rulesets ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesetAttributes {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rules: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_object_type: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A ruleset as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ruleset {
    pub id: String,
    pub name: String,
    pub rules: String,
    pub enabled: bool,
    pub match_object_type: Option<String>,
    pub tags: Vec<String>,
}

impl From<ApiObject<RulesetAttributes>> for Ruleset {
    fn from(obj: ApiObject<RulesetAttributes>) -> Self {
        let a = obj.attributes;
        Self {
            id: obj.id.unwrap_or_default(),
            name: a.name,
            rules: a.rules,
            enabled: a.enabled,
            match_object_type: a.match_object_type,
            tags: a.tags,
        }
    }
}

/// Attributes for creating a ruleset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRuleset {
    pub name: String,
    pub match_object_type: String,
    pub enabled: bool,
    pub tags: Vec<String>,
    pub rules: String,
}

/// Attributes for replacing only the rule text of an existing ruleset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RulesUpdate {
    pub rules: String,
}

// ─── Paging ───────────────────────────────────────────────────────────────

/// Parameters for one page of a filtered listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub filter: String,
    pub limit: usize,
    pub cursor: Option<String>,
}

/// One page of results plus the cursor for the next page, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub cursor: Option<String>,
}
