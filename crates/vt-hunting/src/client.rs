use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use serde::{de::DeserializeOwned, Serialize};

use crate::api::HuntingApi;
use crate::error::HuntingError;
use crate::types::{
    ApiObject, Collection, Envelope, ErrorBody, NewRuleset, Page, PageQuery, Ruleset,
    RulesetAttributes, RulesUpdate,
};
use crate::Result;

pub const DEFAULT_BASE_URL: &str = "https://www.virustotal.com/api/v3";
pub const RULESETS_PATH: &str = "/intelligence/hunting_rulesets";
const API_KEY_HEADER: &str = "x-apikey";

// ─── VtClient ─────────────────────────────────────────────────────────────

/// Authenticated client for the VirusTotal v3 REST API.
#[derive(Debug, Clone)]
pub struct VtClient {
    http: reqwest::Client,
    base_url: String,
}

impl VtClient {
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self> {
        let mut key = HeaderValue::from_str(api_key)
            .map_err(|_| HuntingError::Client("API key contains invalid characters".into()))?;
        key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .user_agent(concat!("netwatch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let response = self.http.get(self.url(path)).query(query).send().await?;
        handle_response(path, response).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        handle_response(path, response).await
    }

    /// PATCH `body` to `path`. The response body is discarded.
    pub async fn patch<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let response = self.http.patch(self.url(path)).json(body).send().await?;
        check_status(response).await.map(|_| ())
    }
}

impl HuntingApi for VtClient {
    async fn ruleset_page(&self, query: &PageQuery) -> Result<Page<Ruleset>> {
        let mut params = vec![
            ("filter", query.filter.clone()),
            ("limit", query.limit.to_string()),
        ];
        if let Some(cursor) = &query.cursor {
            params.push(("cursor", cursor.clone()));
        }

        let page: Collection<ApiObject<RulesetAttributes>> =
            self.get(RULESETS_PATH, &params).await?;
        let cursor = page
            .meta
            .and_then(|m| m.cursor)
            .filter(|c| !c.is_empty());
        tracing::debug!(count = page.data.len(), more = cursor.is_some(), "fetched ruleset page");

        Ok(Page {
            items: page.data.into_iter().map(Ruleset::from).collect(),
            cursor,
        })
    }

    async fn update_rules(&self, id: &str, rules: &str) -> Result<()> {
        let body = Envelope {
            data: ApiObject::ruleset(RulesUpdate {
                rules: rules.to_string(),
            }),
        };
        self.patch(&format!("{RULESETS_PATH}/{id}"), &body).await
    }

    async fn create_ruleset(&self, ruleset: &NewRuleset) -> Result<Ruleset> {
        let body = Envelope {
            data: ApiObject::ruleset(ruleset),
        };
        let created: Envelope<ApiObject<RulesetAttributes>> =
            self.post(RULESETS_PATH, &body).await?;
        Ok(Ruleset::from(created.data))
    }
}

// ─── Response handling ────────────────────────────────────────────────────

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let (code, message) = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => (body.error.code, body.error.message),
        Err(_) => (
            status
                .canonical_reason()
                .unwrap_or("HttpError")
                .replace(' ', ""),
            text,
        ),
    };
    Err(HuntingError::Api {
        status: status.as_u16(),
        code,
        message,
    })
}

async fn handle_response<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> Result<T> {
    let response = check_status(response).await?;
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|source| HuntingError::Parse {
        path: path.to_string(),
        source,
    })
}

// ─── Tests ────────────────────────────────────────────────────────────────
