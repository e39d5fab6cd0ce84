use crate::error::{NetwatchError, Result};
use crate::header;
use crate::paths;
use crate::types::EntityKind;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

pub const DOMAIN_LIST_PLACEHOLDER: &str = "${domain_list_json}";
pub const DOMAIN_PLACEHOLDER: &str = "${domain}";
pub const DOMAIN_ESCAPED_PLACEHOLDER: &str = "${domain_escaped}";

fn non_word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w]").expect("static regex is valid"))
}

/// Turn a domain into a legal rule identifier fragment.
///
/// `x.y-z.com` becomes `x_y_z_com`.
pub fn escape_domain(domain: &str) -> String {
    non_word_re().replace_all(domain, "_").into_owned()
}

// ---------------------------------------------------------------------------
// TemplateSet
// ---------------------------------------------------------------------------

/// The shared body template plus one rule template per entity kind.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    body: String,
    rules: HashMap<EntityKind, String>,
}

impl TemplateSet {
    /// Read every template from `dir`. Fails on the first missing file so the
    /// caller can abort before touching the network.
    pub fn load(dir: &Path) -> Result<Self> {
        for path in paths::required_templates(dir) {
            if !path.is_file() {
                return Err(NetwatchError::TemplateNotFound(path));
            }
        }

        let body = std::fs::read_to_string(paths::body_template(dir))?;
        let mut rules = HashMap::new();
        for kind in EntityKind::all() {
            let text = std::fs::read_to_string(paths::kind_template(dir, *kind))?;
            rules.insert(*kind, text);
        }
        tracing::debug!(dir = %dir.display(), "loaded ruleset templates");
        Ok(Self { body, rules })
    }

    /// Build a set from in-memory text. Kinds absent from `rules` render no
    /// per-domain blocks.
    pub fn from_parts(
        body: impl Into<String>,
        rules: impl IntoIterator<Item = (EntityKind, String)>,
    ) -> Self {
        Self {
            body: body.into(),
            rules: rules.into_iter().collect(),
        }
    }

    /// Render the full ruleset text for `kind`: the body with the embedded
    /// domain header, then one rule block per domain. Every part ends with a
    /// newline.
    pub fn render(&self, kind: EntityKind, domains: &[String]) -> Result<String> {
        let domain_list = header::encode_domains(domains)?;

        let mut out = self.body.replace(DOMAIN_LIST_PLACEHOLDER, &domain_list);
        out.push('\n');

        let rule_block = self.rules.get(&kind).map(String::as_str).unwrap_or_default();
        for domain in domains {
            out.push_str(
                &rule_block
                    .replace(DOMAIN_PLACEHOLDER, domain)
                    .replace(DOMAIN_ESCAPED_PLACEHOLDER, &escape_domain(domain)),
            );
            out.push('\n');
        }
        Ok(out)
    }
}
