pub mod list;
pub mod sync;

use anyhow::Context;
use netwatch_core::config::{Config, API_KEY_ENV_VAR};
use netwatch_core::reconcile::DomainChange;
use netwatch_core::template::TemplateSet;
use netwatch_core::NetwatchError;
use netwatch_sync::{current_domains, fetch_rulesets};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use vt_hunting::VtClient;

pub const EMPTY_LIST_HINT: &str =
    "* Empty domain list, use --add-domain domain.tld to register one";

/// Parsed command line, decoupled from clap.
#[derive(Debug, Default)]
pub struct Args {
    pub list: bool,
    pub add_domain: Option<String>,
    pub delete_domain: Option<String>,
    pub workers: Option<usize>,
    pub templates: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub api_url: Option<String>,
    pub json: bool,
}

/// Resolve settings, then list or sync.
///
/// Templates and the API key are checked before anything touches the
/// network. User-facing failures print their message and return
/// `ExitCode::FAILURE`; everything else propagates as an error.
pub fn run(args: Args) -> anyhow::Result<ExitCode> {
    let config = resolve_config(&args)?;

    let templates = match TemplateSet::load(&config.templates_dir) {
        Ok(t) => t,
        Err(NetwatchError::TemplateNotFound(path)) => {
            println!("ERROR: file {} not found.", path.display());
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e).context("failed to load templates"),
    };

    let Some(api_key) = std::env::var(API_KEY_ENV_VAR).ok().filter(|k| !k.is_empty()) else {
        println!("Please set {API_KEY_ENV_VAR} environment variable");
        return Ok(ExitCode::FAILURE);
    };

    let client = VtClient::new(
        &api_key,
        &config.api_url,
        Duration::from_secs(config.timeout_secs),
    )
    .context("failed to build API client")?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(async {
        let rulesets = fetch_rulesets(&client, &config).await;
        if rulesets.is_empty() && args.add_domain.is_none() {
            println!("{EMPTY_LIST_HINT}");
            return Ok(ExitCode::FAILURE);
        }

        if args.list {
            return list::run(current_domains(&rulesets), args.json);
        }

        let change = DomainChange {
            add: args.add_domain.clone(),
            delete: args.delete_domain.clone(),
        };
        sync::run(&client, &rulesets, &change, &templates, &config, args.json).await
    })
}

fn resolve_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = Config::load(args.config.as_deref()).context("failed to load config")?;
    if let Some(dir) = &args.templates {
        config.templates_dir = dir.clone();
    }
    if let Some(url) = &args.api_url {
        config.api_url = url.clone();
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    config.validate().context("invalid configuration")?;
    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}
