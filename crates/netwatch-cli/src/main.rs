mod cmd;
mod output;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "netwatch",
    about = "Manage a set of YARA nethunting rules by adding/removing domains",
    version
)]
struct Cli {
    /// List current monitored domains
    #[arg(short = 'l', long)]
    list: bool,

    /// Add a domain to the list
    #[arg(short = 'a', long, value_name = "DOMAIN")]
    add_domain: Option<String>,

    /// Remove a domain from the list
    #[arg(short = 'd', long, value_name = "DOMAIN")]
    delete_domain: Option<String>,

    /// Number of concurrent workers [default: 4]
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    workers: Option<u16>,

    /// Directory holding _body.yara and one template per entity kind
    #[arg(long, env = "NETWATCH_TEMPLATES")]
    templates: Option<PathBuf>,

    /// YAML config file
    #[arg(long, env = "NETWATCH_CONFIG")]
    config: Option<PathBuf>,

    /// API base URL
    #[arg(long, env = "NETWATCH_API_URL")]
    api_url: Option<String>,

    /// Output as JSON
    #[arg(long, short = 'j')]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = cmd::Args {
        list: cli.list,
        add_domain: cli.add_domain,
        delete_domain: cli.delete_domain,
        workers: cli.workers.map(usize::from),
        templates: cli.templates,
        config: cli.config,
        api_url: cli.api_url,
        json: cli.json,
    };

    match cmd::run(args) {
        Ok(code) => code,
        Err(e) => {
            // Print the full error chain (anyhow's alternate Display)
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
