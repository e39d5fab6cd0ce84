use crate::output::{print_domains, print_json};
use std::process::ExitCode;

use super::EMPTY_LIST_HINT;

pub fn run(domains: &[String], json: bool) -> anyhow::Result<ExitCode> {
    if json {
        print_json(&domains)?;
        return Ok(ExitCode::SUCCESS);
    }

    if domains.is_empty() {
        println!("{EMPTY_LIST_HINT}");
        return Ok(ExitCode::SUCCESS);
    }

    print_domains("Currently monitored domains:", domains);
    Ok(ExitCode::SUCCESS)
}
