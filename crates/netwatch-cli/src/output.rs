use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a heading followed by one `- item` line per domain.
pub fn print_domains(heading: &str, domains: &[String]) {
    println!("{heading}");
    for domain in domains {
        println!("- {domain}");
    }
}
