use anyhow::{Context, Result};
use mobileaudit::{audit_fields, logging, AlphaMatcher, Config};
use tracing::info;

fn main() -> Result<()> {
    logging::init();
    let config = Config::from_env()?;
    info!(input = %config.input.display(), mode = config.match_mode.as_str(), "field audit");

    // numeric columns should hold no letters; see which ones do and where
    let matcher = AlphaMatcher::new(config.match_mode);
    let audit = audit_fields(&config.input, &matcher)
        .with_context(|| format!("auditing {}", config.input.display()))?;

    if audit.is_clean() {
        info!("no alphabetic values in numeric columns");
    } else {
        info!(
            offences = audit.offences(),
            countries = audit.countries.len(),
            "numeric columns carry alphabetic values"
        );
    }

    println!("{}", serde_json::to_string_pretty(&audit)?);
    Ok(())
}
