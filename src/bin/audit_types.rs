use anyhow::{Context, Result};
use mobileaudit::{audit_field_types, logging, Config};
use tracing::{info, warn};

fn main() -> Result<()> {
    logging::init();
    let config = Config::from_env()?;
    info!(input = %config.input.display(), "type audit");

    let types = audit_field_types(&config.input)
        .with_context(|| format!("auditing types in {}", config.input.display()))?;

    for (column, tags) in &types {
        if tags.len() > 1 {
            warn!(column = %column, ?tags, "mixed value types");
        }
    }

    println!("{}", serde_json::to_string_pretty(&types)?);
    Ok(())
}
