use anyhow::Result;
use mobileaudit::{clean_file, logging, AlphaMatcher, Config};
use tracing::info;

fn main() -> Result<()> {
    logging::init();
    let config = Config::from_env()?;
    info!(
        input = %config.input.display(),
        output = %config.output.display(),
        mode = config.match_mode.as_str(),
        "cleaning"
    );

    let matcher = AlphaMatcher::new(config.match_mode);
    let cleaned = clean_file(&config.input, &config.output, &matcher)?;

    println!(
        "wrote {} rows to {}",
        cleaned.rows.len(),
        config.output.display()
    );
    Ok(())
}
