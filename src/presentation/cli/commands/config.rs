use std::path::Path;

use crate::application::config::AppConfig;

/// Print the effective configuration as TOML, or only where it lives.
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized.
pub fn run_config(config: &AppConfig, path: &Path, path_only: bool) -> anyhow::Result<()> {
    if path_only {
        println!("{}", path.display());
        return Ok(());
    }

    println!("# {}", path.display());
    print!("{}", config.to_toml()?);
    Ok(())
}
