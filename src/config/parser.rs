use super::Config;
use anyhow::{Context, Result};
use std::path::Path;

/// Reads and validates a task file.
pub fn parse_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config_str(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Parses and validates task file contents.
pub fn parse_config_str(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).context("Failed to parse TOML config")?;

    // Validate and return validation errors directly without wrapping
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &Config) -> Result<()> {
    if config.targets.is_empty() {
        anyhow::bail!("No targets defined (expected at least one [targets.<name>] table)");
    }

    for (name, target) in &config.targets {
        if target.src.is_empty() {
            anyhow::bail!("Target '{name}' has no src patterns");
        }
        if let Some(dest) = &target.dest
            && dest.as_os_str().is_empty()
        {
            anyhow::bail!("Target '{name}' has an empty dest");
        }
    }

    Ok(())
}
