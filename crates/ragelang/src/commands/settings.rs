//! Config setter subcommands.

use super::persist;
use anyhow::Result;
use ragelang_core::{CommandExecutor, RoastCommand, RoastConfig};
use std::path::Path;

fn apply(path: &Path, command: RoastCommand) -> Result<()> {
    let mut executor = CommandExecutor::new(RoastConfig::load(path)?);
    let result = executor.execute(command)?;
    persist(path, &result, executor.config())?;
    if let Some(message) = result.message() {
        println!("{message}");
    }
    Ok(())
}

/// Flip `enabled`.
pub fn toggle(path: &Path) -> Result<()> {
    apply(path, RoastCommand::Toggle)
}

/// Store the API key.
pub fn set_api_key(path: &Path, key: &str) -> Result<()> {
    apply(path, RoastCommand::SetApiKey(key.to_string()))
}

/// Set the cooldown from user input.
pub fn set_cooldown(path: &Path, seconds: &str) -> Result<()> {
    apply(path, RoastCommand::SetCooldown(seconds.to_string()))
}

/// Print the effective configuration as TOML, with the API key masked.
pub fn show(path: &Path) -> Result<()> {
    let mut config = super::load_effective(path)?;
    if config.api_key().is_some() {
        config.api_key = Some("********".to_string());
    }
    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
