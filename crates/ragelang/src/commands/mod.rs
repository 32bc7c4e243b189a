//! Subcommand implementations.

pub mod serve;
pub mod settings;
pub mod trigger;

use anyhow::{Context, Result};
use ragelang_core::{CommandResult, RoastConfig};
use std::path::Path;

/// Load the config file with environment overrides applied.
pub fn load_effective(path: &Path) -> Result<RoastConfig> {
    let config = RoastConfig::load(path)
        .with_context(|| format!("loading config {}", path.display()))?;
    Ok(config.with_env_overrides())
}

/// Write the setting changed by `result` to the config file.
///
/// Only that setting is written, on top of what the file holds, so values that came from the
/// environment are never persisted.
pub fn persist(path: &Path, result: &CommandResult, current: &RoastConfig) -> Result<()> {
    let mut stored = RoastConfig::load(path)?;
    match result {
        CommandResult::Enabled(enabled) => stored.enabled = *enabled,
        CommandResult::CooldownSet(seconds) => stored.cooldown_seconds = *seconds,
        CommandResult::ApiKeySet => stored.api_key = current.api_key.clone(),
        _ => return Ok(()),
    }
    stored
        .save(path)
        .with_context(|| format!("saving config {}", path.display()))
}
