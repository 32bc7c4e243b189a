//! Command Interface Layer
//!
//! The user-facing commands (toggle, manual trigger, set API key, set cooldown) as one enum,
//! executed over the configuration and the trigger engine.
//!
//! # Example
//!
//! ```rust
//! use ragelang_core::{CommandExecutor, CommandResult, RoastCommand, RoastConfig};
//!
//! let mut executor = CommandExecutor::new(RoastConfig::default());
//!
//! let result = executor.execute(RoastCommand::Toggle).unwrap();
//! assert!(matches!(result, CommandResult::Enabled(false)));
//! assert!(!executor.engine().is_enabled());
//!
//! // Invalid input is rejected and leaves the config alone.
//! assert!(executor.execute(RoastCommand::SetCooldown("later".into())).is_err());
//! assert_eq!(executor.config().cooldown_seconds, 3);
//! ```

use crate::config::{ConfigError, RoastConfig};
use crate::cooldown::{Clock, SystemClock};
use crate::trigger::{RoastRequest, TriggerEngine};
use thiserror::Error;
use tracing::info;

/// Unified command enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoastCommand {
    /// Flip the enabled flag.
    Toggle,
    /// Set the enabled flag.
    SetEnabled(bool),
    /// Roast `line` of the active document now.
    TriggerRoast {
        /// Zero-based line to roast.
        line: usize,
    },
    /// Store a new API key.
    SetApiKey(String),
    /// Set the cooldown from raw user input (whole seconds).
    SetCooldown(String),
    /// Return the current configuration.
    ShowConfig,
}

/// Command execution result
#[derive(Debug, Clone)]
pub enum CommandResult {
    /// The enabled flag after the command.
    Enabled(bool),
    /// A manual roast request to hand to the renderers.
    Roast(RoastRequest),
    /// The API key was stored.
    ApiKeySet,
    /// The cooldown was set (seconds).
    CooldownSet(u64),
    /// Current configuration.
    Config(RoastConfig),
    /// Nothing to do (e.g. manual trigger without an active document).
    Ignored,
}

impl CommandResult {
    /// Message to show the user, if the command has one.
    pub fn message(&self) -> Option<String> {
        match self {
            CommandResult::Enabled(enabled) => Some(format!(
                "RageLang is now {}",
                if *enabled { "enabled" } else { "disabled" }
            )),
            CommandResult::ApiKeySet => Some("RageLang: Gemini API key saved".to_string()),
            CommandResult::CooldownSet(seconds) => {
                Some(format!("RageLang: Cooldown set to {seconds} seconds"))
            }
            CommandResult::Roast(_) | CommandResult::Config(_) | CommandResult::Ignored => None,
        }
    }

    /// Returns `true` if the command changed persisted configuration.
    pub fn changes_config(&self) -> bool {
        matches!(
            self,
            CommandResult::Enabled(_) | CommandResult::ApiKeySet | CommandResult::CooldownSet(_)
        )
    }
}

/// Command error type
#[derive(Debug, Error)]
pub enum CommandError {
    /// Rejected configuration input.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Executes [`RoastCommand`]s, keeping the engine in sync with the configuration.
#[derive(Debug)]
pub struct CommandExecutor<C: Clock = SystemClock> {
    config: RoastConfig,
    engine: TriggerEngine<C>,
}

impl CommandExecutor<SystemClock> {
    /// Create an executor with a system-clock engine configured from `config`.
    pub fn new(config: RoastConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> CommandExecutor<C> {
    /// Create an executor whose engine reads time from `clock`.
    pub fn with_clock(config: RoastConfig, clock: C) -> Self {
        let mut engine = TriggerEngine::with_clock(clock, config.cooldown());
        engine.set_enabled(config.enabled);
        Self { config, engine }
    }

    /// Current configuration.
    pub fn config(&self) -> &RoastConfig {
        &self.config
    }

    /// The trigger engine.
    pub fn engine(&self) -> &TriggerEngine<C> {
        &self.engine
    }

    /// Mutable access to the trigger engine (host events go through here).
    pub fn engine_mut(&mut self) -> &mut TriggerEngine<C> {
        &mut self.engine
    }

    /// Execute command
    pub fn execute(&mut self, command: RoastCommand) -> Result<CommandResult, CommandError> {
        match command {
            RoastCommand::Toggle => Ok(self.set_enabled(!self.config.enabled)),
            RoastCommand::SetEnabled(enabled) => Ok(self.set_enabled(enabled)),
            RoastCommand::TriggerRoast { line } => Ok(self
                .engine
                .manual_trigger(line)
                .map_or(CommandResult::Ignored, CommandResult::Roast)),
            RoastCommand::SetApiKey(key) => {
                self.config.set_api_key(&key)?;
                info!("api key updated");
                Ok(CommandResult::ApiKeySet)
            }
            RoastCommand::SetCooldown(input) => {
                let seconds = self.config.set_cooldown_input(&input)?;
                self.engine.set_cooldown(self.config.cooldown());
                info!(seconds, "cooldown updated");
                Ok(CommandResult::CooldownSet(seconds))
            }
            RoastCommand::ShowConfig => Ok(CommandResult::Config(self.config.clone())),
        }
    }

    /// Batch execute commands, stopping at the first error.
    pub fn execute_batch(
        &mut self,
        commands: Vec<RoastCommand>,
    ) -> Result<Vec<CommandResult>, CommandError> {
        commands.into_iter().map(|c| self.execute(c)).collect()
    }

    fn set_enabled(&mut self, enabled: bool) -> CommandResult {
        self.config.enabled = enabled;
        self.engine.set_enabled(enabled);
        info!(enabled, "roasting toggled");
        CommandResult::Enabled(enabled)
    }
}
