//! Configuration for the todo binary.
//!
//! Settings come from command-line arguments, falling back to environment
//! variables (a `.env` file is loaded by the binary first) and then to
//! defaults.

use clap::Parser;
use clap::builder::BoolishValueParser;
use redux_lite_runtime::StoreConfig;
use std::path::PathBuf;

/// Application configuration
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "todo")]
#[command(about = "Console todo list on the Redux Lite store", long_about = None)]
pub struct Config {
    /// JSON-lines file of actions to replay instead of the built-in script
    pub replay_path: Option<PathBuf>,

    /// Reject unrecognized actions instead of ignoring them
    #[arg(long, env = "TODO_STRICT_ACTIONS", value_parser = BoolishValueParser::new())]
    pub strict_actions: bool,

    /// Name of the store in logs and metrics
    #[arg(long, env = "TODO_STORE_NAME", default_value = "todo-app")]
    pub store_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            replay_path: None,
            strict_actions: false,
            store_name: "todo-app".to_string(),
        }
    }
}

impl Config {
    /// Store configuration derived from these settings
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.store_name.clone()).with_reject_unknown_actions(self.strict_actions)
    }
}
