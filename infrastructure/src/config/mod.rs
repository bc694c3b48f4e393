//! Configuration file loading for loodle
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./loodle.toml` or `./.loodle.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/loodle/config.toml`
//! 4. Fallback: `~/.config/loodle/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{FileConfig, FileJournalConfig, FileVotesConfig};
pub use loader::ConfigLoader;
