//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application-level
//! settings where appropriate.

use loodle_application::BehaviorConfig;
use loodle_domain::{Answer, InvalidAnswer};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Vote defaults
    pub votes: FileVotesConfig,
    /// Workflow journal settings
    pub journal: FileJournalConfig,
}

impl FileConfig {
    /// Converts the raw vote section into application behavior settings.
    pub fn behavior(&self) -> Result<BehaviorConfig, InvalidAnswer> {
        Ok(BehaviorConfig::with_default_answer(
            self.votes.parse_default_answer()?,
        ))
    }
}

/// Raw vote configuration from TOML (`[votes]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVotesConfig {
    /// Answer seeded into default votes ("yes", "no" or "if-needed")
    pub default_answer: String,
}

impl Default for FileVotesConfig {
    fn default() -> Self {
        Self {
            default_answer: "no".to_string(),
        }
    }
}

impl FileVotesConfig {
    /// Parses the configured default answer.
    pub fn parse_default_answer(&self) -> Result<Answer, InvalidAnswer> {
        self.default_answer.parse()
    }
}

/// Raw journal configuration from TOML (`[journal]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileJournalConfig {
    /// Write workflow reports to a JSONL journal file
    pub enabled: bool,
    /// Journal file path
    pub path: String,
}

impl Default for FileJournalConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: "loodle.journal.jsonl".to_string(),
        }
    }
}
