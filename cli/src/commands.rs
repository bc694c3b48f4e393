//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for loodle
#[derive(Parser, Debug)]
#[command(name = "loodle")]
#[command(author, version, about = "Group scheduling polls - propose slots, collect votes")]
#[command(long_about = r#"
Loodle walks a scheduling poll through its whole lifecycle against an
in-process store: create a poll with its members, propose candidate slots,
seed and update votes, tally the answers and tear a slot down again.

Each lifecycle call fans its independent writes out concurrently and
reports every step outcome, so partial failures name exactly what stuck.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./loodle.toml       Project-level config
3. ~/.config/loodle/config.toml   Global config

Example:
  loodle --members 5
  loodle --locale fr --begin "15-01-2024 14:00" --end "15-01-2024 15:00"
  loodle --journal out/journal.jsonl -vv
"#)]
pub struct Cli {
    /// Poll size, owner included
    #[arg(short, long, default_value_t = 3, value_name = "N")]
    pub members: usize,

    /// Begin of the proposed slot, in the locale's wall-clock format
    #[arg(long, default_value = "01-15-2024 2:00 PM", value_name = "TIMESTAMP")]
    pub begin: String,

    /// End of the proposed slot, in the locale's wall-clock format
    #[arg(long, default_value = "01-15-2024 3:00 PM", value_name = "TIMESTAMP")]
    pub end: String,

    /// Input locale for timestamps ("en" or "fr")
    #[arg(short, long, default_value = "en")]
    pub locale: String,

    /// Write workflow reports to this JSONL journal file
    #[arg(long, value_name = "PATH")]
    pub journal: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,
}
