//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for paperbot
#[derive(Parser, Debug)]
#[command(name = "paperbot")]
#[command(author, version, about = "Paper nomination and discussion bot for Reddit")]
#[command(long_about = r#"
paperbot runs one scheduler tick and exits. Run it once a day from cron.

Each tick:
1. Handles unread private messages (subscribe / unsubscribe requests)
2. Opens a voting thread when the voting date is due, or
3. Closes the open voting thread, ranks its nominations and opens a
   discussion thread for the winner when the discussion date is due

Configuration files are loaded from (in priority order):
1. PAPERBOT_<SECTION>__<KEY>   Environment variables
2. --config <path>             Explicit config file
3. ./paperbot.toml             Project-level config
4. ~/.config/paperbot/config.toml   Global config

Example:
  paperbot --config /etc/paperbot.toml
  PAPERBOT_ACCOUNT__PASSWORD=... paperbot -v
"#)]
pub struct Cli {
    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print only a one-line summary of the tick
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Show configuration file locations and the merged configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}
