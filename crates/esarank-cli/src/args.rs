//! Command line arguments.
//!
//! Flags override values from the environment and the configuration file.

use clap::{Args, Parser, Subcommand};
use esarank_config::{Config, RunMode};
use std::path::PathBuf;

/// Survey rankings per academic year, drawn from esa.io posts.
#[derive(Parser, Debug)]
#[command(name = "esarank", author, version, about, long_about = None)]
pub struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "ESARANK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `esarank_graphs=trace`
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Log output format: pretty, compact or json
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Compact debug logging with span events, ignoring the log settings
    #[arg(long, global = true)]
    pub debug: bool,

    /// What to do; defaults to `render`
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Render both charts from a JSON snapshot
    Render(RenderArgs),
    /// Fetch posts from esa.io, then render both charts
    Fetch(FetchArgs),
}

/// Settings shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Single-year chart output path
    #[arg(long)]
    pub ranking: Option<PathBuf>,

    /// Multi-year stacked chart output path
    #[arg(long)]
    pub ranking_all: Option<PathBuf>,

    /// Author allow-list YAML
    #[arg(long)]
    pub author_list: Option<PathBuf>,

    /// Number of previous academic years to include
    #[arg(long)]
    pub lookback: Option<u32>,

    /// Reference timezone as whole hours east of UTC
    #[arg(long, allow_hyphen_values = true)]
    pub utc_offset: Option<i32>,
}

/// `render` arguments.
#[derive(Args, Debug, Clone, Default)]
pub struct RenderArgs {
    /// JSON snapshot to read
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// `fetch` arguments.
#[derive(Args, Debug, Clone, Default)]
pub struct FetchArgs {
    /// esa.io team name
    #[arg(long)]
    pub team: Option<String>,

    /// esa.io category to fetch
    #[arg(long)]
    pub category: Option<String>,

    /// Also save the fetched posts as a JSON snapshot
    #[arg(long)]
    pub save_snapshot: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl Cli {
    /// The subcommand, with `render` standing in when none was given.
    #[must_use]
    pub fn resolved_command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Render(RenderArgs::default()))
    }

    /// Writes every flag that was given into `config`.
    pub fn apply(&self, config: &mut Config) -> RunMode {
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
        if let Some(format) = &self.log_format {
            config.logging.format.clone_from(format);
        }

        match self.resolved_command() {
            Command::Render(args) => {
                if let Some(input) = args.input {
                    config.paths.input_json = Some(input);
                }
                args.output.apply(config);
                RunMode::Render
            }
            Command::Fetch(args) => {
                if let Some(team) = args.team {
                    config.esa.team_name = Some(team);
                }
                if let Some(category) = args.category {
                    config.esa.category = category;
                }
                if let Some(path) = args.save_snapshot {
                    config.paths.snapshot_output = Some(path);
                }
                args.output.apply(config);
                RunMode::Fetch
            }
        }
    }
}

impl OutputArgs {
    fn apply(self, config: &mut Config) {
        if let Some(path) = self.ranking {
            config.paths.ranking_output = Some(path);
        }
        if let Some(path) = self.ranking_all {
            config.paths.ranking_all_output = Some(path);
        }
        if let Some(path) = self.author_list {
            config.paths.author_list = Some(path);
        }
        if let Some(lookback) = self.lookback {
            config.ranking.lookback = lookback;
        }
        if let Some(hours) = self.utc_offset {
            config.ranking.utc_offset_hours = hours;
        }
    }
}
