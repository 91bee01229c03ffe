//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Depth-first id lookup over labeled forests, plus bit, Fibonacci and formatting helpers
#[derive(Parser, Debug)]
#[command(name = "citytree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Forest file (.json or .toml); default: configured data_file or bundled city data
    #[arg(long, global = true, value_hint = ValueHint::FilePath, env = "CITYTREE_DATA")]
    pub data: Option<PathBuf>,

    /// Directory holding a local .citytree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up labels by node id (first pre-order match)
    Find {
        /// Node ids; numeric input is an integer id unless --string-id
        #[arg(required = true)]
        ids: Vec<String>,
        /// Treat every id as a string id
        #[arg(short, long)]
        string_id: bool,
        /// Print the root-to-node path instead of the label
        #[arg(short, long)]
        path: bool,
    },

    /// Show the forest as a tree
    Tree,

    /// Show forest statistics and warn about duplicate ids
    Check,

    /// Bit manipulation helpers
    Bits {
        #[command(subcommand)]
        command: BitsCommands,
    },

    /// Nth Fibonacci number
    Fib {
        /// Position (F(0) = 0, F(1) = 1)
        n: u32,
    },

    /// Format a number as money with thousands separators
    Money {
        #[arg(allow_negative_numbers = true)]
        value: f64,
        /// Fraction digits (default: money.decimals from config)
        #[arg(long)]
        decimals: Option<usize>,
    },

    /// Format a ratio as a truncated percentage
    Percent {
        #[arg(allow_negative_numbers = true)]
        point: f64,
        /// Fraction digits (default: percent.accuracy from config)
        #[arg(long)]
        accuracy: Option<usize>,
    },

    /// First and last day of a month
    #[command(name = "month-range")]
    MonthRange {
        /// Any date in the month, YYYY-MM-DD (default: today)
        date: Option<String>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum BitsCommands {
    /// Count one bits
    Count { number: u64 },

    /// Read the bit at a position (0 = least significant)
    Get { number: u64, position: u32 },

    /// Set or clear the bit at a position
    Set {
        number: u64,
        position: u32,
        /// Clear instead of set
        #[arg(long)]
        clear: bool,
    },

    /// Multiply by shift-and-add
    Multiply {
        #[arg(allow_negative_numbers = true)]
        a: i64,
        #[arg(allow_negative_numbers = true)]
        b: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Print a config template
    Template,

    /// Show config paths
    Path,
}
