//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand, ValueHint};

/// Region-scoped carbon stock reports over tagged XML model documents
#[derive(Parser, Debug)]
#[command(name = "ccreport")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(long, global = true, env = "CCREPORT_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the carbon stocks of one region
    #[command(group(ArgGroup::new("when").args(["period", "year", "all_periods"])))]
    Print {
        /// Model document
        #[arg(value_hint = ValueHint::FilePath)]
        model: PathBuf,
        /// Region to print (default: `default_region` setting)
        #[arg(short, long)]
        region: Option<String>,
        /// Model period index
        #[arg(short, long)]
        period: Option<usize>,
        /// Calendar year, mapped to a period through the model time
        #[arg(short, long)]
        year: Option<i32>,
        /// Print every period of the model time
        #[arg(long)]
        all_periods: bool,
        /// Output file (default: stdout)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Write the model back as a model document
    Export {
        #[arg(value_hint = ValueHint::FilePath)]
        model: PathBuf,
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Dump all regions for one period, including meta info
    Debug {
        #[arg(value_hint = ValueHint::FilePath)]
        model: PathBuf,
        /// Model period index
        #[arg(short, long, default_value_t = 0)]
        period: usize,
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// List region names
    Regions {
        #[arg(value_hint = ValueHint::FilePath)]
        model: PathBuf,
    },

    /// Show the model hierarchy
    Tree {
        #[arg(value_hint = ValueHint::FilePath)]
        model: PathBuf,
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
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show config file locations
    Path,
}
