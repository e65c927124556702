//! CLI argument definitions using clap

use std::convert::Infallible;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::domain::Key;

/// Query a hierarchy of parent-linked records
#[derive(Parser, Debug)]
#[command(name = "treestore")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Record file (TOML), overrides configured data_file
    #[arg(short, long, global = true, env = "TREESTORE_FILE", value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all records in file order
    List,

    /// Show a single record
    Get {
        /// Record id (integers are numeric keys, anything else a string key)
        #[arg(value_parser = parse_key)]
        id: Key,
    },

    /// List records without a parent
    Roots,

    /// List direct children of a record
    Children {
        #[arg(value_parser = parse_key)]
        id: Key,
    },

    /// List the whole subtree below a record, level by level
    Descendants {
        #[arg(value_parser = parse_key)]
        id: Key,
    },

    /// List a record followed by its ancestors up to the root
    Ancestors {
        #[arg(value_parser = parse_key)]
        id: Key,
    },

    /// Print the id path from the root down to a record
    Path {
        #[arg(value_parser = parse_key)]
        id: Key,
    },

    /// Show which records a cascading delete would drop (file is not modified)
    Remove {
        #[arg(value_parser = parse_key)]
        id: Key,
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
    /// Print a config template
    Template,
}

/// Numeric text becomes an integer key, anything else a string key.
///
/// clap's inferred parser for `Key` goes through `From<String>`.
pub fn parse_key(s: &str) -> Result<Key, Infallible> {
    s.parse()
}
