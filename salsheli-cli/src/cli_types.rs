//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "salsheli")]
#[command(about = "Maintain the Salsheli product catalog", long_about = None)]
pub(crate) struct Cli {
    /// Directory holding the catalog partitions (defaults to the saved
    /// setting, then assets/data/list_types/categories)
    #[arg(long, global = true)]
    pub catalog_dir: Option<PathBuf>,

    /// Directory with rule overrides (YAML); built-in rules fill the rest
    #[arg(long, global = true)]
    pub rules_dir: Option<PathBuf>,

    /// Compute and report changes without writing any file
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Merge a batch of candidate products into a partition
    Add {
        /// Partition key (file name without .json, e.g. dairy)
        partition: String,

        /// JSON array of candidate products
        #[arg(long)]
        from: PathBuf,

        /// Sort the partition by brand, category and name afterwards
        #[arg(long)]
        sort: bool,
    },

    /// Fix names, brands and icons in the given partitions
    Fix {
        /// Partition keys to clean
        #[arg(required = true)]
        partitions: Vec<String>,
    },

    /// Run the configured reclassify plan, then fix every partition
    Cleanup,

    /// Move products between partitions by keywords in their names
    Reclassify {
        /// Plan id (e.g. alcohol, other)
        plan: String,
    },

    /// Split a master product file into per-category partitions
    Split {
        /// Master JSON file (e.g. assets/data/list_types/supermarket.json)
        master: PathBuf,
    },

    /// Remove products matching a prune plan's patterns
    Prune {
        /// Plan id (e.g. dairy)
        plan: String,
    },

    /// Sort a partition
    Sort {
        partition: String,

        /// Sort by name only instead of brand, category and name
        #[arg(long)]
        by_name: bool,
    },

    /// Check partitions for duplicates, schema drift and garbled text
    Check {
        /// Partition keys to check (default: all)
        partitions: Vec<String>,
    },

    /// Inspect the effective rule set
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },

    /// Manage saved settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum RulesAction {
    /// Print the effective rules as YAML
    Show,

    /// Normalize a product name with the current rules
    Normalize {
        text: String,
    },

    /// Show where a reclassify plan would send a product name
    Classify {
        plan: String,
        name: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the resolved directories and the settings file
    Show,

    /// Print the settings file path
    Path,

    /// Save the default catalog directory
    SetDir {
        dir: PathBuf,

        /// Save the rules directory instead
        #[arg(long)]
        rules: bool,
    },
}

#[cfg(test)]
#[path = "tests/cli_types_tests.rs"]
mod tests;
