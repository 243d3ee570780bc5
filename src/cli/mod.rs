pub mod explain;
pub mod output;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

use crate::types::Severity;

#[derive(Parser, Debug)]
#[command(
    name = "assetlint",
    version,
    about = "Rule-set driven linter for game asset namespaces"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lint assets under the given paths
    Check {
        /// Asset paths or namespace prefixes (default: the mount root)
        paths: Vec<String>,

        /// Project root containing the content directory and config
        #[arg(short, long, default_value = ".")]
        project: PathBuf,

        /// Read assets from a JSON registry export instead of the content directory
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Rule set to run (default: `default_rule_set` from config)
        #[arg(short, long)]
        rule_set: Option<String>,

        /// Output format
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Path to config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Least severe level that causes a non-zero exit code
        #[arg(long, default_value = "error")]
        fail_on: Severity,

        /// Worker threads (1 = sequential, 0 = one per core)
        #[arg(short, long, default_value_t = 0)]
        jobs: usize,
    },
    /// Create a default .assetlintrc.toml
    Init,
    /// Explain what a rule checks (omit rule to list all)
    Explain {
        /// Rule id (e.g., naming-convention, path-length)
        rule: Option<String>,
    },
    /// List configured rule sets and the rules they resolve to
    RuleSets {
        /// Project root containing the config
        #[arg(short, long, default_value = ".")]
        project: PathBuf,

        /// Path to config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Github,
}
