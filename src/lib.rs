//! Rule-set driven linter for hierarchical asset namespaces.
//!
//! ```no_run
//! use assetlint::asset::{AssetPath, Catalog};
//! use assetlint::config::Config;
//! use assetlint::engine::Scanner;
//! use assetlint::ruleset::{ConfigStore, RuleSetStore};
//!
//! # fn main() -> anyhow::Result<()> {
//! let catalog = Catalog::load_file("registry.json".as_ref())?;
//! let config = Config::default();
//! let rule_set = ConfigStore::new(&config).load_default_rule_set()?;
//! let outcome = Scanner::new(&catalog).scan(&[AssetPath::new("/Game")?], &rule_set)?;
//! println!("{} failing assets", outcome.summary().failing_assets);
//! # Ok(())
//! # }
//! ```

pub mod asset;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod rules;
pub mod ruleset;
pub mod types;
