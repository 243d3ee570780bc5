use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;
use crate::error::ConfigError;
use crate::rules::allowed_characters;
use crate::rules::naming::{ConventionTable, NamingConvention};
use crate::types::Severity;

pub const CONFIG_FILE: &str = ".assetlintrc.toml";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output format when `--format` is not given.
    pub format: OutputFormat,
    /// Namespace root the content directory is mounted at.
    pub mount: String,
    /// Content directory, relative to the project root.
    pub content_root: PathBuf,
    pub ignore: Vec<String>,
    pub default_rule_set: String,
    /// File extension (lowercase, no dot) to classification key.
    pub classes: HashMap<String, String>,
    pub naming_conventions: Vec<NamingConvention>,
    pub rules: RulesConfig,
    pub rule_sets: BTreeMap<String, RuleSetConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub path_length: PathLengthConfig,
    pub allowed_characters: AllowedCharactersConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PathLengthConfig {
    pub max: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AllowedCharactersConfig {
    pub pattern: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RuleSetConfig {
    pub extends: Option<String>,
    pub rules: Vec<RuleRef>,
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuleRef {
    pub id: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub severity: Option<Severity>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            mount: "/Game".into(),
            content_root: PathBuf::from("Content"),
            ignore: vec![".git".into(), "Developers".into(), "Collections".into()],
            default_rule_set: "default".into(),
            classes: HashMap::new(),
            naming_conventions: Vec::new(),
            rules: RulesConfig::default(),
            rule_sets: BTreeMap::new(),
        }
    }
}

impl Default for PathLengthConfig {
    fn default() -> Self {
        Self { max: 140 }
    }
}

impl Default for AllowedCharactersConfig {
    fn default() -> Self {
        Self {
            pattern: allowed_characters::DEFAULT_PATTERN.into(),
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&Path>, project_root: &Path) -> Result<Self, ConfigError> {
        let path = config_path.map(Path::to_path_buf).or_else(|| {
            let default = project_root.join(CONFIG_FILE);
            default.exists().then_some(default)
        });

        let config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Io { path, source })?;
                toml::from_str::<Config>(&content)?
            }
            None => Config::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that don't depend on which rule set is selected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConventionTable::new(&self.naming_conventions)?;
        for (id, set) in &self.rule_sets {
            if let Some(parent) = &set.extends {
                if !self.rule_sets.contains_key(parent) {
                    tracing::debug!(rule_set = %id, %parent, "extends unknown rule set");
                    return Err(ConfigError::UnknownRuleSet(parent.clone()));
                }
            }
        }
        Ok(())
    }

    pub fn content_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.content_root)
    }

    pub const fn default_toml() -> &'static str {
        r#"# assetlint configuration

# Namespace root the content directory is mounted at
mount = "/Game"

# Content directory, relative to the project root
content_root = "Content"

# Files and directories to skip (glob patterns, case-insensitive)
ignore = [".git", "Developers", "Collections"]

# Rule set used when --rule-set is not given
default_rule_set = "default"

# Output format when --format is not given: text, json or github
format = "text"

# File extension -> asset classification
[classes]
# uasset = "Blueprint"

# One entry per classification; duplicates are rejected.
# [[naming_conventions]]
# class = "Widget Blueprint"
# prefix = "WBP_"
# suffix = ""
# case_sensitive = true

[rules.path_length]
max = 140

[rules.allowed_characters]
pattern = "^[A-Za-z0-9_]+$"

[rule_sets.default]
rules = [
    { id = "naming-convention" },
    { id = "path-length" },
    { id = "allowed-characters" },
    { id = "top-level" },
]

# Rule sets can extend another set and override rules by id:
# [rule_sets.ci]
# extends = "default"
# rules = [{ id = "path-length", severity = "error" }, { id = "top-level", enabled = false }]
"#
    }
}
