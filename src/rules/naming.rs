//! Per-classification naming conventions (`WBP_` for widget blueprints,
//! `SM_` for static meshes, ...).

use serde::Deserialize;
use std::borrow::Cow;
use std::collections::HashMap;

use crate::asset::AssetRef;
use crate::emit;
use crate::error::ConfigError;
use crate::types::Severity;

use super::{Finding, LintRule, RuleContext};

pub const ID: &str = "naming-convention";

fn default_case_sensitive() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamingConvention {
    /// Classification key, e.g. "Static Mesh" or "Material used as an Instance".
    pub class: String,
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    /// When false, names are compared after Unicode lowercasing.
    #[serde(default = "default_case_sensitive")]
    pub case_sensitive: bool,
}

impl NamingConvention {
    pub fn new(class: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            prefix: prefix.into(),
            suffix: String::new(),
            case_sensitive: true,
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    /// Unicode lowercase when matching case-insensitively.
    fn fold<'a>(&self, s: &'a str) -> Cow<'a, str> {
        if self.case_sensitive {
            Cow::Borrowed(s)
        } else {
            Cow::Owned(s.to_lowercase())
        }
    }
}

/// At most one convention per classification key.
#[derive(Debug, Clone, Default)]
pub struct ConventionTable(HashMap<String, NamingConvention>);

impl ConventionTable {
    pub fn new(conventions: &[NamingConvention]) -> Result<Self, ConfigError> {
        let mut table = HashMap::with_capacity(conventions.len());
        for convention in conventions {
            if table
                .insert(convention.class.clone(), convention.clone())
                .is_some()
            {
                return Err(ConfigError::DuplicateClassification(
                    convention.class.clone(),
                ));
            }
        }
        Ok(Self(table))
    }

    pub fn get(&self, class: &str) -> Option<&NamingConvention> {
        self.0.get(class)
    }

    /// Some convention may apply to assets declared as `class`: either the
    /// class itself or a usage refinement of it ("Material" and
    /// "Material used as an Instance").
    pub fn covers(&self, class: &str) -> bool {
        self.0.keys().any(|key| key.starts_with(class))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Which part of a name broke its convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamingMismatch {
    MissingPrefix {
        name: String,
        class: String,
        expected: String,
    },
    MissingSuffix {
        name: String,
        class: String,
        expected: String,
    },
    EmptyBody {
        name: String,
        class: String,
    },
}

impl std::fmt::Display for NamingMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NamingMismatch::MissingPrefix {
                name,
                class,
                expected,
            } => write!(
                f,
                "\"{name}\" is missing prefix \"{expected}\" required for {class}"
            ),
            NamingMismatch::MissingSuffix {
                name,
                class,
                expected,
            } => write!(
                f,
                "\"{name}\" is missing suffix \"{expected}\" required for {class}"
            ),
            NamingMismatch::EmptyBody { name, class } => write!(
                f,
                "\"{name}\" has no name body besides the {class} prefix/suffix"
            ),
        }
    }
}

/// Check `name` against the convention for `class`. Unconfigured
/// classifications always pass.
pub fn check(class: &str, name: &str, table: &ConventionTable) -> Option<NamingMismatch> {
    let convention = table.get(class)?;
    let folded = convention.fold(name);
    let prefix = convention.fold(&convention.prefix);
    let suffix = convention.fold(&convention.suffix);

    if !folded.starts_with(&*prefix) {
        return Some(NamingMismatch::MissingPrefix {
            name: name.to_string(),
            class: class.to_string(),
            expected: convention.prefix.clone(),
        });
    }

    if !suffix.is_empty() && !folded.ends_with(&*suffix) {
        return Some(NamingMismatch::MissingSuffix {
            name: name.to_string(),
            class: class.to_string(),
            expected: convention.suffix.clone(),
        });
    }

    if folded.len() <= prefix.len() + suffix.len() {
        return Some(NamingMismatch::EmptyBody {
            name: name.to_string(),
            class: class.to_string(),
        });
    }

    None
}

pub struct NamingConventionRule {
    table: ConventionTable,
}

impl NamingConventionRule {
    pub fn new(table: ConventionTable) -> Self {
        Self { table }
    }
}

impl LintRule for NamingConventionRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Asset names must carry the prefix/suffix configured for their classification"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn evaluate(&self, asset: &AssetRef, ctx: &RuleContext<'_>) -> anyhow::Result<Vec<Finding>> {
        let mut findings = Vec::new();
        if !self.table.covers(&asset.class) {
            return Ok(findings);
        }

        // Usage-specific classifications need the loaded asset.
        ctx.ensure_loaded(asset)?;
        let class = ctx.classify(asset);

        if let Some(mismatch) = check(&class, asset.name(), &self.table) {
            emit!(findings, "{mismatch}");
        }
        Ok(findings)
    }
}
