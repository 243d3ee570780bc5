use regex::Regex;

use crate::asset::AssetRef;
use crate::emit;
use crate::error::ConfigError;
use crate::types::Severity;

use super::{Finding, LintRule, RuleContext};

pub const ID: &str = "allowed-characters";

pub const DEFAULT_PATTERN: &str = "^[A-Za-z0-9_]+$";

pub struct AllowedCharactersRule {
    pattern: Regex,
}

impl AllowedCharactersRule {
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let pattern = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            rule: ID.to_string(),
            source,
        })?;
        Ok(Self { pattern })
    }
}

impl LintRule for AllowedCharactersRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Asset names may only use the configured character set"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn evaluate(&self, asset: &AssetRef, _ctx: &RuleContext<'_>) -> anyhow::Result<Vec<Finding>> {
        let mut findings = Vec::new();
        let name = asset.name();
        if !self.pattern.is_match(name) {
            emit!(
                findings,
                "\"{name}\" contains characters outside {}",
                self.pattern.as_str()
            );
        }
        Ok(findings)
    }
}
