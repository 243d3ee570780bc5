use crate::asset::AssetRef;
use crate::emit;
use crate::types::Severity;

use super::{Finding, LintRule, RuleContext};

pub const ID: &str = "path-length";

pub struct PathLengthRule {
    max: usize,
}

impl PathLengthRule {
    pub fn new(max: usize) -> Self {
        Self { max }
    }
}

impl LintRule for PathLengthRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Asset paths must stay within the configured length"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn evaluate(&self, asset: &AssetRef, _ctx: &RuleContext<'_>) -> anyhow::Result<Vec<Finding>> {
        let mut findings = Vec::new();
        let len = asset.path.chars().count();
        if len > self.max {
            emit!(
                findings,
                "Path is {len} characters long (limit {}). Long paths break packaging on some platforms.",
                self.max
            );
        }
        Ok(findings)
    }
}
