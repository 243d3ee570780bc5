use crate::asset::AssetRef;
use crate::emit;
use crate::types::Severity;

use super::{Finding, LintRule, RuleContext};

pub const ID: &str = "top-level";

/// Flags assets sitting directly in a namespace root (`/Game/BP_Door`).
pub struct TopLevelRule;

impl LintRule for TopLevelRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Assets must live in a folder below the namespace root"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn evaluate(&self, asset: &AssetRef, ctx: &RuleContext<'_>) -> anyhow::Result<Vec<Finding>> {
        let mut findings = Vec::new();
        let parent = asset.parent();
        if ctx.accessor().roots().iter().any(|root| root == parent) {
            emit!(
                findings,
                "\"{}\" sits directly in {parent}; move it into a project folder",
                asset.name()
            );
        }
        Ok(findings)
    }
}
