pub mod allowed_characters;
pub mod macros;
pub mod naming;
pub mod path_length;
pub mod top_level;

use std::sync::Arc;

use crate::asset::{AssetAccessor, AssetRef};
use crate::config::Config;
use crate::error::{AccessError, ConfigError};
use crate::types::Severity;

/// One problem a rule found on one asset. The engine attaches identity and
/// the effective severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub message: String,
}

/// What a rule may consult while evaluating an asset.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    accessor: &'a dyn AssetAccessor,
}

impl<'a> RuleContext<'a> {
    pub fn new(accessor: &'a dyn AssetAccessor) -> Self {
        Self { accessor }
    }

    pub fn accessor(&self) -> &'a dyn AssetAccessor {
        self.accessor
    }

    /// Load the asset if the registry hasn't resolved it yet.
    pub fn ensure_loaded(&self, asset: &AssetRef) -> Result<(), AccessError> {
        if self.accessor.is_loaded(asset) {
            return Ok(());
        }
        tracing::debug!(asset = %asset.path, "loading asset for evaluation");
        self.accessor.load(asset)
    }

    pub fn classify(&self, asset: &AssetRef) -> String {
        self.accessor.classify(asset)
    }
}

/// A stateless check over one asset.
///
/// Implementations must not carry state from one asset to the next: the
/// engine evaluates assets concurrently.
pub trait LintRule: Send + Sync {
    /// Stable identifier used in configuration and violation attribution.
    fn id(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn default_severity(&self) -> Severity;

    fn evaluate(&self, asset: &AssetRef, ctx: &RuleContext<'_>) -> anyhow::Result<Vec<Finding>>;
}

pub const BUILTIN_RULES: &[&str] = &[
    naming::ID,
    path_length::ID,
    allowed_characters::ID,
    top_level::ID,
];

/// Instantiate a built-in rule with its options from `config`.
pub fn builtin_rule(id: &str, config: &Config) -> Result<Arc<dyn LintRule>, ConfigError> {
    let rule: Arc<dyn LintRule> = match id {
        naming::ID => Arc::new(naming::NamingConventionRule::new(
            naming::ConventionTable::new(&config.naming_conventions)?,
        )),
        path_length::ID => Arc::new(path_length::PathLengthRule::new(
            config.rules.path_length.max,
        )),
        allowed_characters::ID => Arc::new(allowed_characters::AllowedCharactersRule::new(
            &config.rules.allowed_characters.pattern,
        )?),
        top_level::ID => Arc::new(top_level::TopLevelRule),
        _ => {
            return Err(ConfigError::UnknownRule {
                id: id.to_string(),
                suggestion: closest_rule(id),
            })
        }
    };
    Ok(rule)
}

/// Every built-in rule, in registration order.
pub fn all_builtin_rules(config: &Config) -> Result<Vec<Arc<dyn LintRule>>, ConfigError> {
    BUILTIN_RULES
        .iter()
        .map(|id| builtin_rule(id, config))
        .collect()
}

fn closest_rule(id: &str) -> Option<String> {
    BUILTIN_RULES
        .iter()
        .map(|known| (strsim::jaro_winkler(id, known), *known))
        .filter(|(score, _)| *score >= 0.8)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, known)| known.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_builtin_rules_instantiate() {
        let rules = all_builtin_rules(&Config::default()).unwrap();
        let ids: Vec<_> = rules.iter().map(|r| r.id()).collect();
        assert_eq!(ids, BUILTIN_RULES);
    }

    #[test]
    fn test_unknown_rule_suggests_closest() {
        let err = builtin_rule("path-lenght", &Config::default())
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ConfigError::UnknownRule { suggestion: Some(ref s), .. } if s == "path-length"
        ));
    }

    #[test]
    fn test_unknown_rule_without_close_match() {
        let err = builtin_rule("qqqq", &Config::default()).err().unwrap();
        assert!(matches!(
            err,
            ConfigError::UnknownRule {
                suggestion: None,
                ..
            }
        ));
    }

    #[test]
    fn test_rule_ids_are_unique() {
        let mut ids = BUILTIN_RULES.to_vec();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), BUILTIN_RULES.len());
    }
}
