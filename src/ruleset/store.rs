use std::collections::HashSet;

use crate::config::{Config, RuleSetConfig};
use crate::error::ConfigError;
use crate::rules::{all_builtin_rules, builtin_rule};

use super::{LintRuleSet, RuleEntry};

/// Where callers obtain the rule set to scan with.
pub trait RuleSetStore {
    fn load_default_rule_set(&self) -> Result<LintRuleSet, ConfigError>;

    fn load_rule_set(&self, id: &str) -> Result<LintRuleSet, ConfigError>;

    fn rule_set_ids(&self) -> Vec<String>;
}

/// Rule sets declared in the `[rule_sets]` tables of a [`Config`].
pub struct ConfigStore<'a> {
    config: &'a Config,
}

impl<'a> ConfigStore<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    fn build(&self, id: &str, set: &RuleSetConfig) -> Result<LintRuleSet, ConfigError> {
        let mut rule_set = LintRuleSet::new(id);
        for rule_ref in &set.rules {
            let mut entry = RuleEntry::new(builtin_rule(&rule_ref.id, self.config)?);
            entry.enabled = rule_ref.enabled;
            entry.severity = rule_ref.severity;
            rule_set.insert(entry);
        }
        Ok(rule_set)
    }

    /// Built-in fallback when the config declares no rule sets at all.
    fn builtin_default(&self, id: &str) -> Result<LintRuleSet, ConfigError> {
        Ok(all_builtin_rules(self.config)?
            .into_iter()
            .fold(LintRuleSet::new(id), |set, rule| {
                set.with(RuleEntry::new(rule))
            }))
    }

    /// `id` and its ancestors, root first.
    fn chain(&self, id: &str) -> Result<Vec<(&'a str, &'a RuleSetConfig)>, ConfigError> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(id);

        while let Some(name) = current {
            let (key, set) = self
                .config
                .rule_sets
                .get_key_value(name)
                .ok_or_else(|| ConfigError::UnknownRuleSet(name.to_string()))?;
            if !seen.insert(key.as_str()) {
                return Err(ConfigError::ExtendsCycle(id.to_string()));
            }
            chain.push((key.as_str(), set));
            current = set.extends.as_deref();
        }

        chain.reverse();
        Ok(chain)
    }
}

impl RuleSetStore for ConfigStore<'_> {
    fn load_default_rule_set(&self) -> Result<LintRuleSet, ConfigError> {
        self.load_rule_set(&self.config.default_rule_set)
    }

    fn load_rule_set(&self, id: &str) -> Result<LintRuleSet, ConfigError> {
        if self.config.rule_sets.is_empty() && id == self.config.default_rule_set {
            return self.builtin_default(id);
        }

        let mut merged: Option<LintRuleSet> = None;
        for (name, set) in self.chain(id)? {
            let layer = self.build(name, set)?;
            merged = Some(match merged {
                Some(base) => base.merge(&layer),
                None => layer,
            });
        }

        let rule_set = merged.unwrap_or_else(|| LintRuleSet::new(id));
        tracing::debug!(
            rule_set = %rule_set.id(),
            rules = rule_set.len(),
            "loaded rule set"
        );
        Ok(rule_set)
    }

    fn rule_set_ids(&self) -> Vec<String> {
        if self.config.rule_sets.is_empty() {
            return vec![self.config.default_rule_set.clone()];
        }
        self.config.rule_sets.keys().cloned().collect()
    }
}
