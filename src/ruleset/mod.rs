pub mod store;

use std::sync::Arc;

use crate::rules::LintRule;
use crate::types::Severity;

pub use store::{ConfigStore, RuleSetStore};

/// A rule plus the rule set's overrides for it.
#[derive(Clone)]
pub struct RuleEntry {
    pub rule: Arc<dyn LintRule>,
    pub enabled: bool,
    /// `None` keeps the rule's default severity.
    pub severity: Option<Severity>,
}

impl RuleEntry {
    pub fn new(rule: Arc<dyn LintRule>) -> Self {
        Self {
            rule,
            enabled: true,
            severity: None,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn id(&self) -> &'static str {
        self.rule.id()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn effective_severity(&self) -> Severity {
        self.severity.unwrap_or_else(|| self.rule.default_severity())
    }
}

impl std::fmt::Debug for RuleEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEntry")
            .field("rule", &self.id())
            .field("enabled", &self.enabled)
            .field("severity", &self.severity)
            .finish()
    }
}

/// An enabled rule with the severity its violations will carry.
#[derive(Clone)]
pub struct ResolvedRule {
    pub rule: Arc<dyn LintRule>,
    pub severity: Severity,
}

/// Ordered rules, unique by identifier.
#[derive(Debug, Clone, Default)]
pub struct LintRuleSet {
    id: String,
    entries: Vec<RuleEntry>,
}

impl LintRuleSet {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entries: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Register an entry. A later entry for the same identifier replaces the
    /// earlier one in place.
    pub fn insert(&mut self, entry: RuleEntry) {
        match self.entries.iter_mut().find(|e| e.id() == entry.id()) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn with(mut self, entry: RuleEntry) -> Self {
        self.insert(entry);
        self
    }

    pub fn entries(&self) -> &[RuleEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&RuleEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Extend this set with `overrides`: shared identifiers take the
    /// override's enabled flag (and severity, when it sets one) in this set's
    /// order; rules new to this set are appended in override order.
    pub fn merge(&self, overrides: &LintRuleSet) -> LintRuleSet {
        let mut entries: Vec<RuleEntry> = self
            .entries
            .iter()
            .map(|base| match overrides.get(base.id()) {
                Some(over) => RuleEntry {
                    rule: Arc::clone(&over.rule),
                    enabled: over.enabled,
                    severity: over.severity.or(base.severity),
                },
                None => base.clone(),
            })
            .collect();

        entries.extend(
            overrides
                .entries
                .iter()
                .filter(|over| self.get(over.id()).is_none())
                .cloned(),
        );

        LintRuleSet {
            id: overrides.id.clone(),
            entries,
        }
    }

    /// Enabled rules with their effective severities, in set order.
    pub fn resolve(&self) -> Vec<ResolvedRule> {
        self.entries
            .iter()
            .filter(|e| e.is_enabled())
            .map(|e| ResolvedRule {
                rule: Arc::clone(&e.rule),
                severity: e.effective_severity(),
            })
            .collect()
    }
}
