use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Violation severity, ordered from most to least severe.
///
/// `Fatal < Error < Warning < Info`: comparing against a threshold with `<=`
/// asks "at least this severe".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Fatal,
    Error,
    Warning,
    Info,
}

impl Severity {
    /// An asset owning a violation at this severity counts as failing.
    pub fn is_failing(self) -> bool {
        self <= Severity::Error
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Severity::Fatal => "fatal",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        })
    }
}

/// Stable identity of a violation across repeated scans.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ViolationKey {
    pub asset: String,
    pub rule: String,
    pub ordinal: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Canonical path of the offending asset.
    pub asset: String,
    pub rule: String,
    /// Position among the violations one rule reported for one asset.
    pub ordinal: usize,
    /// Severity in effect for the rule set that produced this violation.
    pub severity: Severity,
    pub message: String,
}

impl Violation {
    pub fn key(&self) -> ViolationKey {
        ViolationKey {
            asset: self.asset.clone(),
            rule: self.rule.clone(),
            ordinal: self.ordinal,
        }
    }
}

/// Result of one scan. `cancelled` is an outcome, not an error: the
/// violations are then the consistent prefix gathered before cancellation.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ScanOutcome {
    pub violations: Vec<Violation>,
    pub cancelled: bool,
    pub assets_scanned: usize,
    pub assets_total: usize,
}

impl ScanOutcome {
    pub fn count(&self, severity: Severity) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .count()
    }

    pub fn has_severity_at_least(&self, threshold: Severity) -> bool {
        self.violations.iter().any(|v| v.severity <= threshold)
    }

    pub fn summary(&self) -> Summary {
        summarize(&self.violations)
    }
}

/// Per-asset classification of a violation list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Assets with at least one violation at `Error` or more severe.
    pub failing_assets: usize,
    /// Assets whose violations are all `Warning` or `Info`.
    pub informational_assets: usize,
}

pub fn summarize(violations: &[Violation]) -> Summary {
    let mut worst: HashMap<&str, Severity> = HashMap::new();
    for v in violations {
        worst
            .entry(v.asset.as_str())
            .and_modify(|s| *s = (*s).min(v.severity))
            .or_insert(v.severity);
    }

    let failing_assets = worst.values().filter(|s| s.is_failing()).count();
    Summary {
        failing_assets,
        informational_assets: worst.len() - failing_assets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(asset: &str, severity: Severity) -> Violation {
        Violation {
            asset: asset.to_string(),
            rule: "naming-convention".to_string(),
            ordinal: 0,
            severity,
            message: "test".to_string(),
        }
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Fatal < Severity::Error);
        assert!(Severity::Error < Severity::Warning);
        assert!(Severity::Warning < Severity::Info);
    }

    #[test]
    fn test_is_failing_boundary_is_inclusive() {
        assert!(Severity::Fatal.is_failing());
        assert!(Severity::Error.is_failing());
        assert!(!Severity::Warning.is_failing());
        assert!(!Severity::Info.is_failing());
    }

    #[test]
    fn test_has_severity_at_least() {
        let outcome = ScanOutcome {
            violations: vec![make_violation("/Game/A", Severity::Warning)],
            ..Default::default()
        };
        assert!(!outcome.has_severity_at_least(Severity::Error));
        assert!(outcome.has_severity_at_least(Severity::Warning));
        assert!(outcome.has_severity_at_least(Severity::Info));
    }

    #[test]
    fn test_has_severity_at_least_empty() {
        assert!(!ScanOutcome::default().has_severity_at_least(Severity::Info));
    }

    #[test]
    fn test_summarize_counts_assets_not_violations() {
        let violations = vec![
            make_violation("/Game/A", Severity::Warning),
            make_violation("/Game/A", Severity::Error),
            make_violation("/Game/B", Severity::Info),
            make_violation("/Game/B", Severity::Warning),
            make_violation("/Game/C", Severity::Fatal),
        ];
        let summary = summarize(&violations);
        assert_eq!(summary.failing_assets, 2);
        assert_eq!(summary.informational_assets, 1);
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(summarize(&[]), Summary::default());
    }

    #[test]
    fn test_count_by_severity() {
        let outcome = ScanOutcome {
            violations: vec![
                make_violation("/Game/A", Severity::Error),
                make_violation("/Game/B", Severity::Error),
                make_violation("/Game/C", Severity::Info),
            ],
            ..Default::default()
        };
        assert_eq!(outcome.count(Severity::Error), 2);
        assert_eq!(outcome.count(Severity::Info), 1);
        assert_eq!(outcome.count(Severity::Fatal), 0);
    }

    #[test]
    fn test_severity_serialization() {
        let json = serde_json::to_value(make_violation("/Game/A", Severity::Fatal)).unwrap();
        assert_eq!(json["severity"], "fatal");
        assert_eq!(json["rule"], "naming-convention");
    }

    #[test]
    fn test_severity_deserialize_invalid() {
        let result: Result<Severity, _> = serde_json::from_str(r#""critical""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_violation_key() {
        let v = make_violation("/Game/A", Severity::Error);
        assert_eq!(
            v.key(),
            ViolationKey {
                asset: "/Game/A".to_string(),
                rule: "naming-convention".to_string(),
                ordinal: 0,
            }
        );
    }
}
