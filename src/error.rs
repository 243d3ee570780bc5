use std::path::PathBuf;

/// Problems found while loading configuration or resolving rule sets.
/// A scan never starts when one of these is raised.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("duplicate naming convention for classification \"{0}\"")]
    DuplicateClassification(String),

    #[error("unknown rule \"{id}\"{}", suggestion_suffix(.suggestion))]
    UnknownRule {
        id: String,
        suggestion: Option<String>,
    },

    #[error("unknown rule set \"{0}\"")]
    UnknownRuleSet(String),

    #[error("rule set \"{0}\" extends itself through its parents")]
    ExtendsCycle(String),

    #[error("invalid pattern for rule \"{rule}\": {source}")]
    InvalidPattern { rule: String, source: regex::Error },
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(" (did you mean \"{s}\"?)"))
        .unwrap_or_default()
}

/// Failures reported by an asset accessor.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error("no asset or namespace at {0}")]
    UnknownPath(String),

    #[error("failed to load {path}: {reason}")]
    Load { path: String, reason: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid asset catalog: {0}")]
    Catalog(#[from] serde_json::Error),
}

/// Fatal scan failures. Rule faults and cancellation are not errors.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("asset path must not be empty")]
    InvalidPath,

    #[error("cannot expand {path}: {source}")]
    Expansion { path: String, source: AccessError },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_rule_message_with_suggestion() {
        let err = ConfigError::UnknownRule {
            id: "naming-conventon".to_string(),
            suggestion: Some("naming-convention".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "unknown rule \"naming-conventon\" (did you mean \"naming-convention\"?)"
        );
    }

    #[test]
    fn test_unknown_rule_message_without_suggestion() {
        let err = ConfigError::UnknownRule {
            id: "zzz".to_string(),
            suggestion: None,
        };
        assert_eq!(err.to_string(), "unknown rule \"zzz\"");
    }

    #[test]
    fn test_expansion_error_names_path() {
        let err = ScanError::Expansion {
            path: "/Game/Missing".to_string(),
            source: AccessError::UnknownPath("/Game/Missing".to_string()),
        };
        assert!(err.to_string().contains("/Game/Missing"));
    }
}
