use crate::types::{ScanOutcome, Severity};

pub fn render(outcome: &ScanOutcome) {
    for v in &outcome.violations {
        let level = match v.severity {
            Severity::Fatal | Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "notice",
        };

        println!(
            "::{level} title={rule}::{asset}: {message}",
            rule = v.rule,
            asset = v.asset,
            message = v.message,
        );
    }
}
