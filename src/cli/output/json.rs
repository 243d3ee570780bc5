use serde::Serialize;

use crate::types::{ScanOutcome, Severity, Violation};

#[derive(Serialize)]
struct JsonOutput<'a> {
    violations: &'a [Violation],
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonSummary {
    fatal: usize,
    errors: usize,
    warnings: usize,
    info: usize,
    failing_assets: usize,
    informational_assets: usize,
    assets_scanned: usize,
    assets_total: usize,
    cancelled: bool,
}

fn build_output(outcome: &ScanOutcome) -> JsonOutput<'_> {
    let summary = outcome.summary();
    JsonOutput {
        violations: &outcome.violations,
        summary: JsonSummary {
            fatal: outcome.count(Severity::Fatal),
            errors: outcome.count(Severity::Error),
            warnings: outcome.count(Severity::Warning),
            info: outcome.count(Severity::Info),
            failing_assets: summary.failing_assets,
            informational_assets: summary.informational_assets,
            assets_scanned: outcome.assets_scanned,
            assets_total: outcome.assets_total,
            cancelled: outcome.cancelled,
        },
    }
}

pub fn render(outcome: &ScanOutcome) {
    let output = build_output(outcome);
    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!("failed to serialize results: {e}"),
    }
}
