use owo_colors::OwoColorize;
use std::collections::BTreeMap;

use crate::types::{ScanOutcome, Severity};

pub fn render(outcome: &ScanOutcome) {
    if outcome.violations.is_empty() {
        println!();
        println!("  {}", "\u{2501}".repeat(50).dimmed());
        if outcome.cancelled {
            println!(
                "  {} after {} of {} assets, no issues so far",
                "cancelled".yellow(),
                outcome.assets_scanned,
                outcome.assets_total
            );
        } else {
            println!(
                "  {} in {} assets",
                "no issues found".green(),
                outcome.assets_total
            );
        }
        println!();
        return;
    }

    let mut by_rule: BTreeMap<_, Vec<_>> = BTreeMap::new();
    for v in &outcome.violations {
        by_rule.entry(v.rule.as_str()).or_default().push(v);
    }

    let summary = outcome.summary();

    println!();
    println!("  {}", "\u{2501}".repeat(50).dimmed());
    let mut parts = Vec::new();
    let fatal = outcome.count(Severity::Fatal);
    if fatal > 0 {
        parts.push(format!("{fatal} fatal").red().bold().to_string());
    }
    let errors = outcome.count(Severity::Error);
    if errors > 0 {
        parts.push(format!("{errors} errors").red().bold().to_string());
    }
    let warnings = outcome.count(Severity::Warning);
    if warnings > 0 {
        parts.push(format!("{warnings} warnings").yellow().bold().to_string());
    }
    let infos = outcome.count(Severity::Info);
    if infos > 0 {
        parts.push(format!("{infos} info").blue().to_string());
    }
    println!(
        "  {} across {} assets ({} failing, {} informational)",
        parts.join(", "),
        (summary.failing_assets + summary.informational_assets).bold(),
        summary.failing_assets,
        summary.informational_assets
    );
    if outcome.cancelled {
        println!(
            "  {}",
            format!(
                "cancelled after {} of {} assets",
                outcome.assets_scanned, outcome.assets_total
            )
            .yellow()
        );
    }
    println!("  {}", "\u{2501}".repeat(50).dimmed());

    let worst = |rule: &str| -> Severity {
        by_rule[rule]
            .iter()
            .map(|v| v.severity)
            .min()
            .unwrap_or(Severity::Info)
    };

    let mut rules: Vec<_> = by_rule.keys().copied().collect();
    rules.sort_by_key(|&rule| (worst(rule), rule));

    for rule in rules {
        let violations = &by_rule[rule];
        let count = violations.len();

        let (icon, label) = match worst(rule) {
            Severity::Fatal | Severity::Error => (
                "\u{2717}".red().to_string(),
                rule.red().bold().to_string(),
            ),
            Severity::Warning => (
                "\u{26a0}".yellow().to_string(),
                rule.yellow().bold().to_string(),
            ),
            Severity::Info => (
                "\u{2139}".blue().to_string(),
                rule.blue().bold().to_string(),
            ),
        };

        println!();
        println!("  {} {} {}", icon, label, format!("({count})").dimmed());

        for v in violations {
            println!("    {}", v.asset.dimmed());
            println!("      {:<8} {}", v.severity.to_string(), v.message);
        }
    }

    println!();
}
