pub mod expand;
pub mod progress;
pub mod sink;

use rayon::prelude::*;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::asset::{AssetAccessor, AssetPath, AssetRef};
use crate::error::ScanError;
use crate::rules::RuleContext;
use crate::ruleset::{LintRuleSet, ResolvedRule};
use crate::types::{ScanOutcome, Severity, Violation};

pub use expand::expand;
pub use progress::{CancelToken, LogProgress, NoProgress, ProgressSink};
pub use sink::ViolationSink;

/// Runs a rule set over expanded asset paths.
pub struct Scanner<'a> {
    accessor: &'a dyn AssetAccessor,
    progress: &'a dyn ProgressSink,
    cancel: CancelToken,
    jobs: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(accessor: &'a dyn AssetAccessor) -> Self {
        Self {
            accessor,
            progress: &NoProgress,
            cancel: CancelToken::new(),
            jobs: 1,
        }
    }

    pub fn with_progress(mut self, progress: &'a dyn ProgressSink) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// `1` evaluates assets in order on the calling thread; `0` uses the
    /// global rayon pool; any other value a dedicated pool of that size.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn scan(
        &self,
        paths: &[AssetPath],
        rule_set: &LintRuleSet,
    ) -> Result<ScanOutcome, ScanError> {
        let assets = expand(self.accessor, paths)?;
        let rules = rule_set.resolve();
        tracing::debug!(
            rule_set = %rule_set.id(),
            assets = assets.len(),
            rules = rules.len(),
            "starting scan"
        );

        let sink = if self.jobs == 1 {
            self.scan_sequential(&assets, &rules)
        } else {
            self.scan_parallel(&assets, &rules)
        };

        let cancelled = !sink.is_complete();
        let (violations, assets_scanned) = sink.into_prefix();
        tracing::info!(
            assets = assets_scanned,
            total = assets.len(),
            violations = violations.len(),
            cancelled,
            "scan finished"
        );

        Ok(ScanOutcome {
            violations,
            cancelled,
            assets_scanned,
            assets_total: assets.len(),
        })
    }

    fn scan_sequential(&self, assets: &[AssetRef], rules: &[ResolvedRule]) -> ViolationSink {
        let ctx = RuleContext::new(self.accessor);
        let mut sink = ViolationSink::new(assets.len());
        for (i, asset) in assets.iter().enumerate() {
            if self.cancel.is_cancelled() {
                break;
            }
            sink.record(i, evaluate_asset(asset, rules, &ctx));
            self.progress.report(i + 1, assets.len());
        }
        sink
    }

    fn scan_parallel(&self, assets: &[AssetRef], rules: &[ResolvedRule]) -> ViolationSink {
        let ctx = RuleContext::new(self.accessor);
        let done = AtomicUsize::new(0);
        let total = assets.len();

        let run = || {
            assets
                .par_iter()
                .map(|asset| {
                    if self.cancel.is_cancelled() {
                        return None;
                    }
                    let violations = evaluate_asset(asset, rules, &ctx);
                    let current = done.fetch_add(1, Ordering::SeqCst) + 1;
                    self.progress.report(current, total);
                    Some(violations)
                })
                .collect::<Vec<_>>()
        };

        let slots = if self.jobs == 0 {
            run()
        } else {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(self.jobs)
                .build()
            {
                Ok(pool) => pool.install(run),
                Err(e) => {
                    tracing::warn!(
                        jobs = self.jobs,
                        error = %e,
                        "falling back to global thread pool"
                    );
                    run()
                }
            }
        };

        ViolationSink::from_slots(slots)
    }
}

/// Scan with the default sequential scanner.
pub fn scan(
    accessor: &dyn AssetAccessor,
    paths: &[AssetPath],
    rule_set: &LintRuleSet,
    progress: &dyn ProgressSink,
    cancel: &CancelToken,
) -> Result<ScanOutcome, ScanError> {
    Scanner::new(accessor)
        .with_progress(progress)
        .with_cancel(cancel.clone())
        .scan(paths, rule_set)
}

/// Every rule over one asset, in rule order. A failing rule becomes an
/// `Error` violation and the remaining rules still run.
fn evaluate_asset(
    asset: &AssetRef,
    rules: &[ResolvedRule],
    ctx: &RuleContext<'_>,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    for resolved in rules {
        let rule_id = resolved.rule.id();
        let outcome = catch_unwind(AssertUnwindSafe(|| resolved.rule.evaluate(asset, ctx)));

        let fault = match outcome {
            Ok(Ok(findings)) => {
                violations.extend(findings.into_iter().enumerate().map(|(ordinal, f)| {
                    Violation {
                        asset: asset.path.clone(),
                        rule: rule_id.to_string(),
                        ordinal,
                        severity: resolved.severity,
                        message: f.message,
                    }
                }));
                continue;
            }
            Ok(Err(e)) => format!("{e:#}"),
            Err(payload) => format!("panicked: {}", panic_message(payload.as_ref())),
        };

        tracing::warn!(asset = %asset.path, rule = rule_id, "rule fault: {fault}");
        violations.push(Violation {
            asset: asset.path.clone(),
            rule: rule_id.to_string(),
            ordinal: 0,
            severity: Severity::Error,
            message: format!("rule fault: {fault}"),
        });
    }

    violations
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
