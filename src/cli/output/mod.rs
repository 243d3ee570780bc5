pub mod github;
pub mod json;
pub mod text;

use crate::cli::OutputFormat;
use crate::types::ScanOutcome;

pub fn render(outcome: &ScanOutcome, format: OutputFormat) {
    match format {
        OutputFormat::Text => text::render(outcome),
        OutputFormat::Json => json::render(outcome),
        OutputFormat::Github => github::render(outcome),
    }
}
