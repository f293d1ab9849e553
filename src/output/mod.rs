// Output formatting — terminal display and report generation.

pub mod markdown;
pub mod terminal;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::pipeline::AnalysisReport;

/// Write the full report (summary and table) as pretty-printed JSON.
pub fn write_json(report: &AnalysisReport, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let body = serde_json::to_string_pretty(report)?;
    fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Create the parent directory of `path` if it has one.
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    Ok(())
}

/// Make whitespace inside an n-gram visible for display.
///
/// Spaces become `·`, newlines `⏎`, tabs `→`, and carriage returns are
/// dropped. N-grams often straddle word boundaries, so a raw space would be
/// indistinguishable from column padding.
pub fn visible_ngram(ngram: &str) -> String {
    ngram
        .chars()
        .filter(|&c| c != '\r')
        .map(|c| match c {
            ' ' => '·',
            '\n' => '⏎',
            '\t' => '→',
            other => other,
        })
        .collect()
}

/// Format a fraction as a percentage with one decimal place.
pub fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}
