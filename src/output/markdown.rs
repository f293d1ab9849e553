// Markdown conclusion report.
//
// Mirrors the terminal summary in a shareable file: parameters, the
// tolerance band, how many fragments fell inside it, and the verdict,
// followed by the per-fragment table.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::pipeline::AnalysisReport;
use crate::scoring::BandMode;

/// Render the report as Markdown. `generated_at` is printed verbatim.
pub fn render_report(report: &AnalysisReport, generated_at: &str) -> String {
    let s = &report.summary;
    let cap = s
        .profile_cap
        .map_or_else(|| "none".to_string(), |cap| cap.to_string());

    let mut md = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(md, "# Authorship Analysis Report\n");
    let _ = writeln!(md, "Generated: {generated_at}\n");
    let _ = writeln!(md, "## Conclusion\n");
    let _ = writeln!(md, "- **Metric:** {}", s.metric);
    let _ = writeln!(md, "- **N-gram length:** {}", s.ngram_size);
    let _ = writeln!(md, "- **Profile cap:** {cap}");
    let _ = writeln!(
        md,
        "- **Fragments:** {} of {} characters\n",
        s.fragment_count, s.fragment_len
    );
    let _ = writeln!(md, "---\n");
    let _ = writeln!(
        md,
        "- **Mean fragment vs known score:** {:.4}",
        s.mean_known
    );
    let _ = writeln!(
        md,
        "- **Tolerance range ±{}:** {:.4} ± {:.4} → [{:.4}, {:.4}]",
        super::percent(s.margin),
        s.mean_known,
        s.band_delta,
        s.band_lower,
        s.band_upper
    );
    if s.band_mode == BandMode::UpperBound {
        let _ = writeln!(
            md,
            "- **Band mode:** distance metric, scores at or below {:.4} count as in range",
            s.band_upper
        );
    }
    let _ = writeln!(
        md,
        "- **Fragments in range for the disputed text:** {} of {} ({})\n",
        s.in_band,
        s.fragment_count,
        super::percent(s.ratio)
    );
    let _ = writeln!(md, "---\n");
    let _ = writeln!(md, "**{}**\n", s.verdict.description().to_uppercase());
    match &s.caveat {
        Some(caveat) => {
            let _ = writeln!(md, "> **Caveat:** {caveat}\n");
        }
        None => {
            let _ = writeln!(
                md,
                "**Estimated probability:** {:.1}%\n",
                s.estimated_probability
            );
        }
    }

    let _ = writeln!(md, "## Per-Fragment Scores\n");
    let _ = writeln!(md, "| Fragment | {0} vs known | {0} vs disputed |", s.metric);
    let _ = writeln!(md, "|---:|---:|---:|");
    for record in &report.records {
        let _ = writeln!(
            md,
            "| {} | {:.6} | {:.6} |",
            record.fragment, record.known, record.disputed
        );
    }

    md
}

/// Write the Markdown report to `path`, creating parent directories.
pub fn write_report(report: &AnalysisReport, path: &Path) -> Result<()> {
    super::ensure_parent_dir(path)?;

    let generated_at = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    fs::write(path, render_report(report, &generated_at))
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}
