// Colored terminal output for analysis results and single-text profiles.
//
// main.rs delegates all formatting here so the pipeline never prints.

use colored::Colorize;

use crate::pipeline::{AnalysisReport, ChartSeries, Distribution};
use crate::profile::NgramProfile;
use crate::scoring::{BandMode, Verdict};

/// Display the evaluation summary.
pub fn display_summary(report: &AnalysisReport) {
    let s = &report.summary;

    println!("\n{}", "=== Authorship Analysis ===".bold());
    println!();
    println!("  Metric:            {}", s.metric);
    println!("  N-gram length:     {}", s.ngram_size);
    println!(
        "  Profile cap:       {}",
        s.profile_cap
            .map_or_else(|| "none".to_string(), |cap| cap.to_string())
    );
    println!(
        "  Fragments:         {} × {} chars",
        s.fragment_count, s.fragment_len
    );
    println!();
    println!("  Mean vs known:     {:.4}", s.mean_known);
    println!(
        "  Tolerance ±{}:  {:.4} ± {:.4} → [{:.4}, {:.4}]",
        super::percent(s.margin),
        s.mean_known,
        s.band_delta,
        s.band_lower,
        s.band_upper
    );
    if s.band_mode == BandMode::UpperBound {
        println!(
            "  {}",
            "Distance metric: disputed scores below the band count as in range.".dimmed()
        );
    }
    println!(
        "  In range:          {} of {} ({})",
        s.in_band,
        s.fragment_count,
        super::percent(s.ratio)
    );
    println!();
    println!(
        "  {} {}",
        "Verdict:".bold(),
        colorize_verdict(s.verdict)
    );
    match &s.caveat {
        Some(caveat) => println!("  {} {}", "Caveat:".yellow().bold(), caveat),
        None => println!(
            "  Estimated probability: {:.1}%",
            s.estimated_probability
        ),
    }
}

/// Display the per-fragment table with paired bars.
///
/// Bars are scaled to the largest score in the table so both similarity and
/// distance metrics fill the available width.
pub fn display_fragment_table(report: &AnalysisReport) {
    let series = ChartSeries::from_report(report);
    if series.bars.is_empty() {
        return;
    }

    println!(
        "\n{}",
        format!("=== Per-Fragment Scores ({} fragments) ===", series.bars.len()).bold()
    );
    println!();
    println!(
        "  {:>5}  {:>8}  {:>8}  {}",
        "#".dimmed(),
        "Known".dimmed(),
        "Disputed".dimmed(),
        "blue = known, yellow = disputed".dimmed()
    );
    println!("  {}", "-".repeat(60).dimmed());

    let bar_width: usize = 24;
    let scale = series
        .bars
        .iter()
        .flat_map(|b| [b.known, b.disputed])
        .fold(0.0_f64, f64::max);

    let band = report.summary.band();
    for bar in &series.bars {
        let marker = if band.contains(bar.disputed) { "✓".green() } else { "·".dimmed() };

        println!(
            "  {:>5}  {:>8.4}  {:>8.4}  {} {}",
            bar.fragment,
            bar.known,
            bar.disputed,
            render_bar(bar.known, scale, bar_width).bright_blue(),
            marker
        );
        println!(
            "  {:>5}  {:>8}  {:>8}  {}",
            "",
            "",
            "",
            render_bar(bar.disputed, scale, bar_width).bright_yellow()
        );
    }

    println!();
    display_distribution(&series.known);
    display_distribution(&series.disputed);
}

fn display_distribution(dist: &Distribution) {
    if let Some(stats) = dist.stats {
        println!(
            "  {:<22} min {:.4}  q1 {:.4}  median {:.4}  q3 {:.4}  max {:.4}",
            dist.label, stats.min, stats.q1, stats.median, stats.q3, stats.max
        );
    }
}

/// Display the top n-grams of a single profile as a bar chart.
pub fn display_profile(profile: &NgramProfile, label: &str, top: usize) {
    println!(
        "\n{}",
        format!(
            "=== {}-gram profile of {} ({} n-grams, {} retained) ===",
            profile.n(),
            label,
            profile.total(),
            profile.len()
        )
        .bold()
    );
    println!();

    let entries = profile.top(top);
    let max = entries.first().map_or(0.0, |e| e.frequency);
    let bar_width: usize = 20;

    for (i, entry) in entries.iter().enumerate() {
        println!(
            "  {:>3}. {:<12} {:>7}  {:.5} {}",
            i + 1,
            super::visible_ngram(&entry.ngram).bold(),
            entry.count,
            entry.frequency,
            render_bar(entry.frequency, max, bar_width).bright_green()
        );
    }

    println!();
    println!(
        "  Retained share of all n-grams: {}",
        super::percent(profile.frequency_sum())
    );
}

fn render_bar(value: f64, scale: f64, width: usize) -> String {
    let filled = if scale > 0.0 {
        ((value / scale) * width as f64).round().clamp(0.0, width as f64) as usize
    } else {
        0
    };
    format!("[{}{}]", "=".repeat(filled), " ".repeat(width - filled))
}

/// Colorize a verdict by its tier.
fn colorize_verdict(verdict: Verdict) -> colored::ColoredString {
    let text = verdict.description().to_uppercase();
    match verdict {
        Verdict::High => text.green().bold(),
        Verdict::Moderate => text.yellow().bold(),
        Verdict::Low => text.red().bold(),
        Verdict::Inconclusive => text.dimmed(),
    }
}
