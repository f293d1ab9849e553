// Composition tests — the full pipeline from texts to verdict.
//
// These exercise the data flow between modules:
//   Profile -> Fragment -> Score -> Evaluate -> Report / ChartSeries
// without any filesystem access. Texts are generated deterministically so
// every run sees identical input.

use std::cell::Cell;

use stylometer::config::AnalysisParams;
use stylometer::error::AnalysisError;
use stylometer::pipeline::{analyze, analyze_with_progress, ChartSeries, Progress};
use stylometer::scoring::{BandMode, Metric, Verdict};

const WORDS: &[&str] = &[
    "the", "of", "and", "to", "in", "that", "it", "was", "his", "he", "with", "for", "as",
    "had", "you", "not", "be", "her", "on", "at", "by", "which", "have", "or", "from",
    "this", "him", "but", "all", "she", "they", "were", "my", "are", "me", "one", "their",
    "so", "an", "said", "them", "we", "who", "would", "been", "will", "no", "when", "there",
    "if", "more", "out", "up", "into", "do", "any", "your", "what", "has", "man", "could",
];

/// Deterministic pseudo-English text of exactly `len` chars.
fn synthetic_text(seed: u64, len: usize) -> String {
    let mut state = seed;
    let mut text = String::new();
    while text.chars().count() < len {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let word = WORDS[((state >> 33) % WORDS.len() as u64) as usize];
        text.push_str(word);
        text.push(if (state >> 20) % 11 == 0 { '.' } else { ' ' });
    }
    text.chars().take(len).collect()
}

fn params(metric: Metric, margin: f64) -> AnalysisParams {
    AnalysisParams {
        ngram_size: 4,
        profile_cap: Some(1000),
        metric,
        margin,
        ..AnalysisParams::default()
    }
}

// ============================================================
// End-to-end scenarios
// ============================================================

#[test]
fn five_thousand_chars_make_five_fragments() {
    let disputed = synthetic_text(1, 1000);
    let known = synthetic_text(2, 5000);
    assert_eq!(disputed.chars().count(), 1000);
    assert_eq!(known.chars().count(), 5000);

    let report = analyze(&params(Metric::Cosine, 0.10), &disputed, &known).unwrap();
    assert_eq!(report.records.len(), 5);
    assert_eq!(report.summary.fragment_count, 5);
    assert_eq!(report.summary.fragment_len, 1000);
    assert_eq!(report.summary.ngram_size, 4);
    assert_eq!(report.summary.profile_cap, Some(1000));
    assert_eq!(report.summary.metric, Metric::Cosine);
}

#[test]
fn remainder_chars_do_not_add_a_fragment() {
    let disputed = synthetic_text(1, 1000);
    let known = synthetic_text(2, 5999);
    let report = analyze(&params(Metric::Cosine, 0.10), &disputed, &known).unwrap();
    assert_eq!(report.summary.fragment_count, 5);
}

#[test]
fn known_shorter_than_disputed_is_insufficient_data() {
    let disputed = synthetic_text(1, 1000);
    let known = synthetic_text(2, 999);
    let result = analyze(&params(Metric::Cosine, 0.10), &disputed, &known);
    match result {
        Err(AnalysisError::InsufficientData {
            corpus_len,
            fragment_len,
        }) => {
            assert_eq!(corpus_len, 999);
            assert_eq!(fragment_len, 1000);
        }
        other => panic!("expected InsufficientData, got {other:?}"),
    }
}

#[test]
fn repeated_disputed_text_is_high_probability() {
    let disputed = synthetic_text(3, 1000);
    let known = disputed.repeat(5);

    let report = analyze(&params(Metric::Cosine, 0.10), &disputed, &known).unwrap();
    assert_eq!(report.summary.fragment_count, 5);
    for record in &report.records {
        assert!(
            (record.disputed - 1.0).abs() < 1e-9,
            "Fragment {} should match the disputed text exactly, got {}",
            record.fragment,
            record.disputed
        );
    }
    assert_eq!(report.summary.in_band, 5);
    assert_eq!(report.summary.ratio, 1.0);
    assert_eq!(report.summary.verdict, Verdict::High);
    assert!((report.summary.estimated_probability - 100.0).abs() < 1e-9);
}

#[test]
fn repeated_disputed_text_under_distance_is_in_band_but_inconclusive() {
    let disputed = synthetic_text(3, 1000);
    let known = disputed.repeat(5);

    let report = analyze(&params(Metric::Euclidean, 0.10), &disputed, &known).unwrap();
    assert_eq!(report.summary.band_mode, BandMode::UpperBound);
    for record in &report.records {
        assert!(record.disputed.abs() < 1e-12);
    }
    assert_eq!(report.summary.in_band, 5);
    assert_eq!(report.summary.verdict, Verdict::Inconclusive);
    assert!(report.summary.caveat.is_some());
}

#[test]
fn unrelated_script_is_low_probability() {
    // Disputed text shares no characters with the known corpus
    let disputed: String = "абвгдеёжзийклмнопрстуфхцчшщъыьэюя ".repeat(30);
    let known = synthetic_text(4, 5000);

    let report = analyze(&params(Metric::Cosine, 0.10), &disputed, &known).unwrap();
    for record in &report.records {
        assert_eq!(record.disputed, 0.0);
        assert!(record.known > 0.0);
    }
    assert_eq!(report.summary.in_band, 0);
    assert_eq!(report.summary.verdict, Verdict::Low);
}

#[test]
fn unrelated_script_under_distance_is_inconclusive() {
    // Scores of an unrelated text land next to the known mean distance, so
    // the band alone cannot tell them apart.
    let disputed: String = "абвгдеёжзийклмнопрстуфхцчшщъыьэюя ".repeat(30);
    let known = synthetic_text(4, 5000);

    let report = analyze(&params(Metric::Euclidean, 0.05), &disputed, &known).unwrap();
    assert_eq!(report.summary.fragment_count, 4);
    assert_eq!(report.summary.verdict, Verdict::Inconclusive);
    assert!(report.summary.caveat.is_some());
}

#[test]
fn cosine_summary_has_no_caveat() {
    let disputed = synthetic_text(3, 1000);
    let known = disputed.repeat(5);
    let report = analyze(&params(Metric::Cosine, 0.10), &disputed, &known).unwrap();
    assert!(report.summary.caveat.is_none());
}

#[test]
fn cosine_scores_stay_in_unit_range() {
    let disputed = synthetic_text(5, 800);
    let known = synthetic_text(6, 4000);
    let report = analyze(&params(Metric::Cosine, 0.05), &disputed, &known).unwrap();
    for record in &report.records {
        assert!((0.0..=1.0 + 1e-12).contains(&record.known));
        assert!((0.0..=1.0 + 1e-12).contains(&record.disputed));
    }
}

#[test]
fn summary_band_matches_mean_and_margin() {
    let disputed = synthetic_text(7, 500);
    let known = synthetic_text(8, 3000);
    let report = analyze(&params(Metric::Cosine, 0.2), &disputed, &known).unwrap();
    let s = &report.summary;

    let mean = report.records.iter().map(|r| r.known).sum::<f64>() / report.records.len() as f64;
    assert!((s.mean_known - mean).abs() < 1e-12);
    assert!((s.band_delta - mean * 0.2).abs() < 1e-12);
    assert!((s.band_lower - (mean - mean * 0.2)).abs() < 1e-12);
    assert!((s.band_upper - (mean + mean * 0.2)).abs() < 1e-12);

    let in_band = report
        .records
        .iter()
        .filter(|r| s.band_lower <= r.disputed && r.disputed <= s.band_upper)
        .count();
    assert_eq!(s.in_band, in_band);
}

#[test]
fn analysis_is_deterministic() {
    let disputed = synthetic_text(9, 700);
    let known = synthetic_text(10, 3500);
    let p = params(Metric::Cosine, 0.05);
    assert_eq!(
        analyze(&p, &disputed, &known).unwrap(),
        analyze(&p, &disputed, &known).unwrap()
    );
}

#[test]
fn invalid_margin_is_rejected_before_scoring() {
    let disputed = synthetic_text(1, 100);
    let known = synthetic_text(2, 500);
    let result = analyze(&params(Metric::Cosine, -0.5), &disputed, &known);
    assert!(matches!(result, Err(AnalysisError::InvalidInput(_))));
}

// ============================================================
// Progress and chart series
// ============================================================

#[derive(Default)]
struct CountingProgress {
    total: Cell<usize>,
    advanced: Cell<usize>,
    finished: Cell<bool>,
}

impl Progress for CountingProgress {
    fn start(&self, total: usize) {
        self.total.set(total);
    }
    fn advance(&self) {
        self.advanced.set(self.advanced.get() + 1);
    }
    fn finish(&self) {
        self.finished.set(true);
    }
}

#[test]
fn progress_sees_every_fragment() {
    let disputed = synthetic_text(1, 300);
    let known = synthetic_text(2, 2000);
    let progress = CountingProgress::default();
    let report =
        analyze_with_progress(&params(Metric::Cosine, 0.05), &disputed, &known, &progress)
            .unwrap();
    assert_eq!(progress.total.get(), 6);
    assert_eq!(progress.advanced.get(), report.records.len());
    assert!(progress.finished.get());
}

#[test]
fn chart_series_mirror_the_table() {
    let disputed = synthetic_text(1, 500);
    let known = synthetic_text(2, 2600);
    let report = analyze(&params(Metric::Cosine, 0.05), &disputed, &known).unwrap();
    let series = ChartSeries::from_report(&report);

    assert_eq!(series.bars.len(), report.records.len());
    assert_eq!(series.known.values.len(), 5);
    assert_eq!(series.disputed.values.len(), 5);
    for (bar, record) in series.bars.iter().zip(&report.records) {
        assert_eq!(bar.fragment, record.fragment);
        assert_eq!(bar.known, record.known);
        assert_eq!(bar.disputed, record.disputed);
    }

    let stats = series.known.stats.unwrap();
    assert!(stats.min <= stats.q1 && stats.q1 <= stats.median);
    assert!(stats.median <= stats.q3 && stats.q3 <= stats.max);
}
