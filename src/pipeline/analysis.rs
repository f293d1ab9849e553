// Analysis pipeline — disputed text + known corpus in, report out.
//
// Steps:
// 1. Validate parameters and reject empty texts
// 2. Profile the disputed text, then cut the known corpus into fragments
//    of the disputed length and profile it as a whole
// 3. Profile and score every fragment
// 4. Evaluate the score table against the tolerance band
//
// Any failure aborts the run. No partial table is ever returned.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::progress::{NoProgress, Progress};
use crate::config::AnalysisParams;
use crate::error::{AnalysisError, Result};
use crate::profile::{self, NgramProfile};
use crate::scoring::{self, BandMode, Metric, SimilarityRecord, ToleranceBand, Verdict};

/// Summary of one run: parameters plus the evaluation outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub metric: Metric,
    pub ngram_size: usize,
    pub profile_cap: Option<usize>,
    pub margin: f64,
    pub fragment_count: usize,
    /// Length of the disputed text, which is also the fragment length
    pub fragment_len: usize,
    pub mean_known: f64,
    pub band_delta: f64,
    pub band_lower: f64,
    pub band_upper: f64,
    pub band_mode: BandMode,
    pub in_band: usize,
    pub ratio: f64,
    pub estimated_probability: f64,
    pub verdict: Verdict,
    /// Set when the verdict is withheld for this metric
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caveat: Option<String>,
}

impl EvaluationSummary {
    /// The tolerance band the disputed scores were tested against.
    pub fn band(&self) -> ToleranceBand {
        ToleranceBand {
            center: self.mean_known,
            delta: self.band_delta,
            lower: self.band_lower,
            upper: self.band_upper,
            mode: self.band_mode,
        }
    }
}

/// Full result of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: EvaluationSummary,
    pub records: Vec<SimilarityRecord>,
}

/// Run the analysis with no progress reporting.
pub fn analyze(params: &AnalysisParams, disputed: &str, known: &str) -> Result<AnalysisReport> {
    analyze_with_progress(params, disputed, known, &NoProgress)
}

/// Run the analysis, reporting per-fragment progress to `progress`.
pub fn analyze_with_progress(
    params: &AnalysisParams,
    disputed: &str,
    known: &str,
    progress: &dyn Progress,
) -> Result<AnalysisReport> {
    params.validate()?;
    if disputed.is_empty() {
        return Err(AnalysisError::invalid("disputed text is empty"));
    }
    if known.is_empty() {
        return Err(AnalysisError::invalid("known corpus is empty"));
    }

    let n = params.ngram_size;
    let cap = params.profile_cap;

    let disputed_profile = NgramProfile::build(disputed, n, cap)?;
    let fragment_len = profile::char_len(disputed);
    let fragments = profile::fragment(known, fragment_len)?;
    let known_profile = NgramProfile::build(known, n, cap)?;

    info!(
        disputed_chars = fragment_len,
        disputed_ngrams = disputed_profile.len(),
        known_ngrams = known_profile.len(),
        fragments = fragments.len(),
        "Built reference profiles"
    );

    if fragments.len() == 1 {
        warn!(
            known_chars = profile::char_len(known),
            fragment_len,
            "Known corpus fills a single fragment; the tolerance band rests on one score"
        );
    }

    progress.start(fragments.len());
    let mut records = Vec::with_capacity(fragments.len());
    for (i, text) in fragments.iter().enumerate() {
        let fragment_profile = NgramProfile::build(text, n, cap)?;
        let record = scoring::score_fragment(
            i + 1,
            &fragment_profile,
            &known_profile,
            &disputed_profile,
            params.metric,
        );
        debug!(
            fragment = record.fragment,
            vocabulary = fragment_profile.len(),
            known = record.known,
            disputed = record.disputed,
            "Scored fragment"
        );
        records.push(record);
        progress.advance();
    }
    progress.finish();

    let evaluation = scoring::evaluate(
        &records,
        params.margin,
        params.metric.direction(),
        &params.thresholds,
    )?;

    info!(
        metric = %params.metric,
        mean_known = evaluation.mean_known,
        in_band = evaluation.in_band,
        fragments = evaluation.fragment_count,
        verdict = evaluation.verdict.as_str(),
        "Evaluation complete"
    );
    if let Some(caveat) = &evaluation.caveat {
        warn!(metric = %params.metric, "No authorship verdict: {caveat}");
    }

    let summary = EvaluationSummary {
        metric: params.metric,
        ngram_size: n,
        profile_cap: cap,
        margin: params.margin,
        fragment_count: evaluation.fragment_count,
        fragment_len,
        mean_known: evaluation.mean_known,
        band_delta: evaluation.band.delta,
        band_lower: evaluation.band.lower,
        band_upper: evaluation.band.upper,
        band_mode: evaluation.band.mode,
        in_band: evaluation.in_band,
        ratio: evaluation.ratio,
        estimated_probability: evaluation.estimated_probability(),
        verdict: evaluation.verdict,
        caveat: evaluation.caveat,
    };

    Ok(AnalysisReport { summary, records })
}
