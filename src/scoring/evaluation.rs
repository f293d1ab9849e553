// Proportional evaluation of fragment scores.
//
// The mean fragment-vs-known score describes how the known author's own text
// scores against itself. A tolerance band of ±margin around that mean is the
// range a text by the same author is expected to land in. The share of
// fragment-vs-disputed scores inside the band is mapped to a verdict.
//
// For distance metrics a low score is a close match, so a disputed distance
// below the band is as good as one inside it. Those metrics only test the
// upper bound. The ratio thresholds are only meaningful for similarity
// metrics: a text sharing no n-grams with a fragment sits at that fragment's
// own vector length, which is close to the typical known distance. Distance
// runs therefore report the band counts but an inconclusive verdict.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::metric::Direction;
use super::similarity::SimilarityRecord;
use crate::error::{AnalysisError, Result};

/// Ratio cut-offs for the verdict.
///
/// These are fixed heuristics, not calibrated against any dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerdictThresholds {
    /// Minimum in-band ratio for a high-probability verdict (default 0.70)
    pub high: f64,
    /// Minimum in-band ratio for a moderate-probability verdict (default 0.40)
    pub moderate: f64,
}

impl Default for VerdictThresholds {
    fn default() -> Self {
        Self {
            high: 0.70,
            moderate: 0.40,
        }
    }
}

/// Categorical likelihood of common authorship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Low,
    Moderate,
    High,
    /// The metric does not support the ratio heuristic
    Inconclusive,
}

impl Verdict {
    /// Map an in-band ratio to a verdict. Both cut-offs are inclusive.
    pub fn from_ratio(ratio: f64, thresholds: &VerdictThresholds) -> Self {
        match ratio {
            r if r >= thresholds.high => Verdict::High,
            r if r >= thresholds.moderate => Verdict::Moderate,
            _ => Verdict::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Low => "low",
            Verdict::Moderate => "moderate",
            Verdict::High => "high",
            Verdict::Inconclusive => "inconclusive",
        }
    }

    /// Human-readable conclusion.
    pub fn description(&self) -> &'static str {
        match self {
            Verdict::Low => "low probability of common authorship",
            Verdict::Moderate => "moderate probability of common authorship",
            Verdict::High => "high probability of common authorship",
            Verdict::Inconclusive => "inconclusive: no verdict for distance metrics",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// How disputed scores are tested against the band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandMode {
    /// Closed interval, both ends inclusive (similarity metrics)
    Symmetric,
    /// Anything at or below the upper bound (distance metrics)
    UpperBound,
}

impl BandMode {
    pub fn for_direction(direction: Direction) -> Self {
        match direction {
            Direction::HigherIsCloser => BandMode::Symmetric,
            Direction::LowerIsCloser => BandMode::UpperBound,
        }
    }
}

/// Tolerance band around the mean fragment-vs-known score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToleranceBand {
    pub center: f64,
    pub delta: f64,
    pub lower: f64,
    pub upper: f64,
    pub mode: BandMode,
}

impl ToleranceBand {
    pub fn new(center: f64, margin: f64, mode: BandMode) -> Self {
        let delta = center * margin;
        Self {
            center,
            delta,
            lower: center - delta,
            upper: center + delta,
            mode,
        }
    }

    pub fn contains(&self, score: f64) -> bool {
        match self.mode {
            BandMode::Symmetric => self.lower <= score && score <= self.upper,
            BandMode::UpperBound => score <= self.upper,
        }
    }
}

/// Outcome of the proportional evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub mean_known: f64,
    pub band: ToleranceBand,
    pub in_band: usize,
    pub fragment_count: usize,
    /// in_band / fragment_count
    pub ratio: f64,
    pub verdict: Verdict,
    /// Reason the verdict was withheld, if it was
    pub caveat: Option<String>,
}

impl Evaluation {
    /// The ratio as a percentage, reported as the estimated probability.
    pub fn estimated_probability(&self) -> f64 {
        self.ratio * 100.0
    }
}

/// Attached to every distance-metric evaluation.
pub const DISTANCE_CAVEAT: &str = "distance scores do not separate unrelated texts from \
     same-author texts; use the cosine metric for an authorship verdict";

/// Evaluate the per-fragment scores against a tolerance band of `margin`.
///
/// Fails with `NoFragments` on an empty table and `InvalidInput` if the
/// margin is not a finite fraction in [0, 1].
pub fn evaluate(
    records: &[SimilarityRecord],
    margin: f64,
    direction: Direction,
    thresholds: &VerdictThresholds,
) -> Result<Evaluation> {
    validate_margin(margin)?;
    if records.is_empty() {
        return Err(AnalysisError::NoFragments);
    }

    let fragment_count = records.len();
    let mean_known = records.iter().map(|r| r.known).sum::<f64>() / fragment_count as f64;
    let band = ToleranceBand::new(mean_known, margin, BandMode::for_direction(direction));

    let in_band = records.iter().filter(|r| band.contains(r.disputed)).count();
    let ratio = in_band as f64 / fragment_count as f64;

    let (verdict, caveat) = match direction {
        Direction::HigherIsCloser => (Verdict::from_ratio(ratio, thresholds), None),
        Direction::LowerIsCloser => (Verdict::Inconclusive, Some(DISTANCE_CAVEAT.to_string())),
    };

    Ok(Evaluation {
        mean_known,
        band,
        in_band,
        fragment_count,
        ratio,
        verdict,
        caveat,
    })
}

pub(crate) fn validate_margin(margin: f64) -> Result<()> {
    if !margin.is_finite() || !(0.0..=1.0).contains(&margin) {
        return Err(AnalysisError::invalid(format!(
            "tolerance margin must be a fraction between 0 and 1, got {margin}"
        )));
    }
    Ok(())
}
