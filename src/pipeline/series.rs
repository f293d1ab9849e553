// Chart-ready numeric series derived from a report.
//
// Two views: the distribution of known vs disputed scores (box plot input)
// and per-fragment paired values (grouped bar input). Rendering is left to
// whoever consumes these.

use serde::Serialize;

use super::analysis::AnalysisReport;

/// Five-number summary of a score series. Quartiles use linear
/// interpolation between order statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl BoxStats {
    /// `None` for an empty series.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Some(Self {
            min: sorted[0],
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// One labelled score series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub label: &'static str,
    pub values: Vec<f64>,
    pub stats: Option<BoxStats>,
}

impl Distribution {
    fn new(label: &'static str, values: Vec<f64>) -> Self {
        let stats = BoxStats::from_values(&values);
        Self {
            label,
            values,
            stats,
        }
    }
}

/// Known and disputed scores for a single fragment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairedBar {
    pub fragment: usize,
    pub known: f64,
    pub disputed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub known: Distribution,
    pub disputed: Distribution,
    pub bars: Vec<PairedBar>,
}

impl ChartSeries {
    pub fn from_report(report: &AnalysisReport) -> Self {
        let known = report.records.iter().map(|r| r.known).collect();
        let disputed = report.records.iter().map(|r| r.disputed).collect();
        let bars = report
            .records
            .iter()
            .map(|r| PairedBar {
                fragment: r.fragment,
                known: r.known,
                disputed: r.disputed,
            })
            .collect();

        Self {
            known: Distribution::new("fragment vs known", known),
            disputed: Distribution::new("fragment vs disputed", disputed),
            bars,
        }
    }
}
