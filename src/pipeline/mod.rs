// Pipeline — the single entry point wiring profiling, scoring and evaluation.

pub mod analysis;
pub mod progress;
pub mod series;

pub use analysis::{analyze, analyze_with_progress, AnalysisReport, EvaluationSummary};
pub use progress::{NoProgress, Progress};
pub use series::{BoxStats, ChartSeries, Distribution, PairedBar};
