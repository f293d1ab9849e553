// Scoring — vector metrics, per-fragment similarity, proportional evaluation.

pub mod evaluation;
pub mod metric;
pub mod similarity;

pub use evaluation::{evaluate, BandMode, Evaluation, ToleranceBand, Verdict, VerdictThresholds};
pub use metric::{Direction, Metric};
pub use similarity::{score_fragment, SimilarityRecord};
