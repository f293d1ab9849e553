// Per-fragment similarity scoring.
//
// Each fragment is compared over its own vocabulary: the keys of the
// fragment's profile, in that profile's rank order. The known-corpus and
// disputed profiles are looked up on those same keys, with 0.0 for anything
// they did not retain. Different fragments therefore produce vectors of
// different lengths, which is intended.

use serde::{Deserialize, Serialize};

use super::metric::Metric;
use crate::profile::NgramProfile;

/// Scores for one fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityRecord {
    /// 1-based position of the fragment in the known corpus
    pub fragment: usize,
    /// Fragment compared against the whole known corpus
    pub known: f64,
    /// Fragment compared against the disputed text
    pub disputed: f64,
}

/// Frequencies of `keys` in `profile`, one value per key, 0.0 when absent.
pub fn frequency_vector<'a>(
    keys: impl IntoIterator<Item = &'a str>,
    profile: &NgramProfile,
) -> Vec<f64> {
    keys.into_iter().map(|k| profile.frequency(k)).collect()
}

/// Score one fragment profile against the known-corpus and disputed profiles.
pub fn score_fragment(
    fragment: usize,
    fragment_profile: &NgramProfile,
    known_profile: &NgramProfile,
    disputed_profile: &NgramProfile,
    metric: Metric,
) -> SimilarityRecord {
    let own: Vec<f64> = fragment_profile.entries().iter().map(|e| e.frequency).collect();
    let known = frequency_vector(fragment_profile.keys(), known_profile);
    let disputed = frequency_vector(fragment_profile.keys(), disputed_profile);

    SimilarityRecord {
        fragment,
        known: metric.compare(&own, &known),
        disputed: metric.compare(&own, &disputed),
    }
}
