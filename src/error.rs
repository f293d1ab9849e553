// Error taxonomy for a single analysis run.
//
// Every variant is terminal: the pipeline never retries and never hands back
// a partial table. The binary wraps these in anyhow for display.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the analysis core.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Text shorter than the n-gram length, empty input, or a bad parameter.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The known corpus cannot fill a single fragment of the disputed length.
    #[error(
        "insufficient data: known corpus has {corpus_len} characters, \
         at least {fragment_len} are needed for one fragment"
    )]
    InsufficientData {
        corpus_len: usize,
        fragment_len: usize,
    },

    /// Similarity method name not recognized.
    #[error("unsupported metric '{0}' (expected 'cosine' or 'euclidean')")]
    UnsupportedMetric(String),

    /// Evaluation attempted over an empty score table.
    #[error("no fragments to evaluate")]
    NoFragments,

    /// A source text could not be read or was not valid UTF-8.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AnalysisError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        AnalysisError::InvalidInput(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
