// Fragmenter — cut the known corpus into comparison units.
//
// Fragments are the disputed text's length so that every fragment profile is
// built from the same amount of text as the disputed profile. Characters left
// over after the last full fragment are dropped.

use crate::error::{AnalysisError, Result};

/// Split `corpus` into `floor(len / fragment_len)` contiguous fragments of
/// exactly `fragment_len` chars each, left to right, dropping the remainder.
///
/// Fails with `InsufficientData` when the corpus cannot fill one fragment.
pub fn fragment(corpus: &str, fragment_len: usize) -> Result<Vec<&str>> {
    if fragment_len == 0 {
        return Err(AnalysisError::invalid("fragment length must be at least 1"));
    }

    let mut fragments = Vec::new();
    let mut start = 0;
    let mut chars_in_fragment = 0;
    let mut corpus_len = 0;

    for (offset, ch) in corpus.char_indices() {
        corpus_len += 1;
        chars_in_fragment += 1;
        if chars_in_fragment == fragment_len {
            let end = offset + ch.len_utf8();
            fragments.push(&corpus[start..end]);
            start = end;
            chars_in_fragment = 0;
        }
    }

    if fragments.is_empty() {
        return Err(AnalysisError::InsufficientData {
            corpus_len,
            fragment_len,
        });
    }

    Ok(fragments)
}
