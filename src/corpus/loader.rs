// Reading disputed and known-author texts from disk.
//
// Known texts are concatenated with no separator, in the order given. A
// directory expands to its *.txt files sorted by name, so two runs over the
// same directory always build the same corpus.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::profile::char_len;

/// Read a UTF-8 text file.
pub fn load_text(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path).map_err(|source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), chars = char_len(&text), "Loaded text");
    Ok(text)
}

/// All `*.txt` files directly inside `dir`, sorted by file name.
pub fn collect_text_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let io_err = |source| AnalysisError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let is_txt = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
        if is_txt && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// The known-author corpus: every source file and their concatenation.
#[derive(Debug, Clone)]
pub struct KnownCorpus {
    pub sources: Vec<PathBuf>,
    pub text: String,
}

impl KnownCorpus {
    /// Load and concatenate the given files and directories, in order.
    ///
    /// Fails with `InvalidInput` if no text file is found.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut sources = Vec::new();
        for path in paths {
            let path = path.as_ref();
            if path.is_dir() {
                sources.extend(collect_text_files(path)?);
            } else {
                sources.push(path.to_path_buf());
            }
        }

        if sources.is_empty() {
            return Err(AnalysisError::invalid("no known-author texts were found"));
        }

        let mut text = String::new();
        for source in &sources {
            text.push_str(&load_text(source)?);
        }

        debug!(
            sources = sources.len(),
            chars = char_len(&text),
            "Assembled known corpus"
        );

        Ok(Self { sources, text })
    }

    /// Corpus length in chars.
    pub fn char_len(&self) -> usize {
        char_len(&self.text)
    }
}

/// Load the known-author corpus and return only its text.
pub fn load_known_corpus<P: AsRef<Path>>(paths: &[P]) -> Result<String> {
    KnownCorpus::load(paths).map(|corpus| corpus.text)
}

/// Concatenate already-loaded known texts in the given order.
pub fn concat_known<S: AsRef<str>>(texts: &[S]) -> String {
    texts.iter().map(|t| t.as_ref()).collect()
}
