// Text loading — the disputed document and the known-author corpus.

pub mod loader;

pub use loader::{collect_text_files, concat_known, load_known_corpus, load_text, KnownCorpus};
