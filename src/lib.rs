// Stylometer: authorship attribution from character n-gram profiles
//
// This is the library root. Each module corresponds to a stage of the
// analysis pipeline; `pipeline::analyze` wires them together.

pub mod config;
pub mod corpus;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod profile;
pub mod scoring;

pub use config::AnalysisParams;
pub use error::AnalysisError;
pub use pipeline::{analyze, AnalysisReport};
