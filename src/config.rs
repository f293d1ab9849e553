use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::scoring::evaluation::validate_margin;
use crate::scoring::{Metric, VerdictThresholds};

pub const DEFAULT_NGRAM_SIZE: usize = 4;
pub const DEFAULT_PROFILE_CAP: usize = 1000;
pub const DEFAULT_MARGIN: f64 = 0.05;

/// Parameters for one analysis run.
///
/// Passed explicitly into the pipeline; nothing is read from ambient state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisParams {
    /// Character n-gram length (n ≥ 1)
    pub ngram_size: usize,
    /// Keep only this many most frequent n-grams per profile (None = all)
    pub profile_cap: Option<usize>,
    pub metric: Metric,
    /// Tolerance band half-width as a fraction of the mean known score
    pub margin: f64,
    pub thresholds: VerdictThresholds,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            ngram_size: DEFAULT_NGRAM_SIZE,
            profile_cap: Some(DEFAULT_PROFILE_CAP),
            metric: Metric::Cosine,
            margin: DEFAULT_MARGIN,
            thresholds: VerdictThresholds::default(),
        }
    }
}

impl AnalysisParams {
    /// Reject parameter combinations the pipeline cannot run with.
    pub fn validate(&self) -> std::result::Result<(), AnalysisError> {
        if self.ngram_size == 0 {
            return Err(AnalysisError::invalid("n-gram length must be at least 1"));
        }
        if self.profile_cap == Some(0) {
            return Err(AnalysisError::invalid(
                "profile cap must be a positive integer or none",
            ));
        }
        validate_margin(self.margin)?;
        let t = &self.thresholds;
        if !(0.0..=1.0).contains(&t.moderate) || !(t.moderate..=1.0).contains(&t.high) {
            return Err(AnalysisError::invalid(format!(
                "verdict thresholds must satisfy 0 <= moderate <= high <= 1, got {} / {}",
                t.moderate, t.high
            )));
        }
        Ok(())
    }
}

/// Parse a profile cap: a positive integer, or `none` / `0` / empty for no cap.
pub fn parse_profile_cap(value: &str) -> std::result::Result<Option<usize>, AnalysisError> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    match value.parse::<usize>() {
        Ok(0) => Ok(None),
        Ok(cap) => Ok(Some(cap)),
        Err(_) => Err(AnalysisError::invalid(format!(
            "profile cap must be a positive integer or 'none', got '{value}'"
        ))),
    }
}

/// Values given on the command line. Each one that is set replaces the
/// matching environment variable, which is then never read.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub ngram_size: Option<usize>,
    /// `Some(None)` means "no cap" was asked for explicitly
    pub profile_cap: Option<Option<usize>>,
    pub metric: Option<Metric>,
    pub margin: Option<f64>,
}

/// Defaults loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy. Command-line flags
/// override everything here.
pub struct Config {
    pub ngram_size: usize,
    pub profile_cap: Option<usize>,
    pub metric: Metric,
    pub margin: f64,
    /// Where report files go when given as a bare file name
    pub output_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to the built-in defaults; malformed ones
    /// are errors naming the variable.
    pub fn load() -> Result<Self> {
        Self::load_with(&ConfigOverrides::default())
    }

    /// Load configuration, reading only the variables `overrides` leaves unset.
    pub fn load_with(overrides: &ConfigOverrides) -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok(), overrides)
    }

    /// Build a configuration from an arbitrary variable source.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        overrides: &ConfigOverrides,
    ) -> Result<Self> {
        let ngram_size = match overrides.ngram_size {
            Some(n) => n,
            None => match lookup("STYLOMETER_NGRAM") {
                Some(v) => v
                    .trim()
                    .parse::<usize>()
                    .with_context(|| format!("STYLOMETER_NGRAM must be an integer, got '{v}'"))?,
                None => DEFAULT_NGRAM_SIZE,
            },
        };

        let profile_cap = match overrides.profile_cap {
            Some(cap) => cap,
            None => match lookup("STYLOMETER_PROFILE_CAP") {
                Some(v) => parse_profile_cap(&v).context("invalid STYLOMETER_PROFILE_CAP")?,
                None => Some(DEFAULT_PROFILE_CAP),
            },
        };

        let metric = match overrides.metric {
            Some(metric) => metric,
            None => match lookup("STYLOMETER_METRIC") {
                Some(v) => v.parse::<Metric>().context("invalid STYLOMETER_METRIC")?,
                None => Metric::Cosine,
            },
        };

        let margin = match overrides.margin {
            Some(margin) => margin,
            None => match lookup("STYLOMETER_MARGIN") {
                Some(v) => v
                    .trim()
                    .parse::<f64>()
                    .with_context(|| format!("STYLOMETER_MARGIN must be a number, got '{v}'"))?,
                None => DEFAULT_MARGIN,
            },
        };

        Ok(Self {
            ngram_size,
            profile_cap,
            metric,
            margin,
            output_dir: lookup("STYLOMETER_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./output")),
        })
    }

    /// Analysis parameters built from these defaults.
    pub fn params(&self) -> AnalysisParams {
        AnalysisParams {
            ngram_size: self.ngram_size,
            profile_cap: self.profile_cap,
            metric: self.metric,
            margin: self.margin,
            thresholds: VerdictThresholds::default(),
        }
    }

    /// Resolve a report path: bare file names land in `output_dir`.
    pub fn resolve_output(&self, path: PathBuf) -> PathBuf {
        let is_bare = path
            .parent()
            .is_none_or(|parent| parent.as_os_str().is_empty());
        if is_bare {
            self.output_dir.join(path)
        } else {
            path
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_are_valid() {
        assert!(AnalysisParams::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_params_rejected() {
        let mut params = AnalysisParams::default();
        params.ngram_size = 0;
        assert!(params.validate().is_err());

        let mut params = AnalysisParams::default();
        params.profile_cap = Some(0);
        assert!(params.validate().is_err());

        let mut params = AnalysisParams::default();
        params.thresholds = VerdictThresholds {
            high: 0.3,
            moderate: 0.5,
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_parse_profile_cap() {
        assert_eq!(parse_profile_cap("1000").unwrap(), Some(1000));
        assert_eq!(parse_profile_cap(" none ").unwrap(), None);
        assert_eq!(parse_profile_cap("").unwrap(), None);
        assert_eq!(parse_profile_cap("0").unwrap(), None);
        assert!(parse_profile_cap("lots").is_err());
    }

    fn lookup(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_env_values_used_when_no_flags() {
        let config = Config::from_lookup(
            lookup(&[
                ("STYLOMETER_NGRAM", "3"),
                ("STYLOMETER_PROFILE_CAP", "none"),
                ("STYLOMETER_METRIC", "euclidean"),
                ("STYLOMETER_MARGIN", "0.1"),
                ("STYLOMETER_OUTPUT_DIR", "reports"),
            ]),
            &ConfigOverrides::default(),
        )
        .unwrap();
        assert_eq!(config.ngram_size, 3);
        assert_eq!(config.profile_cap, None);
        assert_eq!(config.metric, Metric::Euclidean);
        assert_eq!(config.margin, 0.1);
        assert_eq!(config.output_dir, PathBuf::from("reports"));
    }

    #[test]
    fn test_defaults_when_env_is_empty() {
        let config = Config::from_lookup(|_| None, &ConfigOverrides::default()).unwrap();
        assert_eq!(config.params(), AnalysisParams::default());
        assert_eq!(config.output_dir, PathBuf::from("./output"));
    }

    #[test]
    fn test_malformed_env_is_an_error_naming_the_variable() {
        let err = Config::from_lookup(
            lookup(&[("STYLOMETER_MARGIN", "five percent")]),
            &ConfigOverrides::default(),
        )
        .err()
        .unwrap();
        assert!(err.to_string().contains("STYLOMETER_MARGIN"));
    }

    #[test]
    fn test_flags_skip_malformed_env() {
        let env = lookup(&[
            ("STYLOMETER_NGRAM", "four"),
            ("STYLOMETER_PROFILE_CAP", "lots"),
            ("STYLOMETER_METRIC", "jaccard"),
            ("STYLOMETER_MARGIN", "five percent"),
        ]);
        let overrides = ConfigOverrides {
            ngram_size: Some(5),
            profile_cap: Some(None),
            metric: Some(Metric::Cosine),
            margin: Some(0.02),
        };
        let config = Config::from_lookup(env, &overrides).unwrap();
        assert_eq!(config.ngram_size, 5);
        assert_eq!(config.profile_cap, None);
        assert_eq!(config.metric, Metric::Cosine);
        assert_eq!(config.margin, 0.02);
    }

    #[test]
    fn test_resolve_output() {
        let config = Config {
            ngram_size: 4,
            profile_cap: None,
            metric: Metric::Cosine,
            margin: 0.05,
            output_dir: PathBuf::from("out"),
        };
        assert_eq!(
            config.resolve_output(PathBuf::from("report.md")),
            PathBuf::from("out/report.md")
        );
        assert_eq!(
            config.resolve_output(PathBuf::from("elsewhere/report.md")),
            PathBuf::from("elsewhere/report.md")
        );
    }
}
