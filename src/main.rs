use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use stylometer::config::{self, Config, ConfigOverrides};
use stylometer::corpus::{self, KnownCorpus};
use stylometer::output::{self, markdown, terminal};
use stylometer::pipeline::{self, Progress};
use stylometer::profile::{self, NgramProfile};
use stylometer::scoring::Metric;

/// Stylometer: authorship attribution from character n-gram profiles.
///
/// Compares a disputed text against fragments of a known author's corpus
/// and estimates how likely they share an author.
#[derive(Parser)]
#[command(name = "stylometer", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare a disputed text against a known-author corpus
    Analyze {
        /// The disputed text file
        #[arg(long, short = 'd')]
        disputed: PathBuf,

        /// Known-author text files or directories of *.txt files
        #[arg(long, short = 'k', required = true, num_args = 1..)]
        known: Vec<PathBuf>,

        #[command(flatten)]
        profile: ProfileArgs,

        /// Similarity metric: cosine or euclidean (default: STYLOMETER_METRIC or cosine)
        #[arg(long, short = 'm')]
        metric: Option<String>,

        /// Tolerance margin as a fraction, e.g. 0.05 for ±5% (default: STYLOMETER_MARGIN or 0.05)
        #[arg(long)]
        margin: Option<f64>,

        /// Write the full report as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write a Markdown report
        #[arg(long)]
        report: Option<PathBuf>,

        /// Print only the summary, not the per-fragment table
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Show the most frequent n-grams of a single text
    Profile {
        /// The text file to profile
        file: PathBuf,

        #[command(flatten)]
        profile: ProfileArgs,

        /// How many n-grams to display
        #[arg(long, default_value = "20")]
        top: usize,
    },
}

#[derive(clap::Args)]
struct ProfileArgs {
    /// N-gram length in characters (default: STYLOMETER_NGRAM or 4)
    #[arg(long, short = 'n')]
    ngram: Option<usize>,

    /// Keep only the S most frequent n-grams; "none" keeps all (default: STYLOMETER_PROFILE_CAP or 1000)
    #[arg(long, short = 's')]
    profile_cap: Option<String>,
}

impl ProfileArgs {
    /// Overrides for the profiling flags that were given.
    fn overrides(&self) -> Result<ConfigOverrides> {
        let profile_cap = match &self.profile_cap {
            Some(raw) => Some(config::parse_profile_cap(raw)?),
            None => None,
        };
        Ok(ConfigOverrides {
            ngram_size: self.ngram,
            profile_cap,
            ..ConfigOverrides::default()
        })
    }
}

/// Fragment scoring progress on stderr.
struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    fn new(hidden: bool) -> Self {
        let bar = if hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(0)
        };
        if let Ok(style) = ProgressStyle::default_bar().template("  Scoring [{bar:30}] {pos}/{len}") {
            bar.set_style(style);
        }
        Self { bar }
    }
}

impl Progress for BarProgress {
    fn start(&self, total: usize) {
        self.bar.set_length(total as u64);
    }

    fn advance(&self) {
        self.bar.inc(1);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("stylometer=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            disputed,
            known,
            profile: profile_args,
            metric,
            margin,
            json,
            report,
            quiet,
        } => {
            let overrides = ConfigOverrides {
                metric: metric.as_deref().map(str::parse::<Metric>).transpose()?,
                margin,
                ..profile_args.overrides()?
            };
            let config = Config::load_with(&overrides)?;
            let params = config.params();

            let disputed_text = corpus::load_text(&disputed)?;
            let known_corpus = KnownCorpus::load(&known)?;
            info!(
                disputed = %disputed.display(),
                known_sources = known_corpus.sources.len(),
                "Loaded texts"
            );

            println!(
                "Analyzing {} against {} known text(s)...",
                disputed.display(),
                known_corpus.sources.len()
            );

            let progress = BarProgress::new(quiet);
            let result =
                pipeline::analyze_with_progress(&params, &disputed_text, &known_corpus.text, &progress)
                    .context("analysis failed")?;

            terminal::display_summary(&result);
            if !quiet {
                terminal::display_fragment_table(&result);
            }

            if let Some(path) = json {
                let path = config.resolve_output(path);
                output::write_json(&result, &path)?;
                println!("\n{}", format!("JSON report saved to: {}", path.display()).bold());
            }

            if let Some(path) = report {
                let path = config.resolve_output(path);
                markdown::write_report(&result, &path)?;
                println!(
                    "\n{}",
                    format!("Markdown report saved to: {}", path.display()).bold()
                );
            }
        }

        Commands::Profile {
            file,
            profile: profile_args,
            top,
        } => {
            let config = Config::load_with(&profile_args.overrides()?)?;
            let text = corpus::load_text(&file)?;
            let ngram_profile = NgramProfile::build(&text, config.ngram_size, config.profile_cap)?;

            info!(
                file = %file.display(),
                chars = profile::char_len(&text),
                retained = ngram_profile.len(),
                "Built profile"
            );

            terminal::display_profile(&ngram_profile, &file.display().to_string(), top);
        }
    }

    Ok(())
}
