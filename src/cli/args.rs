//! Command-line arguments.

use crate::config::ShowcaseConfig;
use crate::error::ShowcaseResult;
use clap::Parser;
use std::path::PathBuf;

/// Arguments of the showcase binary.
#[derive(Parser, Debug, Clone, PartialEq, Eq, Default)]
#[command(name = "showcase_tui")]
#[command(about = "Interactive terminal showcase of five Python libraries", version)]
pub struct Args {
    /// Configuration file (YAML).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Slide deck (YAML) replacing the built-in slides.
    #[arg(long)]
    pub slides: Option<PathBuf>,

    /// Seed for generated demo data.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Slide to start on, 1-based.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub slide: Option<u8>,

    /// Write logs to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `pyshowcase=trace`.
    #[arg(long)]
    pub log_filter: Option<String>,
}

impl Args {
    /// Build the effective configuration: the `--config` file (or the
    /// defaults) with every given flag applied on top.
    ///
    /// # Errors
    ///
    /// Returns error if the config file cannot be loaded or the merged
    /// configuration is invalid.
    pub fn resolve(&self) -> ShowcaseResult<ShowcaseConfig> {
        let mut config = match &self.config {
            Some(path) => ShowcaseConfig::load(path)?,
            None => ShowcaseConfig::default(),
        };
        self.apply_to(&mut config);
        config.check()?;
        Ok(config)
    }

    /// Overlay the given flags onto `config`.
    pub fn apply_to(&self, config: &mut ShowcaseConfig) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(slide) = self.slide {
            config.presentation.start_slide = usize::from(slide.saturating_sub(1));
        }
        if let Some(path) = &self.slides {
            config.content.slides_path = Some(path.clone());
        }
        if let Some(path) = &self.log_file {
            config.logging.file = Some(path.clone());
        }
        if let Some(filter) = &self.log_filter {
            config.logging.filter.clone_from(filter);
        }
    }
}
