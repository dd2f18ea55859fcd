//! Configuration with YAML loading and validation.
//!
//! Every field has a default, so an empty file is a valid configuration.
//! Values are range-checked with `validator` and then checked against
//! each other.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use validator::Validate;

use crate::demos::{DemoKind, SceneContext};
use crate::error::{ShowcaseError, ShowcaseResult};

/// Top-level presentation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ShowcaseConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Seed of the mock data generator.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Slide navigation and reset behavior.
    #[validate(nested)]
    #[serde(default)]
    pub presentation: PresentationConfig,

    /// Timer and frame pacing.
    #[validate(nested)]
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Slide content and mock data anchors.
    #[serde(default)]
    pub content: ContentConfig,

    /// Log output.
    #[validate(nested)]
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

const fn default_seed() -> u64 {
    42
}

impl ShowcaseConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> ShowcaseResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> ShowcaseResult<Self> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.check()?;
        Ok(config)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> ShowcaseConfigBuilder {
        ShowcaseConfigBuilder::default()
    }

    /// Run range and semantic validation.
    ///
    /// # Errors
    ///
    /// Returns error describing the first violated constraint.
    pub fn check(&self) -> ShowcaseResult<()> {
        self.validate()?;
        self.validate_semantic()
    }

    fn validate_semantic(&self) -> ShowcaseResult<()> {
        let last = DemoKind::ALL.len() - 1;
        if self.presentation.start_slide > last {
            return Err(ShowcaseError::config(format!(
                "start_slide must be in 0..={last}, got {}",
                self.presentation.start_slide
            )));
        }

        if self.playback.frame_interval_ms > self.playback.tick_interval_ms {
            return Err(ShowcaseError::config(format!(
                "frame interval {}ms exceeds training tick interval {}ms",
                self.playback.frame_interval_ms, self.playback.tick_interval_ms
            )));
        }

        Ok(())
    }

    /// Interval between training epochs.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.playback.tick_interval_ms)
    }

    /// Target time between redraws.
    #[must_use]
    pub const fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.playback.frame_interval_ms)
    }

    /// Scene generation inputs derived from this configuration.
    #[must_use]
    pub const fn scene_context(&self) -> SceneContext {
        SceneContext {
            reference_date: self.content.reference_date,
            tick_interval: self.tick_interval(),
        }
    }
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            seed: default_seed(),
            presentation: PresentationConfig::default(),
            playback: PlaybackConfig::default(),
            content: ContentConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct ShowcaseConfigBuilder {
    seed: Option<u64>,
    start_slide: Option<usize>,
    tick_interval_ms: Option<u64>,
    reset_stops_playback: Option<bool>,
    slides_path: Option<PathBuf>,
}

impl ShowcaseConfigBuilder {
    /// Set the random seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the zero-based slide shown first.
    #[must_use]
    pub const fn start_slide(mut self, index: usize) -> Self {
        self.start_slide = Some(index);
        self
    }

    /// Set the training tick interval in milliseconds.
    #[must_use]
    pub const fn tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = Some(ms);
        self
    }

    /// Choose whether resetting controls also stops a running demo.
    #[must_use]
    pub const fn reset_stops_playback(mut self, stops: bool) -> Self {
        self.reset_stops_playback = Some(stops);
        self
    }

    /// Load slides from a file instead of the embedded deck.
    #[must_use]
    pub fn slides_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.slides_path = Some(path.into());
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> ShowcaseConfig {
        let mut config = ShowcaseConfig::default();

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(index) = self.start_slide {
            config.presentation.start_slide = index;
        }
        if let Some(ms) = self.tick_interval_ms {
            config.playback.tick_interval_ms = ms;
        }
        if let Some(stops) = self.reset_stops_playback {
            config.presentation.reset_stops_playback = stops;
        }
        if self.slides_path.is_some() {
            config.content.slides_path = self.slides_path;
        }

        config
    }
}

/// Slide navigation and reset behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PresentationConfig {
    /// Zero-based slide shown first.
    #[serde(default)]
    pub start_slide: usize,
    /// Whether resetting controls also stops a running demo.
    #[serde(default = "default_true")]
    pub reset_stops_playback: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            start_slide: 0,
            reset_stops_playback: true,
        }
    }
}

/// Timer and frame pacing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PlaybackConfig {
    /// Milliseconds between training epochs.
    #[validate(range(min = 50, max = 10_000))]
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Milliseconds between redraws.
    #[validate(range(min = 1, max = 1000))]
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
}

const fn default_tick_interval_ms() -> u64 {
    500
}

const fn default_frame_interval_ms() -> u64 {
    33 // ~30 FPS
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

/// Slide content and mock data anchors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentConfig {
    /// Slide deck file; the embedded deck is used when absent.
    #[serde(default)]
    pub slides_path: Option<PathBuf>,
    /// Date mock records are dated back from.
    #[serde(default = "default_reference_date")]
    pub reference_date: NaiveDate,
}

fn default_reference_date() -> NaiveDate {
    SceneContext::default().reference_date
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            slides_path: None,
            reference_date: default_reference_date(),
        }
    }
}

/// Log output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `pyshowcase=debug`.
    #[validate(length(min = 1))]
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Log file. Nothing is logged when absent, since stdout belongs to
    /// the terminal UI.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            file: None,
        }
    }
}
