//! Error types for pyshowcase.
//!
//! The presentation core is total: projections, dispatch, navigation and
//! the training timer never fail. Errors only arise at the edges, when
//! configuration or slide content is loaded and when the terminal is
//! driven.

use thiserror::Error;

/// Result type alias for pyshowcase operations.
pub type ShowcaseResult<T> = Result<T, ShowcaseError>;

/// Unified error type for loading and terminal I/O.
#[derive(Debug, Error)]
pub enum ShowcaseError {
    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== Content Errors =====
    /// The slide deck does not pair one slide with each demo.
    #[error("Slide deck has {found} slides, expected exactly {expected}")]
    SlideCount {
        /// Number of demo domains.
        expected: usize,
        /// Number of slides found in the deck.
        found: usize,
    },

    /// A slide is missing required content.
    #[error("Slide {index} is invalid: {reason}")]
    InvalidSlide {
        /// Zero-based slide index.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },

    // ===== I/O Errors =====
    /// File or terminal I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShowcaseError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid slide error.
    #[must_use]
    pub fn invalid_slide(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidSlide {
            index,
            reason: reason.into(),
        }
    }

    /// Create an I/O error with a message (wraps in `std::io::Error`).
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(std::io::Error::other(message.into()))
    }

    /// Whether the error comes from user-supplied content rather than the
    /// environment.
    #[must_use]
    pub const fn is_content_error(&self) -> bool {
        matches!(
            self,
            Self::Config { .. }
                | Self::YamlParse(_)
                | Self::Validation(_)
                | Self::SlideCount { .. }
                | Self::InvalidSlide { .. }
        )
    }
}
