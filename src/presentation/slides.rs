//! Static slide content.
//!
//! The deck is read-only narrative data: one slide per demo, in demo
//! order. It is loaded from YAML and validated once; after that the
//! controller only indexes into it.

use crate::demos::DemoKind;
use crate::error::{ShowcaseError, ShowcaseResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

/// Embedded default deck.
const DEFAULT_SLIDES_YAML: &str = include_str!("../../assets/slides.yaml");

/// A named code listing shown in the Code tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CodeSnippet {
    /// Listing title.
    #[validate(length(min = 1))]
    pub name: String,
    /// Source text.
    pub code: String,
    /// Language tag for display.
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "python".to_string()
}

/// Narrative content of one slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct Slide {
    /// Library name.
    #[validate(length(min = 1))]
    pub title: String,
    /// One-line tagline.
    #[serde(default)]
    pub subtitle: String,
    /// Paragraph introducing the library.
    #[validate(length(min = 1))]
    pub description: String,
    /// Bullet points.
    #[serde(default)]
    pub points: Vec<String>,
    /// One-line description of the demo.
    #[serde(default)]
    pub demo_description: String,
    /// Example shown on the slide itself.
    #[serde(default)]
    pub code_example: String,
    /// Listings shown in the Code tab.
    #[validate(nested)]
    #[serde(default)]
    pub code_snippets: Vec<CodeSnippet>,
}

/// Deck as written in YAML, before the slide checks.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
struct RawDeck {
    #[validate(nested)]
    slides: Vec<Slide>,
}

/// Ordered, fixed-length slide sequence.
///
/// Every deserialization path runs the same checks as
/// [`SlideDeck::from_yaml`], so a deck in hand always holds one slide per
/// demo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDeck")]
pub struct SlideDeck {
    /// Slides in demo order.
    slides: Vec<Slide>,
}

impl TryFrom<RawDeck> for SlideDeck {
    type Error = ShowcaseError;

    fn try_from(raw: RawDeck) -> ShowcaseResult<Self> {
        raw.validate()?;

        if raw.slides.len() != DemoKind::ALL.len() {
            return Err(ShowcaseError::SlideCount {
                expected: DemoKind::ALL.len(),
                found: raw.slides.len(),
            });
        }
        if let Some((index, _)) = raw
            .slides
            .iter()
            .enumerate()
            .find(|(_, slide)| slide.title.trim().is_empty())
        {
            return Err(ShowcaseError::invalid_slide(index, "title is blank"));
        }

        Ok(Self { slides: raw.slides })
    }
}

impl SlideDeck {
    /// The deck shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns error if the embedded YAML is malformed.
    pub fn embedded() -> ShowcaseResult<Self> {
        Self::from_yaml(DEFAULT_SLIDES_YAML)
    }

    /// Load a deck from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or the deck is invalid.
    pub fn load<P: AsRef<Path>>(path: P) -> ShowcaseResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a deck.
    ///
    /// # Errors
    ///
    /// Returns error if parsing fails, a slide lacks a title or
    /// description, or the deck does not hold one slide per demo.
    pub fn from_yaml(yaml: &str) -> ShowcaseResult<Self> {
        let raw: RawDeck = serde_yaml::from_str(yaml)?;
        Self::try_from(raw)
    }

    /// Number of slides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Whether the deck is empty. A validated deck never is.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Slide at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    /// All slides in order.
    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }
}
