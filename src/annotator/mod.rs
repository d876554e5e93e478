// WHY: Main annotation interface with dual API for borrowed vs owned segments
// Borrowed segments slice the input for render-and-discard use; owned ones outlive it

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod builtin;
pub mod dictionary;
pub mod matcher;
pub mod segments;

// Re-export core types
pub use builtin::{builtin_dictionary, BUILTIN_KEYWORDS};
pub use dictionary::{DictionaryError, KeywordDictionary, KeywordEntry};
pub use matcher::{find_matches, resolve_overlaps, KeywordMatch};
pub use segments::assemble_segments;

/// Shown in place of empty effect text
/// This is a presentation default, not a parse result
pub const NO_EFFECT_PLACEHOLDER: &str = "no effect text available";

/// Borrowed segment - slices of the input text and the dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment<'a> {
    Plain { text: &'a str },
    Keyword { text: &'a str, explanation: &'a str },
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match *self {
            Segment::Plain { text } | Segment::Keyword { text, .. } => text,
        }
    }

    /// Explanation for keyword segments, `None` for plain text
    pub fn explanation(&self) -> Option<&'a str> {
        match *self {
            Segment::Plain { .. } => None,
            Segment::Keyword { explanation, .. } => Some(explanation),
        }
    }

    pub fn is_keyword(&self) -> bool {
        matches!(self, Segment::Keyword { .. })
    }

    /// Copy into an owned segment
    pub fn into_owned(self) -> OwnedSegment {
        match self {
            Segment::Plain { text } => OwnedSegment::Plain { text: text.to_string() },
            Segment::Keyword { text, explanation } => OwnedSegment::Keyword {
                text: text.to_string(),
                explanation: explanation.to_string(),
            },
        }
    }
}

/// Owned segment - for storage, batch results and deserialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OwnedSegment {
    Plain { text: String },
    Keyword { text: String, explanation: String },
}

impl OwnedSegment {
    pub fn as_segment(&self) -> Segment<'_> {
        match self {
            OwnedSegment::Plain { text } => Segment::Plain { text: text.as_str() },
            OwnedSegment::Keyword { text, explanation } => Segment::Keyword {
                text: text.as_str(),
                explanation: explanation.as_str(),
            },
        }
    }

    pub fn text(&self) -> &str {
        self.as_segment().text()
    }

    pub fn is_keyword(&self) -> bool {
        matches!(self, OwnedSegment::Keyword { .. })
    }
}

/// Concatenate segment texts, reproducing the annotated input
pub fn concat_text(segments: &[Segment<'_>]) -> String {
    segments.iter().map(Segment::text).collect()
}

/// Annotate `text` with keywords from `dictionary`
///
/// Segments come back in text order and concatenate to `text`. Empty text
/// yields a single plain segment holding [`NO_EFFECT_PLACEHOLDER`].
pub fn annotate<'a>(text: &'a str, dictionary: &'a KeywordDictionary) -> Vec<Segment<'a>> {
    annotate_with_placeholder(text, dictionary, NO_EFFECT_PLACEHOLDER)
}

/// Like [`annotate`], treating absent text as empty
pub fn annotate_optional<'a>(text: Option<&'a str>, dictionary: &'a KeywordDictionary) -> Vec<Segment<'a>> {
    annotate(text.unwrap_or_default(), dictionary)
}

fn annotate_with_placeholder<'a>(
    text: &'a str,
    dictionary: &'a KeywordDictionary,
    placeholder: &'a str,
) -> Vec<Segment<'a>> {
    if text.is_empty() {
        return vec![Segment::Plain { text: placeholder }];
    }

    let accepted = resolve_overlaps(find_matches(text, dictionary));
    debug!("Accepted {} keyword matches", accepted.len());

    assemble_segments(text, &accepted)
}

/// Configuration for annotation behavior
#[derive(Debug, Clone)]
pub struct AnnotatorConfig {
    /// Text of the plain segment returned for empty input
    pub placeholder: String,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            placeholder: NO_EFFECT_PLACEHOLDER.to_string(),
        }
    }
}

/// Annotator that owns its dictionary and configuration
#[derive(Debug, Clone)]
pub struct KeywordAnnotator {
    dictionary: KeywordDictionary,
    config: AnnotatorConfig,
}

impl KeywordAnnotator {
    pub fn new(dictionary: KeywordDictionary, config: AnnotatorConfig) -> Self {
        Self { dictionary, config }
    }

    /// Annotator over the built-in dictionary with default config
    pub fn with_builtin() -> Result<Self> {
        Ok(Self::new(builtin_dictionary()?.clone(), AnnotatorConfig::default()))
    }

    pub fn dictionary(&self) -> &KeywordDictionary {
        &self.dictionary
    }

    pub fn config(&self) -> &AnnotatorConfig {
        &self.config
    }

    /// Annotate with borrowed segments (render-and-discard)
    pub fn annotate<'a>(&'a self, text: &'a str) -> Vec<Segment<'a>> {
        annotate_with_placeholder(text, &self.dictionary, &self.config.placeholder)
    }

    /// Annotate, treating absent text as empty
    pub fn annotate_optional<'a>(&'a self, text: Option<&'a str>) -> Vec<Segment<'a>> {
        self.annotate(text.unwrap_or_default())
    }

    /// Annotate with owned segments
    pub fn annotate_owned(&self, text: &str) -> Vec<OwnedSegment> {
        self.annotate(text).into_iter().map(Segment::into_owned).collect()
    }

    /// Resolved keyword matches without segment assembly
    pub fn keyword_matches<'a>(&'a self, text: &str) -> Vec<KeywordMatch<'a>> {
        resolve_overlaps(find_matches(text, &self.dictionary))
    }
}
