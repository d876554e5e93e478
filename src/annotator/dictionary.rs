// WHY: Validated keyword dictionary compiled once into a multi-pattern matcher
// Degenerate entries are rejected here so annotation never has to guard per call

use anyhow::{Context, Result};
use regex_automata::{meta::Regex, MatchKind};
use regex_syntax::hir::Hir;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

/// A rules keyword and the explanation shown when it is hovered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry {
    /// Exact substring searched for in effect text
    pub keyword: String,
    /// Free-form rule text, passed through untouched
    pub explanation: String,
}

impl KeywordEntry {
    pub fn new(keyword: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            explanation: explanation.into(),
        }
    }
}

/// Root causes for dictionary construction failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionaryError {
    /// Entry at `index` has an empty keyword, which would match at every offset
    EmptyKeyword { index: usize },
    /// The keyword matcher could not be compiled
    Compile(String),
    /// Dictionary source was not a JSON array of `{keyword, explanation}` objects
    Parse(String),
}

impl fmt::Display for DictionaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictionaryError::EmptyKeyword { index } => {
                write!(f, "dictionary entry {index} has an empty keyword")
            }
            DictionaryError::Compile(message) => write!(f, "failed to compile keyword matcher: {message}"),
            DictionaryError::Parse(message) => write!(f, "invalid dictionary source: {message}"),
        }
    }
}

impl std::error::Error for DictionaryError {}

/// Immutable, ordered keyword dictionary with a compiled matcher
///
/// Keywords are unique. When the source lists a keyword more than once the
/// first entry in source order is kept and later ones are dropped.
#[derive(Debug, Clone)]
pub struct KeywordDictionary {
    entries: Vec<KeywordEntry>,
    /// Keyword lengths in chars, parallel to `entries`
    char_lens: Vec<usize>,
    by_keyword: HashMap<String, usize>,
    /// `None` only for an empty dictionary
    matcher: Option<Regex>,
}

impl KeywordDictionary {
    /// Validate entries and compile them into a matcher
    pub fn new(entries: Vec<KeywordEntry>) -> Result<Self> {
        let mut kept: Vec<KeywordEntry> = Vec::with_capacity(entries.len());
        let mut by_keyword = HashMap::with_capacity(entries.len());

        for (index, entry) in entries.into_iter().enumerate() {
            if entry.keyword.is_empty() {
                return Err(DictionaryError::EmptyKeyword { index }.into());
            }
            if by_keyword.contains_key(&entry.keyword) {
                warn!(keyword = %entry.keyword, index, "Dropping duplicate dictionary keyword");
                continue;
            }
            by_keyword.insert(entry.keyword.clone(), kept.len());
            kept.push(entry);
        }

        let char_lens = kept.iter().map(|e| e.keyword.chars().count()).collect();
        let matcher = if kept.is_empty() {
            None
        } else {
            Some(compile_matcher(&kept)?)
        };

        info!("Compiled keyword dictionary with {} entries", kept.len());

        Ok(Self {
            entries: kept,
            char_lens,
            by_keyword,
            matcher,
        })
    }

    /// Build from `(keyword, explanation)` pairs
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Result<Self> {
        Self::new(
            pairs
                .iter()
                .map(|&(keyword, explanation)| KeywordEntry::new(keyword, explanation))
                .collect(),
        )
    }

    /// Parse a JSON array of `{"keyword": ..., "explanation": ...}` objects
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<KeywordEntry> =
            serde_json::from_str(json).map_err(|e| DictionaryError::Parse(e.to_string()))?;
        Self::new(entries)
    }

    /// Load a JSON dictionary file
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading keyword dictionary from {}", path.display());

        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read dictionary {}", path.display()))?;

        Self::from_json_str(&content)
            .with_context(|| format!("Failed to load dictionary {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in dictionary order
    pub fn entries(&self) -> &[KeywordEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KeywordEntry> {
        self.entries.iter()
    }

    /// Look up an entry by its exact keyword
    pub fn get(&self, keyword: &str) -> Option<&KeywordEntry> {
        self.by_keyword.get(keyword).map(|&i| &self.entries[i])
    }

    pub(crate) fn matcher(&self) -> Option<&Regex> {
        self.matcher.as_ref()
    }

    pub(crate) fn char_len(&self, index: usize) -> usize {
        self.char_lens[index]
    }
}

impl<'a> IntoIterator for &'a KeywordDictionary {
    type Item = &'a KeywordEntry;
    type IntoIter = std::slice::Iter<'a, KeywordEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Compile keywords as literal patterns, one pattern id per entry
/// WHY: MatchKind::All lets an anchored search report every keyword starting at an offset
fn compile_matcher(entries: &[KeywordEntry]) -> Result<Regex> {
    let literals: Vec<Hir> = entries
        .iter()
        .map(|e| Hir::literal(e.keyword.as_bytes()))
        .collect();

    let matcher = Regex::builder()
        .configure(Regex::config().match_kind(MatchKind::All))
        .build_many_from_hir(&literals)
        .map_err(|e| DictionaryError::Compile(e.to_string()))?;

    debug!("Compiled matcher with {} literal patterns", matcher.pattern_len());
    Ok(matcher)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_keyword_rejected() {
        let err = KeywordDictionary::new(vec![
            KeywordEntry::new("嘲讽", "taunt"),
            KeywordEntry::new("", "nothing"),
        ])
        .unwrap_err();

        assert_eq!(
            err.downcast_ref::<DictionaryError>(),
            Some(&DictionaryError::EmptyKeyword { index: 1 })
        );
    }

    #[test]
    fn test_duplicate_keyword_first_wins() {
        let dictionary = KeywordDictionary::from_pairs(&[
            ("圣盾", "first"),
            ("冻结", "freeze"),
            ("圣盾", "second"),
        ])
        .unwrap();

        assert_eq!(dictionary.len(), 2);
        assert_eq!(dictionary.get("圣盾").unwrap().explanation, "first");
        let keywords: Vec<&str> = dictionary.iter().map(|e| e.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["圣盾", "冻结"]);
    }

    #[test]
    fn test_empty_dictionary_has_no_matcher() {
        let dictionary = KeywordDictionary::new(Vec::new()).unwrap();
        assert!(dictionary.is_empty());
        assert!(dictionary.matcher().is_none());
    }

    #[test]
    fn test_char_lengths_count_scalars_not_bytes() {
        let dictionary = KeywordDictionary::from_pairs(&[("ab", "x"), ("超级风怒", "y")]).unwrap();
        assert_eq!(dictionary.char_len(0), 2);
        assert_eq!(dictionary.char_len(1), 4);
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"[
            {"keyword": "登场", "explanation": "played from hand"},
            {"keyword": "遗愿", "explanation": "after it dies"}
        ]"#;
        let dictionary = KeywordDictionary::from_json_str(json).unwrap();
        assert_eq!(dictionary.len(), 2);
        assert_eq!(dictionary.entries()[1].keyword, "遗愿");
    }

    #[test]
    fn test_from_json_str_parse_error() {
        let err = KeywordDictionary::from_json_str(r#"{"keyword": "x"}"#).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DictionaryError>(),
            Some(DictionaryError::Parse(_))
        ));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            DictionaryError::EmptyKeyword { index: 3 }.to_string(),
            "dictionary entry 3 has an empty keyword"
        );
        assert!(DictionaryError::Parse("eof".into()).to_string().starts_with("invalid dictionary source"));
    }
}
