// WHY: Occurrence search and longest-match conflict resolution, kept apart from segment assembly
// Uses the dictionary's regex-automata matcher so every keyword is tried in one pass per offset

use regex_automata::{Anchored, Input, PatternSet};
use tracing::debug;

use super::KeywordDictionary;

/// One keyword occurrence in the source text
///
/// Offsets are byte offsets into the source `&str` and always fall on char
/// boundaries, so `&text[start..end]` is the matched keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordMatch<'d> {
    pub keyword: &'d str,
    /// Inclusive byte offset
    pub start: usize,
    /// Exclusive byte offset, `start + keyword.len()`
    pub end: usize,
    pub explanation: &'d str,
    /// Keyword length in chars, the unit longest-match compares
    pub char_len: usize,
}

impl KeywordMatch<'_> {
    /// Half-open interval overlap
    pub fn overlaps(&self, other: &KeywordMatch<'_>) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Find every keyword occurrence, including overlapping occurrences of the same keyword
///
/// Results are ordered by `start`; matches sharing a start keep dictionary order.
pub fn find_matches<'d>(text: &str, dictionary: &'d KeywordDictionary) -> Vec<KeywordMatch<'d>> {
    let Some(matcher) = dictionary.matcher() else {
        return Vec::new();
    };
    if text.is_empty() || !matcher.is_match(text) {
        return Vec::new();
    }

    let entries = dictionary.entries();
    let mut hits = PatternSet::new(matcher.pattern_len());
    let mut matches = Vec::new();

    // Anchored search at each char boundary reports all keywords starting there
    for (start, _) in text.char_indices() {
        hits.clear();
        let input = Input::new(text).range(start..).anchored(Anchored::Yes);
        matcher.which_overlapping_matches(&input, &mut hits);

        for pattern in hits.iter() {
            let index = pattern.as_usize();
            let entry = &entries[index];
            matches.push(KeywordMatch {
                keyword: &entry.keyword,
                start,
                end: start + entry.keyword.len(),
                explanation: &entry.explanation,
                char_len: dictionary.char_len(index),
            });
        }
    }

    debug!("Found {} raw keyword occurrences in {} bytes", matches.len(), text.len());
    matches
}

/// Resolve overlaps so that the longest keyword wins
///
/// Candidates are processed in `start` order. A candidate that overlaps
/// accepted matches replaces them only when it is strictly longer than every
/// one of them; equal lengths keep the earlier match.
pub fn resolve_overlaps<'d>(mut candidates: Vec<KeywordMatch<'d>>) -> Vec<KeywordMatch<'d>> {
    candidates.sort_by_key(|m| m.start);

    let mut accepted: Vec<KeywordMatch<'d>> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let mut overlapping = accepted.iter().filter(|e| candidate.overlaps(e)).peekable();

        if overlapping.peek().is_none() {
            accepted.push(candidate);
            continue;
        }

        if overlapping.all(|e| candidate.char_len > e.char_len) {
            accepted.retain(|e| !candidate.overlaps(e));
            // Remaining matches all start before the candidate, order holds
            accepted.push(candidate);
        }
    }

    accepted
}
