// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests

#![allow(dead_code)]

use cardgloss::Segment;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture helper for creating temporary directories with card-text files
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with temporary directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self { temp_dir, root_path }
    }

    /// Create a card effect text file with given content
    pub fn create_card_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    /// Write a JSON dictionary from `(keyword, explanation)` pairs
    pub fn create_dictionary(&self, name: &str, pairs: &[(&str, &str)]) -> PathBuf {
        let entries: Vec<serde_json::Value> = pairs
            .iter()
            .map(|(k, e)| serde_json::json!({ "keyword": k, "explanation": e }))
            .collect();
        let content = serde_json::to_string_pretty(&entries).expect("Failed to encode dictionary");
        self.create_card_file(name, &content)
    }
}

/// Byte spans of keyword segments, derived by walking segment lengths
pub fn keyword_spans(segments: &[Segment<'_>]) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut offset = 0;
    for segment in segments {
        let len = segment.text().len();
        if segment.is_keyword() {
            spans.push((offset, offset + len));
        }
        offset += len;
    }
    spans
}

/// Assert no zero-length segments and no two adjacent plain segments
pub fn assert_well_formed(segments: &[Segment<'_>], context: &str) {
    for (i, segment) in segments.iter().enumerate() {
        assert!(!segment.text().is_empty(), "{context}: segment {i} is empty");
    }
    for (i, pair) in segments.windows(2).enumerate() {
        assert!(
            pair[0].is_keyword() || pair[1].is_keyword(),
            "{}: segments {} and {} are both plain",
            context,
            i,
            i + 1
        );
    }
}

/// Reference occurrence search: repeated `find` per keyword, restarting one char after each hit
pub fn naive_occurrences(text: &str, keywords: &[&str]) -> Vec<(usize, usize, usize)> {
    let mut found = Vec::new();
    for (index, keyword) in keywords.iter().enumerate() {
        let mut from = 0;
        while let Some(pos) = text[from..].find(keyword) {
            let start = from + pos;
            found.push((start, start + keyword.len(), index));
            let step = text[start..].chars().next().map_or(1, char::len_utf8);
            from = start + step;
            if from > text.len() {
                break;
            }
        }
    }
    found.sort_by_key(|&(start, _, index)| (start, index));
    found
}
