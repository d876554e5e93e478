// WHY: Segment assembly is a single cursor walk over resolved matches
// Gaps become plain runs, so adjacent plain segments cannot occur

use super::matcher::KeywordMatch;
use super::Segment;

/// Slice `text` into plain and keyword segments around non-overlapping matches
///
/// `matches` must be sorted by `start` and pairwise non-overlapping, as
/// returned by `resolve_overlaps`.
pub fn assemble_segments<'a>(text: &'a str, matches: &[KeywordMatch<'a>]) -> Vec<Segment<'a>> {
    let mut segments = Vec::with_capacity(matches.len() * 2 + 1);
    let mut cursor = 0;

    for m in matches {
        debug_assert!(m.start >= cursor, "matches must be sorted and disjoint");
        if m.start > cursor {
            segments.push(Segment::Plain {
                text: &text[cursor..m.start],
            });
        }
        segments.push(Segment::Keyword {
            text: &text[m.start..m.end],
            explanation: m.explanation,
        });
        cursor = m.end;
    }

    if cursor < text.len() {
        segments.push(Segment::Plain {
            text: &text[cursor..],
        });
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyword_match(text: &str, start: usize, end: usize) -> KeywordMatch<'_> {
        KeywordMatch {
            keyword: &text[start..end],
            start,
            end,
            explanation: "E",
            char_len: text[start..end].chars().count(),
        }
    }

    #[test]
    fn test_leading_and_trailing_plain_runs() {
        let text = "a kw b";
        let segments = assemble_segments(text, &[keyword_match(text, 2, 4)]);
        assert_eq!(
            segments,
            vec![
                Segment::Plain { text: "a " },
                Segment::Keyword { text: "kw", explanation: "E" },
                Segment::Plain { text: " b" },
            ]
        );
    }

    #[test]
    fn test_adjacent_keywords_have_no_empty_plain_between() {
        let text = "xy";
        let segments = assemble_segments(text, &[keyword_match(text, 0, 1), keyword_match(text, 1, 2)]);
        assert_eq!(segments.len(), 2);
        assert!(segments.iter().all(Segment::is_keyword));
    }

    #[test]
    fn test_no_matches_is_single_plain() {
        let segments = assemble_segments("hello world", &[]);
        assert_eq!(segments, vec![Segment::Plain { text: "hello world" }]);
    }
}
