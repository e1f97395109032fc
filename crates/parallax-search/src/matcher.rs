//! Line-by-line text matchers over node/edge labels

use crate::query::{SearchError, SearchQuery};
use crate::result::{ResultObject, SearchResult};
use parallax_core::Label;
use regex::RegexBuilder;

/// A compiled matcher for one search pass. Compiling once per search keeps
/// regex construction (and its error path) out of the per-object loop.
pub enum TextMatcher {
    /// Empty pattern: matches nothing, fails open.
    Empty,
    Literal {
        needle: String,
        case_sensitive: bool,
    },
    Regex(regex::Regex),
}

impl TextMatcher {
    pub fn compile(query: &SearchQuery) -> Result<Self, SearchError> {
        if query.is_empty() {
            return Ok(TextMatcher::Empty);
        }
        if query.is_regex {
            let re = RegexBuilder::new(&query.pattern)
                .case_insensitive(!query.case_sensitive)
                .build()?;
            Ok(TextMatcher::Regex(re))
        } else {
            let needle = if query.case_sensitive {
                query.pattern.clone()
            } else {
                query.pattern.to_lowercase()
            };
            Ok(TextMatcher::Literal {
                needle,
                case_sensitive: query.case_sensitive,
            })
        }
    }

    /// Scan a multi-line label, producing one result per match in line order.
    /// Each result snapshots the line's current style runs and the label's
    /// border color for later bit-exact restoration.
    pub fn match_label(&self, object: ResultObject, label: &Label) -> Vec<SearchResult> {
        let mut results = Vec::new();
        for (line_index, line) in label.lines.iter().enumerate() {
            for (start, length) in self.match_line(&line.text) {
                results.push(SearchResult {
                    object,
                    line: line_index,
                    start,
                    length,
                    line_text: line.text.clone(),
                    saved_runs: line.runs.clone(),
                    saved_border: label.border_color,
                });
            }
        }
        results
    }

    fn match_line(&self, text: &str) -> Vec<(usize, usize)> {
        match self {
            TextMatcher::Empty => Vec::new(),
            TextMatcher::Literal { needle, case_sensitive } => {
                let mut spans = Vec::new();
                let mut cursor = 0;
                while let Some((start, length)) = find_literal(text, needle, *case_sensitive, cursor)
                {
                    spans.push((start, length));
                    // Literal matches are non-empty, so advancing to the match
                    // end always makes progress.
                    cursor = start + length;
                }
                spans
            }
            TextMatcher::Regex(re) => {
                let mut spans = Vec::new();
                let mut cursor = 0;
                while cursor <= text.len() {
                    let Some(m) = re.find_at(text, cursor) else { break };
                    if m.start() == m.end() {
                        if m.end() >= text.len() {
                            break;
                        }
                        // Skip zero-length matches but still advance, or the
                        // scan never terminates.
                        cursor = next_boundary(text, m.end() + 1);
                        continue;
                    }
                    spans.push((m.start(), m.end() - m.start()));
                    if m.end() >= text.len() {
                        break;
                    }
                    cursor = m.end();
                }
                spans
            }
        }
    }
}

/// Next literal occurrence at or after `from`, as a `(start, length)` span
/// into `text`. Case-insensitive matching folds the haystack char by char
/// instead of lowercasing it up front, so the span stays valid for `text`
/// even when folding changes a char's byte length.
fn find_literal(
    text: &str,
    needle: &str,
    case_sensitive: bool,
    from: usize,
) -> Option<(usize, usize)> {
    if case_sensitive {
        return text[from..].find(needle).map(|pos| (from + pos, needle.len()));
    }
    // The needle is already lowercased at compile time.
    let mut start = from;
    loop {
        if let Some(length) = caseless_prefix_len(&text[start..], needle) {
            return Some((start, length));
        }
        let ch = text[start..].chars().next()?;
        start += ch.len_utf8();
    }
}

/// Byte length of the `haystack` prefix whose lowercase form is exactly
/// `needle_lower`. A needle that ends inside one char's lowercase expansion
/// does not match.
fn caseless_prefix_len(haystack: &str, needle_lower: &str) -> Option<usize> {
    let mut needle = needle_lower.chars();
    let mut pending = needle.next();
    if pending.is_none() {
        return Some(0);
    }
    let mut consumed = 0;
    for ch in haystack.chars() {
        for folded in ch.to_lowercase() {
            match pending {
                Some(expected) if folded == expected => pending = needle.next(),
                _ => return None,
            }
        }
        consumed += ch.len_utf8();
        if pending.is_none() {
            return Some(consumed);
        }
    }
    None
}

/// Smallest char boundary ≥ `at`, clamped to the end of `text`.
fn next_boundary(text: &str, at: usize) -> usize {
    let mut at = at.min(text.len());
    while at < text.len() && !text.is_char_boundary(at) {
        at += 1;
    }
    at
}
