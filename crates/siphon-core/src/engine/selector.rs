//! Content-narrowing transforms applied before extraction.

use regex::Regex;
use tracing::trace;

use crate::config::SelectorDef;
use crate::content::Content;
use crate::error::Result;

use super::compile_pattern;

/// The narrowing step a [`Selector`] performs.
#[derive(Debug, Clone)]
pub enum SelectorKind {
    /// Content flows through unchanged. Used for sections that configure no
    /// selector.
    Passthrough,

    /// Substring bounded by the first occurrences of `from_text` and
    /// `to_text` in the original text.
    TextBlock { from_text: String, to_text: String },

    /// Inclusive 1-indexed line range; `None` bounds default to the first
    /// and last line.
    LineRange {
        from_line: Option<usize>,
        to_line: Option<usize>,
    },

    /// Capture group of the pattern's first match in the original text.
    RegexCapture { regex: Regex, group: usize },
}

/// A content transform, optionally chained to a nested selector that
/// receives this one's output.
#[derive(Debug, Clone)]
pub struct Selector {
    kind: SelectorKind,
    nested: Option<Box<Selector>>,
}

impl Selector {
    /// A selector performing the given narrowing step, with no nesting.
    pub fn new(kind: SelectorKind) -> Self {
        Self { kind, nested: None }
    }

    /// Chain a nested selector that receives this one's output.
    pub fn with_nested(mut self, nested: Selector) -> Self {
        self.nested = Some(Box::new(nested));
        self
    }

    /// The selector used when a section configures none: content passes
    /// through unchanged.
    pub(crate) fn passthrough() -> Self {
        Self::new(SelectorKind::Passthrough)
    }

    /// Compile a selector definition, recursively for nested selectors.
    pub(crate) fn build(def: &SelectorDef, template: &str) -> Result<Self> {
        let (kind, nested_def) = match def {
            SelectorDef::TextBlockSelector {
                from_text,
                to_text,
                content_selector,
            } => (
                SelectorKind::TextBlock {
                    from_text: from_text.clone(),
                    to_text: to_text.clone(),
                },
                content_selector,
            ),
            SelectorDef::LineNumberSelector {
                from_line,
                to_line,
                content_selector,
            } => (
                SelectorKind::LineRange {
                    from_line: line_bound(*from_line),
                    to_line: line_bound(*to_line),
                },
                content_selector,
            ),
            SelectorDef::RegexSelector {
                regex,
                group_number,
                content_selector,
            } => (
                SelectorKind::RegexCapture {
                    regex: compile_pattern(regex, template)?,
                    group: *group_number,
                },
                content_selector,
            ),
        };

        let nested = match nested_def {
            Some(inner) => Some(Box::new(Selector::build(inner, template)?)),
            None => None,
        };

        Ok(Self { kind, nested })
    }

    /// Apply this selector, then feed the result through the nested
    /// selector, if any.
    pub fn apply(&self, content: &Content) -> Content {
        let selected = self.kind.select(content);
        trace!(
            selected_len = selected.original_text().len(),
            "selector applied"
        );
        match &self.nested {
            Some(next) => next.apply(&selected),
            None => selected,
        }
    }
}

impl SelectorKind {
    fn select(&self, content: &Content) -> Content {
        match self {
            SelectorKind::Passthrough => content.clone(),
            SelectorKind::TextBlock { from_text, to_text } => {
                select_text_block(content.original_text(), from_text, to_text)
            }
            SelectorKind::LineRange { from_line, to_line } => {
                select_line_range(content.original_text(), *from_line, *to_line)
            }
            SelectorKind::RegexCapture { regex, group } => {
                select_regex_capture(content.original_text(), regex, *group)
            }
        }
    }
}

/// Map a configured line bound onto the internal representation. Absent and
/// non-positive bounds (the DSL's sentinel) mean "use the default".
fn line_bound(configured: Option<i64>) -> Option<usize> {
    match configured {
        Some(line) if line >= 1 => Some(line as usize),
        _ => None,
    }
}

fn select_text_block(text: &str, from_text: &str, to_text: &str) -> Content {
    if text.is_empty() {
        return Content::empty();
    }

    let from = if from_text.is_empty() {
        0
    } else {
        text.find(from_text).unwrap_or(0)
    };

    // The right bound is the *index* of `to_text`, used as an exclusive slice
    // end, so the character at that index is not included. Absent bounds fall
    // back to the last index, one short of the full length.
    let mut to = if to_text.is_empty() {
        text.len() - 1
    } else {
        text.find(to_text).unwrap_or(text.len() - 1)
    };

    while to > 0 && !text.is_char_boundary(to) {
        to -= 1;
    }

    if from >= to {
        return Content::empty();
    }

    Content::new(&text[from..to])
}

fn select_line_range(text: &str, from_line: Option<usize>, to_line: Option<usize>) -> Content {
    let lines: Vec<&str> = text.split('\n').collect();
    let total = lines.len();

    let from = from_line.unwrap_or(1);
    let to = to_line.unwrap_or(total).min(total);

    if from > to {
        return Content::empty();
    }

    Content::new(lines[from - 1..to].join("\n"))
}

fn select_regex_capture(text: &str, regex: &Regex, group: usize) -> Content {
    match regex.captures(text).and_then(|caps| caps.get(group)) {
        Some(capture) => Content::new(capture.as_str()),
        None => Content::empty(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ten_lines() -> Content {
        let text = (1..=10)
            .map(|n| format!("line {n}"))
            .collect::<Vec<_>>()
            .join("\n");
        Content::new(text)
    }

    fn line_range(from_line: Option<usize>, to_line: Option<usize>) -> Selector {
        Selector::new(SelectorKind::LineRange { from_line, to_line })
    }

    fn text_block(from_text: &str, to_text: &str) -> Selector {
        Selector::new(SelectorKind::TextBlock {
            from_text: from_text.into(),
            to_text: to_text.into(),
        })
    }

    fn regex_capture(pattern: &str, group: usize) -> Selector {
        Selector::new(SelectorKind::RegexCapture {
            regex: Regex::new(pattern).unwrap(),
            group,
        })
    }

    #[test]
    fn line_range_is_inclusive_on_both_ends() {
        let selected = line_range(Some(2), Some(3)).apply(&ten_lines());
        assert_eq!(selected.original_text(), "line 2\nline 3");
    }

    #[test]
    fn line_range_defaults_to_the_whole_document() {
        let content = ten_lines();
        let selected = line_range(None, None).apply(&content);
        assert_eq!(selected.original_text(), content.original_text());
    }

    #[test]
    fn line_range_clamps_past_the_last_line() {
        let selected = line_range(Some(9), Some(50)).apply(&ten_lines());
        assert_eq!(selected.original_text(), "line 9\nline 10");
    }

    #[test]
    fn line_range_beyond_the_document_selects_nothing() {
        let selected = line_range(Some(11), None).apply(&ten_lines());
        assert_eq!(selected.original_text(), "");
    }

    #[test]
    fn text_block_selects_between_bounds() {
        let content = Content::new("header START body END footer");
        let selected = text_block("START", "END").apply(&content);
        assert_eq!(selected.original_text(), "START body ");
    }

    #[test]
    fn text_block_missing_from_starts_at_zero() {
        let content = Content::new("body END footer");
        let selected = text_block("START", "END").apply(&content);
        assert_eq!(selected.original_text(), "body ");
    }

    #[test]
    fn text_block_missing_to_stops_at_last_index() {
        let content = Content::new("abcdef");
        let selected = text_block("", "").apply(&content);
        // The right bound is the last *index*, used exclusively.
        assert_eq!(selected.original_text(), "abcde");
    }

    #[test]
    fn text_block_on_empty_content_is_empty() {
        let selected = text_block("a", "b").apply(&Content::empty());
        assert_eq!(selected.original_text(), "");
    }

    #[test]
    fn text_block_with_inverted_bounds_is_empty() {
        let content = Content::new("END then START");
        let selected = text_block("START", "END").apply(&content);
        assert_eq!(selected.original_text(), "");
    }

    #[test]
    fn regex_capture_returns_the_requested_group() {
        let content = Content::new("Invoice ID AB123 issued");
        let selector = regex_capture(r"Invoice ID ([A-Z0-9]+)", 1);
        assert_eq!(selector.apply(&content).original_text(), "AB123");
    }

    #[test]
    fn regex_capture_group_zero_is_the_whole_match() {
        let content = Content::new("Invoice ID AB123 issued");
        let selector = regex_capture(r"ID [A-Z0-9]+", 0);
        assert_eq!(selector.apply(&content).original_text(), "ID AB123");
    }

    #[test]
    fn regex_capture_without_match_is_empty() {
        let content = Content::new("no identifiers here");
        let selector = regex_capture(r"ID ([A-Z0-9]+)", 1);
        assert_eq!(selector.apply(&content).original_text(), "");
    }

    #[test]
    fn regex_capture_with_out_of_range_group_is_empty() {
        let content = Content::new("Invoice ID AB123");
        let selector = regex_capture(r"ID ([A-Z0-9]+)", 7);
        assert_eq!(selector.apply(&content).original_text(), "");
    }

    #[test]
    fn nested_selector_runs_on_the_outer_result() {
        let content = Content::new("skip\nInvoice ID AB123\nTotal 9.0\nskip");
        let selector = line_range(Some(2), Some(3))
            .with_nested(regex_capture(r"Invoice ID ([A-Z0-9]+)", 1));
        assert_eq!(selector.apply(&content).original_text(), "AB123");
    }

    #[test]
    fn selected_content_is_renormalized() {
        let content = Content::new("a\nTotal:   1,204.50\nz");
        let selected = line_range(Some(2), Some(2)).apply(&content);
        assert_eq!(selected.sanitized_text(), "Total 1204.50");
    }

    #[test]
    fn build_wires_up_nested_selectors() {
        let def: SelectorDef = serde_json::from_str(
            r#"{
                "selectorType": "lineNumberSelector",
                "fromLine": 1,
                "toLine": 1,
                "contentSelector": {
                    "selectorType": "regexSelector",
                    "regex": "ID ([A-Z0-9]+)",
                    "groupNumber": 1
                }
            }"#,
        )
        .unwrap();
        let selector = Selector::build(&def, "t").unwrap();
        let selected = selector.apply(&Content::new("Invoice ID AB123\nTotal 9.0"));
        assert_eq!(selected.original_text(), "AB123");
    }

    #[test]
    fn build_treats_negative_line_bounds_as_unset() {
        let def: SelectorDef = serde_json::from_str(
            r#"{"selectorType": "lineNumberSelector", "fromLine": -1, "toLine": -1}"#,
        )
        .unwrap();
        let selector = Selector::build(&def, "t").unwrap();
        let content = ten_lines();
        assert_eq!(
            selector.apply(&content).original_text(),
            content.original_text()
        );
    }

    #[test]
    fn build_rejects_invalid_pattern() {
        let def: SelectorDef = serde_json::from_str(
            r#"{"selectorType": "regexSelector", "regex": "[", "groupNumber": 0}"#,
        )
        .unwrap();
        assert!(Selector::build(&def, "t").is_err());
    }
}
