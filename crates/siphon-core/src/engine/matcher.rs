//! Boolean predicate algebra deciding whether a template applies to a
//! document.

use regex::Regex;

use crate::config::MatcherDef;
use crate::content::Content;
use crate::error::Result;

use super::compile_pattern;

/// How a conditional matcher combines its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    And,
    Or,
}

impl Condition {
    /// Parse the DSL condition string. Anything that is not "and"
    /// (case-insensitive) combines with OR.
    fn from_dsl(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("and") {
            Condition::And
        } else {
            Condition::Or
        }
    }
}

/// Predicate over [`Content`].
///
/// Word triggers are matched as case-sensitive literal substrings of the
/// original text; regex matchers run against the sanitized text.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// True when at least one trigger occurs.
    AnyWord(Vec<String>),

    /// True when every trigger occurs. Vacuously true without triggers.
    AllWords(Vec<String>),

    /// True when the pattern matches anywhere in the sanitized text.
    Regex(Regex),

    /// Children combined in declared order with the given operator.
    Conditional {
        op: Condition,
        children: Vec<Matcher>,
    },

    /// Test-only child that records how often it was evaluated.
    #[cfg(test)]
    Probe {
        result: bool,
        hits: std::sync::Arc<std::sync::atomic::AtomicUsize>,
    },
}

impl Matcher {
    /// Compile a matcher definition, recursively for conditional children.
    pub(crate) fn build(def: &MatcherDef, template: &str) -> Result<Self> {
        match def {
            MatcherDef::OneWordMatcher { words } => Ok(Matcher::AnyWord(split_words(words))),
            MatcherDef::AllWordsMatcher { words } => Ok(Matcher::AllWords(split_words(words))),
            MatcherDef::RegexMatcher { regex_expression } => {
                Ok(Matcher::Regex(compile_pattern(regex_expression, template)?))
            }
            MatcherDef::ConditionalMatcher {
                condition,
                expressions,
            } => {
                if expressions.is_empty() {
                    return Err(crate::error::ConfigError::EmptyConditional {
                        template: template.to_string(),
                    });
                }
                let children = expressions
                    .iter()
                    .map(|child| Matcher::build(child, template))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Matcher::Conditional {
                    op: Condition::from_dsl(condition),
                    children,
                })
            }
        }
    }

    /// Evaluate this matcher against `content`.
    ///
    /// Conditional trees evaluate every child in declared order without
    /// short-circuiting, seeding the running value with the first child's
    /// result.
    pub fn evaluate(&self, content: &Content) -> bool {
        match self {
            Matcher::AnyWord(words) => words
                .iter()
                .any(|word| content.original_text().contains(word.as_str())),
            Matcher::AllWords(words) => words
                .iter()
                .all(|word| content.original_text().contains(word.as_str())),
            Matcher::Regex(regex) => regex.is_match(content.sanitized_text()),
            Matcher::Conditional { op, children } => {
                let mut combined: Option<bool> = None;
                for child in children {
                    let value = child.evaluate(content);
                    combined = Some(match (combined, op) {
                        (None, _) => value,
                        (Some(acc), Condition::And) => acc && value,
                        (Some(acc), Condition::Or) => acc || value,
                    });
                }
                // Empty trees are rejected at build time.
                combined.unwrap_or(false)
            }
            #[cfg(test)]
            Matcher::Probe { result, hits } => {
                hits.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                *result
            }
        }
    }
}

/// Split the DSL's comma-separated trigger list. Entries are kept verbatim,
/// including surrounding whitespace and empties.
fn split_words(words: &str) -> Vec<String> {
    words.split(',').map(str::to_string).collect()
}
