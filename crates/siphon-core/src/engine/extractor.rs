//! Attribute extraction from selected content.

use regex::Regex;
use serde::Serialize;

use crate::config::ExtractorDef;
use crate::content::Content;
use crate::error::Result;

use super::compile_pattern;

/// A single extracted key/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedAttribute {
    /// The configured key for the pair.
    pub attribute_name: String,
    /// The extracted value, or the configured default.
    pub attribute_value: String,
}

/// Turns selected content into one named attribute.
///
/// Currently regex capture is the only extraction strategy; the enum keeps
/// the family open for further kinds without touching call sites.
#[derive(Debug, Clone)]
pub enum Extractor {
    Regex(RegexExtractor),
}

/// Captures one attribute value with a pre-compiled pattern.
#[derive(Debug, Clone)]
pub struct RegexExtractor {
    regex: Regex,
    attribute_name: String,
    default_value: String,
    group: usize,
}

impl Extractor {
    /// Compile an extractor definition.
    pub(crate) fn build(def: &ExtractorDef, template: &str) -> Result<Self> {
        match def {
            ExtractorDef::RegexExtractor {
                regex,
                attribute_name,
                default_value,
                group_number,
            } => Ok(Extractor::Regex(RegexExtractor {
                regex: compile_pattern(regex, template)?,
                attribute_name: attribute_name.clone(),
                default_value: default_value.clone(),
                group: *group_number,
            })),
        }
    }

    /// Extract the attribute from `content`. Always yields a pair; the
    /// configured default stands in when the pattern or group misses.
    pub fn extract(&self, content: &Content) -> ExtractedAttribute {
        match self {
            Extractor::Regex(extractor) => extractor.extract(content),
        }
    }
}

impl RegexExtractor {
    /// Create an extractor from a compiled pattern.
    pub fn new(
        regex: Regex,
        attribute_name: impl Into<String>,
        default_value: impl Into<String>,
        group: usize,
    ) -> Self {
        Self {
            regex,
            attribute_name: attribute_name.into(),
            default_value: default_value.into(),
            group,
        }
    }

    fn extract(&self, content: &Content) -> ExtractedAttribute {
        let value = self
            .regex
            .captures(content.original_text())
            .filter(|caps| self.group < caps.len())
            .map(|caps| {
                // A group inside the match count that did not participate
                // reads as empty, not as the default.
                caps.get(self.group)
                    .map_or("", |capture| capture.as_str())
                    .trim()
                    .to_string()
            })
            .unwrap_or_else(|| self.default_value.clone());

        ExtractedAttribute {
            attribute_name: self.attribute_name.clone(),
            attribute_value: value,
        }
    }
}
