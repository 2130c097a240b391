//! Serde model of the JSON template DSL.
//!
//! These definitions mirror the configuration format one-to-one and carry no
//! behavior. [`TemplateSet::from_json`](crate::TemplateSet::from_json) turns
//! them into compiled engine types, which is where patterns are compiled and
//! structural rules (unique names, non-empty conditionals) are enforced.

use serde::Deserialize;

/// Top-level configuration document: a list of template definitions.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSetDef {
    #[serde(default)]
    pub templates: Vec<TemplateDef>,
}

/// One template: a name, one matcher tree and optional sections.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDef {
    pub template_name: String,
    pub matchers: MatcherDef,
    #[serde(default)]
    pub sections: Vec<SectionDef>,
}

/// One section: an optional selector and the extractors that run on the
/// selected content.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDef {
    pub content_selector: Option<SelectorDef>,
    #[serde(default)]
    pub content_extractors: Vec<ExtractorDef>,
}

/// Matcher definition, discriminated by `matcherType`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "matcherType", rename_all = "camelCase")]
pub enum MatcherDef {
    /// At least one of the comma-separated `words` must occur.
    #[serde(rename_all = "camelCase")]
    OneWordMatcher { words: String },

    /// Every one of the comma-separated `words` must occur.
    #[serde(rename_all = "camelCase")]
    AllWordsMatcher { words: String },

    /// The pattern must match the sanitized text.
    #[serde(rename_all = "camelCase")]
    RegexMatcher { regex_expression: String },

    /// Child matchers combined with `and`/`or` (case-insensitive).
    #[serde(rename_all = "camelCase")]
    ConditionalMatcher {
        #[serde(default)]
        condition: String,
        #[serde(default)]
        expressions: Vec<MatcherDef>,
    },
}

/// Selector definition, discriminated by `selectorType`. Every variant may
/// carry a nested `contentSelector` that receives the variant's output.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "selectorType", rename_all = "camelCase")]
pub enum SelectorDef {
    /// Substring bounded by the first occurrences of `fromText`/`toText`.
    #[serde(rename_all = "camelCase")]
    TextBlockSelector {
        #[serde(default)]
        from_text: String,
        #[serde(default)]
        to_text: String,
        content_selector: Option<Box<SelectorDef>>,
    },

    /// Inclusive 1-indexed line range.
    #[serde(rename_all = "camelCase")]
    LineNumberSelector {
        from_line: Option<i64>,
        to_line: Option<i64>,
        content_selector: Option<Box<SelectorDef>>,
    },

    /// Capture group of the first match of `regex`.
    #[serde(rename_all = "camelCase")]
    RegexSelector {
        regex: String,
        #[serde(default)]
        group_number: usize,
        content_selector: Option<Box<SelectorDef>>,
    },
}

/// Extractor definition, discriminated by `extractorType`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "extractorType", rename_all = "camelCase")]
pub enum ExtractorDef {
    /// Regex capture emitted as a named attribute.
    #[serde(rename_all = "camelCase")]
    RegexExtractor {
        regex: String,
        attribute_name: String,
        #[serde(default)]
        default_value: String,
        #[serde(default)]
        group_number: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matcher_def_parses_by_type_tag() {
        let def: MatcherDef = serde_json::from_str(
            r#"{"matcherType": "oneWordMatcher", "words": "Uber,Ola"}"#,
        )
        .unwrap();
        assert!(matches!(def, MatcherDef::OneWordMatcher { words } if words == "Uber,Ola"));
    }

    #[test]
    fn unknown_matcher_type_is_rejected() {
        let result: Result<MatcherDef, _> =
            serde_json::from_str(r#"{"matcherType": "fuzzyMatcher", "words": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn matcher_def_requires_type_specific_fields() {
        let result: Result<MatcherDef, _> =
            serde_json::from_str(r#"{"matcherType": "regexMatcher"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn selector_def_allows_nesting() {
        let def: SelectorDef = serde_json::from_str(
            r#"{
                "selectorType": "textBlockSelector",
                "fromText": "Invoice",
                "toText": "Total",
                "contentSelector": {
                    "selectorType": "lineNumberSelector",
                    "fromLine": 1,
                    "toLine": 2
                }
            }"#,
        )
        .unwrap();
        let SelectorDef::TextBlockSelector {
            content_selector, ..
        } = def
        else {
            panic!("expected a text block selector");
        };
        assert!(matches!(
            content_selector.as_deref(),
            Some(SelectorDef::LineNumberSelector { .. })
        ));
    }

    #[test]
    fn line_selector_bounds_are_optional() {
        let def: SelectorDef =
            serde_json::from_str(r#"{"selectorType": "lineNumberSelector"}"#).unwrap();
        assert!(matches!(
            def,
            SelectorDef::LineNumberSelector {
                from_line: None,
                to_line: None,
                ..
            }
        ));
    }

    #[test]
    fn extractor_def_defaults() {
        let def: ExtractorDef = serde_json::from_str(
            r#"{
                "extractorType": "regexExtractor",
                "regex": "ID (\\w+)",
                "attributeName": "id"
            }"#,
        )
        .unwrap();
        let ExtractorDef::RegexExtractor {
            default_value,
            group_number,
            ..
        } = def;
        assert_eq!(default_value, "");
        assert_eq!(group_number, 0);
    }
}
