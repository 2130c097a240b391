//! Template-driven attribute extraction from unstructured text documents.
//!
//! This crate matches documents such as receipts and invoices against a set
//! of configured templates and pulls named attribute values out of the
//! matching ones, without per-document parsing code. A template pairs a
//! boolean matcher (word triggers, regexes, and/or conditional trees over
//! them) with ordered sections; each section narrows the document through a
//! selector chain and runs regex extractors over the narrowed text.
//!
//! Template sets are described in a JSON DSL and compiled once, patterns
//! included; parsing is then a pure, infallible read:
//!
//! ```
//! use siphon_core::TemplateSet;
//!
//! let config = r#"{
//!     "templates": [{
//!         "templateName": "Invoice",
//!         "matchers": {"matcherType": "oneWordMatcher", "words": "Invoice"},
//!         "sections": [{
//!             "contentSelector": {
//!                 "selectorType": "lineNumberSelector", "fromLine": 1, "toLine": 1
//!             },
//!             "contentExtractors": [{
//!                 "extractorType": "regexExtractor",
//!                 "regex": "Invoice ID ([A-Z0-9]+)",
//!                 "attributeName": "invoiceNumber",
//!                 "defaultValue": "NA",
//!                 "groupNumber": 1
//!             }]
//!         }]
//!     }]
//! }"#;
//!
//! let templates = TemplateSet::from_json_str(config)?;
//! let attributes = templates.parse_text("Invoice ID AB123\nTotal 9.0");
//! assert_eq!(attributes[0].attribute_value, "AB123");
//! # Ok::<(), siphon_core::ConfigError>(())
//! ```

pub mod config;
pub mod content;
pub mod engine;
pub mod error;

pub use content::Content;
pub use engine::{
    Condition, ExtractedAttribute, Extractor, Matcher, RegexExtractor, Section, Selector,
    SelectorKind, Template, TemplateSet,
};
pub use error::{ConfigError, Result};
