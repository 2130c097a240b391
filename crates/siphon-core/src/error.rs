//! Error types for the siphon-core library.

use thiserror::Error;

/// Errors raised while building a [`TemplateSet`](crate::TemplateSet) from
/// configuration.
///
/// Construction surfaces the first problem it encounters and does not try to
/// recover partially. Evaluation (`parse_text`) is total and has no error
/// type of its own.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration document is not valid JSON, names an unknown
    /// matcher/selector/extractor type, or omits a required field.
    #[error("malformed template configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("failed to read template configuration: {0}")]
    Io(#[from] std::io::Error),

    /// A template was declared with an empty name.
    #[error("template name not specified in configuration")]
    MissingTemplateName,

    /// Two templates share the same name.
    #[error("duplicate template name: {0}")]
    DuplicateTemplate(String),

    /// A conditional matcher has no child expressions to combine.
    #[error("conditional matcher in template {template} has no child expressions")]
    EmptyConditional { template: String },

    /// A configured regex pattern failed to compile.
    #[error("invalid pattern {pattern:?} in template {template}: {source}")]
    InvalidRegex {
        pattern: String,
        template: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type for template set construction.
pub type Result<T> = std::result::Result<T, ConfigError>;
