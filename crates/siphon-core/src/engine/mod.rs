//! Template registry and orchestration.
//!
//! A [`TemplateSet`] is built once from configuration and is immutable from
//! then on; [`TemplateSet::parse_text`] performs no mutation and can run
//! concurrently against the same set from many threads.

pub mod extractor;
pub mod matcher;
pub mod selector;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::{debug, warn};

pub use extractor::{ExtractedAttribute, Extractor, RegexExtractor};
pub use matcher::{Condition, Matcher};
pub use selector::{Selector, SelectorKind};

use crate::config::{SectionDef, TemplateDef, TemplateSetDef};
use crate::content::Content;
use crate::error::{ConfigError, Result};

/// Compile a configured pattern, attaching the owning template's name to
/// the error when it fails.
pub(crate) fn compile_pattern(pattern: &str, template: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidRegex {
        pattern: pattern.to_string(),
        template: template.to_string(),
        source,
    })
}

/// One selector paired with the extractors that run on its output.
#[derive(Debug, Clone)]
pub struct Section {
    selector: Selector,
    extractors: Vec<Extractor>,
}

impl Section {
    fn build(def: &SectionDef, template: &str) -> Result<Self> {
        let selector = match &def.content_selector {
            Some(selector_def) => Selector::build(selector_def, template)?,
            None => {
                warn!(
                    template,
                    "section configures no selector; extractors run on full content"
                );
                Selector::passthrough()
            }
        };

        let extractors = def
            .content_extractors
            .iter()
            .map(|extractor_def| Extractor::build(extractor_def, template))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            selector,
            extractors,
        })
    }
}

/// One recognizable document type: a matcher deciding applicability plus the
/// sections to extract from when it applies.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    matcher: Matcher,
    sections: Vec<Section>,
}

impl Template {
    fn build(def: &TemplateDef) -> Result<Self> {
        if def.template_name.is_empty() {
            return Err(ConfigError::MissingTemplateName);
        }

        let matcher = Matcher::build(&def.matchers, &def.template_name)?;
        let sections = def
            .sections
            .iter()
            .map(|section_def| Section::build(section_def, &def.template_name))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: def.template_name.clone(),
            matcher,
            sections,
        })
    }

    /// The template's unique name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The immutable, named collection of all configured templates.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    templates: HashMap<String, Template>,
}

impl TemplateSet {
    /// Build a template set from configuration bytes in the JSON DSL.
    ///
    /// The first structural or pattern-compilation problem fails the whole
    /// build; there is no partial recovery.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let def: TemplateSetDef = serde_json::from_slice(bytes)?;
        Self::build(&def)
    }

    /// Build a template set from a JSON DSL string.
    pub fn from_json_str(config: &str) -> Result<Self> {
        Self::from_json(config.as_bytes())
    }

    /// Build a template set from a JSON DSL file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = fs::read(path)?;
        Self::from_json(&bytes)
    }

    fn build(def: &TemplateSetDef) -> Result<Self> {
        let mut templates = HashMap::with_capacity(def.templates.len());

        for template_def in &def.templates {
            let template = Template::build(template_def)?;
            if templates.contains_key(template.name()) {
                return Err(ConfigError::DuplicateTemplate(template.name().to_string()));
            }
            debug!(template = template.name(), "registered template");
            templates.insert(template.name().to_string(), template);
        }

        Ok(Self { templates })
    }

    /// Run every template against `document` and collect the extracted
    /// attributes.
    ///
    /// Each matching template contributes its sections' attributes in
    /// declared order; the order *between* templates is unspecified. A
    /// document matching no template yields an empty vector. This never
    /// fails.
    pub fn parse_text(&self, document: &str) -> Vec<ExtractedAttribute> {
        let root = Content::new(document);
        let mut attributes = Vec::new();

        for template in self.templates.values() {
            if !template.matcher.evaluate(&root) {
                debug!(template = template.name(), "template did not match");
                continue;
            }
            debug!(template = template.name(), "template matched");

            for section in &template.sections {
                let selected = section.selector.apply(&root);
                for extractor in &section.extractors {
                    attributes.push(extractor.extract(&selected));
                }
            }
        }

        attributes
    }

    /// Number of configured templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// True when no template is configured.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// The configured template names, sorted for stable output.
    pub fn template_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
