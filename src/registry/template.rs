use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::facts::fact_model::LocatorStrategy;

// ============================================================================
// Selector templates
// ============================================================================
//
// Templates are stored as parsed literal/placeholder segments rather
// than raw strings, so a prop name can never collide with literal
// selector text. They serialize as the `{{prop}}` string form.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSegment {
    Literal(String),
    Placeholder(String),
}

/// A selector expression with `{{prop}}` holes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SelectorTemplate {
    pub segments: Vec<TemplateSegment>,
}

impl SelectorTemplate {
    /// Parse the `{{prop}}` string form into segments. Unterminated
    /// `{{` is kept as literal text.
    pub fn parse(raw: &str) -> Self {
        let mut segments = Vec::new();
        let mut rest = raw;

        while let Some(open) = rest.find("{{") {
            match rest[open..].find("}}") {
                Some(close_off) => {
                    let close = open + close_off;
                    if open > 0 {
                        segments.push(TemplateSegment::Literal(rest[..open].to_string()));
                    }
                    segments.push(TemplateSegment::Placeholder(
                        rest[open + 2..close].trim().to_string(),
                    ));
                    rest = &rest[close + 2..];
                }
                None => break,
            }
        }
        if !rest.is_empty() {
            segments.push(TemplateSegment::Literal(rest.to_string()));
        }

        Self { segments }
    }

    /// Render back to the `{{prop}}` string form.
    pub fn render_raw(&self) -> String {
        let mut out = String::new();
        for seg in &self.segments {
            match seg {
                TemplateSegment::Literal(s) => out.push_str(s),
                TemplateSegment::Placeholder(p) => {
                    out.push_str("{{");
                    out.push_str(p);
                    out.push_str("}}");
                }
            }
        }
        out
    }

    /// Placeholder names, in order of first appearance, deduplicated.
    pub fn prop_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for seg in &self.segments {
            if let TemplateSegment::Placeholder(p) = seg {
                if !names.iter().any(|n| n == p) {
                    names.push(p.clone());
                }
            }
        }
        names
    }

    /// Substitute placeholder values. A placeholder with no literal
    /// value becomes a bracketed token (`[prop]`); the bool reports
    /// whether any placeholder was left unresolved.
    pub fn substitute(&self, values: &BTreeMap<String, Option<String>>) -> (String, bool) {
        let mut out = String::new();
        let mut unresolved = false;
        for seg in &self.segments {
            match seg {
                TemplateSegment::Literal(s) => out.push_str(s),
                TemplateSegment::Placeholder(p) => match values.get(p) {
                    Some(Some(v)) => out.push_str(v),
                    _ => {
                        unresolved = true;
                        out.push('[');
                        out.push_str(p);
                        out.push(']');
                    }
                },
            }
        }
        (out, unresolved)
    }
}

impl From<String> for SelectorTemplate {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<SelectorTemplate> for String {
    fn from(template: SelectorTemplate) -> Self {
        template.render_raw()
    }
}

/// One renderable locator of a custom component, parameterized by its
/// props. Several templates may exist per component name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentTemplate {
    pub component_name: String,
    pub prop_names: Vec<String>,
    pub selector_template: SelectorTemplate,
    pub strategy: LocatorStrategy,
    pub element_kind: String,
    pub is_interactive: bool,
}
