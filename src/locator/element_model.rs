use serde::{Deserialize, Serialize};

// ============================================================================
// Parsed UI element facts (input to locator resolution)
// ============================================================================

/// An attribute or text value as it appeared in source: a literal
/// string, or a non-literal expression kept as raw source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum AttrValue {
    Literal(String),
    Expression(String),
}

impl AttrValue {
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            AttrValue::Literal(s) => Some(s),
            AttrValue::Expression(_) => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, AttrValue::Literal(_))
    }
}

/// One attribute on a UI element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attr {
    pub name: String,
    pub value: AttrValue,
}

/// What immediately encloses the element in the syntax tree. Drives the
/// conditional/dynamic locator flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ParentContext {
    /// Literal text of an immediate `<label>` parent wrapping this element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_text: Option<String>,

    /// Element sits inside a short-circuit boolean or ternary expression.
    #[serde(default)]
    pub conditional: bool,

    /// Element is the return value of a mapping callback.
    #[serde(default)]
    pub in_map_callback: bool,
}

/// A single UI element mined from a page or component syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiElement {
    pub tag: String,

    #[serde(default)]
    pub attrs: Vec<Attr>,

    /// Immediate child text, literal or computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<AttrValue>,

    #[serde(default)]
    pub parent: ParentContext,
}

impl UiElement {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: Vec::new(),
            text: None,
            parent: ParentContext::default(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.iter().find(|a| a.name == name).map(|a| &a.value)
    }

    pub fn literal_attr(&self, name: &str) -> Option<&str> {
        self.attr(name).and_then(|v| v.as_literal())
    }

    pub fn literal_text(&self) -> Option<&str> {
        self.text
            .as_ref()
            .and_then(|t| t.as_literal())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Native HTML tags are lowercase; custom widgets are PascalCase.
    pub fn is_native(&self) -> bool {
        self.tag
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_lowercase())
    }

    pub fn input_type(&self) -> Option<&str> {
        if self.tag == "input" {
            self.literal_attr("type").or(Some("text"))
        } else {
            None
        }
    }
}
