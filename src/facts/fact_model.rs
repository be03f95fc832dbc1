use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::locator::element_model::UiElement;

// ============================================================================
// Endpoint facts
// ============================================================================

/// HTTP method of an extracted endpoint.
///
/// Ordering is derived from declaration order and used only as a merge
/// tie-break when two endpoints share a normalized path.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether this method conventionally carries a request body.
    /// Read methods are exempt from the body-source confidence penalty.
    pub fn carries_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

/// A named path/route parameter, optionally with a seed example value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamSpec {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// A query-string parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParam {
    pub name: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// A single field of a request body or response schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyField {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// How an endpoint's request body was derived.
///
/// Tagged so the body-source confidence penalty is an exhaustive match:
/// no body, heuristically inferred fields, statically typed but
/// unvalidated fields, or fields backed by a validation schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "source", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RequestBody {
    #[default]
    None,
    Inferred {
        fields: Vec<BodyField>,
    },
    Typed {
        type_name: String,
        fields: Vec<BodyField>,
    },
    Validated {
        schema_ref: String,
        fields: Vec<BodyField>,
    },
}

impl RequestBody {
    pub fn is_none(&self) -> bool {
        matches!(self, RequestBody::None)
    }

    pub fn fields(&self) -> &[BodyField] {
        match self {
            RequestBody::None => &[],
            RequestBody::Inferred { fields }
            | RequestBody::Typed { fields, .. }
            | RequestBody::Validated { fields, .. } => fields,
        }
    }
}

/// Expected success response of an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSchema {
    pub status_code: u16,

    #[serde(default)]
    pub fields: Vec<BodyField>,
}

/// Quality/shape flags attached to an endpoint by its extractor or the
/// assembly stage. Each flag either reduces confidence or changes how
/// the chunker treats the endpoint.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EndpointFlag {
    /// Route was mounted under a prefix the extractor could not resolve.
    UnresolvedPathPrefix,
    /// Path is built from runtime values.
    DynamicPath,
    /// Route registration is wrapped in a conditional.
    ConditionalRoute,
    /// Endpoint serves HTML rather than JSON; drives UI-style chunk output.
    ReturnsHtml,
    /// Auth requirement inherited from an enclosing layout route.
    AuthInheritedFromLayout,
}

/// A single extracted API endpoint fact.
///
/// Produced per source file by framework extractors; may be duplicated
/// or partial. Identity for merge purposes is `(method, normalized path)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    #[serde(default)]
    pub id: String,

    pub method: HttpMethod,
    pub path: String,

    #[serde(default)]
    pub path_params: Vec<ParamSpec>,

    #[serde(default)]
    pub query_params: Vec<QueryParam>,

    #[serde(default)]
    pub request_body: RequestBody,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<ResponseSchema>,

    #[serde(default)]
    pub auth_required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<String>,

    #[serde(default)]
    pub roles: BTreeSet<String>,

    #[serde(default = "default_confidence")]
    pub confidence: f32,

    #[serde(default)]
    pub source_file: String,

    #[serde(default)]
    pub source_line: u32,

    #[serde(default)]
    pub framework: String,

    #[serde(default)]
    pub flags: BTreeSet<EndpointFlag>,
}

fn default_confidence() -> f32 {
    1.0
}

// ============================================================================
// Locators
// ============================================================================

/// Which derivation rule produced a locator's selector expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocatorStrategy {
    TestId,
    Role,
    Label,
    Placeholder,
    AltText,
    Text,
    Css,
}

/// Reliability flags attached to a locator during resolution.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocatorFlag {
    /// Test-id attribute value is computed; selector is a prefix match.
    DynamicTestid,
    /// Component template resolved with a non-literal or missing prop.
    DynamicProp,
    /// Element is rendered from a mapping callback.
    DynamicList,
    /// Element is rendered behind a short-circuit or ternary condition.
    ConditionalElement,
    /// Selector relies on an id or class that is likely to change.
    Brittle,
}

/// A strategy-tagged selector for one UI element, owned by exactly one
/// page. The selector string is opaque to this crate and unique within
/// its owning page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Locator {
    #[serde(default)]
    pub id: String,

    pub name: String,
    pub selector: String,
    pub strategy: LocatorStrategy,
    pub element_kind: String,

    #[serde(default)]
    pub is_interactive: bool,

    #[serde(default)]
    pub is_conditional: bool,

    #[serde(default)]
    pub is_dynamic: bool,

    pub confidence: f32,

    #[serde(default)]
    pub flags: BTreeSet<LocatorFlag>,
}

// ============================================================================
// Form flows
// ============================================================================

/// Interaction kind of a form-flow step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepAction {
    Fill,
    Click,
    Check,
    Select,
}

/// One ordered step of a form flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormStep {
    pub order: u32,
    pub action: StepAction,
    pub selector: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_value: Option<String>,

    pub field_kind: String,
}

/// A fill-and-submit journey through one form on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFlow {
    #[serde(default)]
    pub id: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_id: Option<String>,

    #[serde(default)]
    pub steps: Vec<FormStep>,

    /// Declared submission target (form `action` attribute or handler URL),
    /// matched against endpoint paths during linking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_target: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_endpoint_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_redirect_hint: Option<String>,
}

// ============================================================================
// Pages
// ============================================================================

/// A fully resolved UI page in the blueprint. Identity for merge
/// purposes is `route`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub id: String,

    pub route: String,
    pub normalized_route: String,
    pub title: String,
    pub file_path: String,

    #[serde(default)]
    pub auth_required: bool,

    #[serde(default)]
    pub roles: BTreeSet<String>,

    #[serde(default)]
    pub is_dynamic: bool,

    #[serde(default)]
    pub route_params: Vec<ParamSpec>,

    #[serde(default)]
    pub locators: Vec<Locator>,

    #[serde(default)]
    pub form_flows: Vec<FormFlow>,

    #[serde(default)]
    pub navigation_links: Vec<String>,

    /// Literal HTTP-call URLs found in the page's source, kept for
    /// endpoint linking.
    #[serde(default)]
    pub api_calls: Vec<String>,

    #[serde(default)]
    pub linked_endpoint_ids: BTreeSet<String>,

    pub confidence: f32,
}

// ============================================================================
// Raw page facts (pre-resolution)
// ============================================================================

/// Where a page fact came from: a router/route-table declaration, or a
/// component file whose route is derived from its filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PageOrigin {
    #[default]
    Router,
    Component,
}

/// A raw form fact: the fields and submit control of one form, before
/// locator resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFact {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_target: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_redirect_hint: Option<String>,

    #[serde(default)]
    pub fields: Vec<UiElement>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit: Option<UiElement>,
}

/// A raw page fact as emitted by a UI-framework extractor: route (when
/// declared), parsed UI elements, raw forms, and link/call text found
/// in the file. Resolved into a `Page` by the locator engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,

    pub title: String,
    pub file_path: String,

    #[serde(default)]
    pub origin: PageOrigin,

    #[serde(default)]
    pub auth_required: bool,

    #[serde(default)]
    pub roles: BTreeSet<String>,

    #[serde(default)]
    pub elements: Vec<UiElement>,

    #[serde(default)]
    pub forms: Vec<FormFact>,

    #[serde(default)]
    pub api_calls: Vec<String>,

    #[serde(default)]
    pub navigation_links: Vec<String>,

    #[serde(default = "default_confidence")]
    pub confidence: f32,
}

// ============================================================================
// Auth facts
// ============================================================================

/// Authentication mechanism detected for the target application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthMechanism {
    BearerJwt,
    SessionCookie,
    Sso,
    Basic,
    ApiKey,
    Custom,
}

/// Seed credential conventions for the login form/endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CredentialFields {
    #[serde(default)]
    pub email_field: String,

    #[serde(default)]
    pub password_field: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Global auth fact produced by the (external) auth detector. Consumed
/// by the chunker's auth-strategy classification and embedded per chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthFact {
    pub mechanism: AuthMechanism,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_endpoint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_response_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_cookie_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_body_format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<CredentialFields>,
}
