#![allow(dead_code)]

use blueprint_assembly::facts::fact_model::{
    Endpoint, HttpMethod, PageFact, RequestBody,
};
use blueprint_assembly::locator::element_model::{Attr, AttrValue, UiElement};

// =========================================================================
// Fact builders shared across test files
// =========================================================================

pub fn endpoint(method: HttpMethod, path: &str) -> Endpoint {
    Endpoint {
        id: String::new(),
        method,
        path: path.to_string(),
        path_params: Vec::new(),
        query_params: Vec::new(),
        request_body: RequestBody::None,
        response_schema: None,
        auth_required: false,
        auth_type: None,
        roles: Default::default(),
        confidence: 1.0,
        source_file: "src/routes.ts".to_string(),
        source_line: 1,
        framework: "express".to_string(),
        flags: Default::default(),
    }
}

pub fn page_fact(route: Option<&str>, title: &str, file_path: &str) -> PageFact {
    PageFact {
        route: route.map(str::to_string),
        title: title.to_string(),
        file_path: file_path.to_string(),
        origin: Default::default(),
        auth_required: false,
        roles: Default::default(),
        elements: Vec::new(),
        forms: Vec::new(),
        api_calls: Vec::new(),
        navigation_links: Vec::new(),
        confidence: 1.0,
    }
}

pub fn element(tag: &str) -> UiElement {
    UiElement::new(tag)
}

pub fn with_attr(mut el: UiElement, name: &str, value: &str) -> UiElement {
    el.attrs.push(Attr {
        name: name.to_string(),
        value: AttrValue::Literal(value.to_string()),
    });
    el
}

pub fn with_expr_attr(mut el: UiElement, name: &str, expr: &str) -> UiElement {
    el.attrs.push(Attr {
        name: name.to_string(),
        value: AttrValue::Expression(expr.to_string()),
    });
    el
}

pub fn with_text(mut el: UiElement, text: &str) -> UiElement {
    el.text = Some(AttrValue::Literal(text.to_string()));
    el
}

pub fn approx(actual: f32, expected: f32) -> bool {
    (actual - expected).abs() < 1e-5
}
