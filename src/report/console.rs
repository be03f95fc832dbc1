use crate::assembly::blueprint_model::Blueprint;
use crate::chunker::chunker::BlueprintChunk;

// ============================================================================
// Console reporter — blueprint and chunk audit output
// ============================================================================

const LOW_CONFIDENCE: f32 = 0.6;

/// Format a blueprint audit for terminal output.
///
/// Produces output like:
/// ```text
/// === Blueprint: 12 endpoints, 4 pages ===
///
/// 🔒 POST   /api/users                      conf=0.85
/// 🔓 GET    /api/users                      conf=1.00
///
/// Low confidence:
///   ⚠ POST /api/orders (0.45)
/// ```
pub fn format_blueprint_report(blueprint: &Blueprint) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== Blueprint: {} endpoints, {} pages ===\n\n",
        blueprint.endpoints.len(),
        blueprint.pages.len()
    ));

    if let Some(auth) = &blueprint.auth {
        out.push_str(&format!(
            "Auth: {:?}  login={}\n\n",
            auth.mechanism,
            auth.login_endpoint.as_deref().unwrap_or("(none)")
        ));
    }

    for ep in &blueprint.endpoints {
        let lock = if ep.auth_required { "\u{1F512}" } else { "\u{1F513}" };
        out.push_str(&format!(
            "{} {:6} {:<45} conf={:.2}\n",
            lock,
            ep.method.as_str(),
            ep.path,
            ep.confidence
        ));
        if !ep.flags.is_empty() {
            out.push_str(&format!("         flags: {:?}\n", ep.flags));
        }
    }

    if !blueprint.pages.is_empty() {
        out.push('\n');
    }
    for page in &blueprint.pages {
        let lock = if page.auth_required { "\u{1F512}" } else { "\u{1F513}" };
        let dynamic = if page.is_dynamic { " [dynamic]" } else { "" };
        out.push_str(&format!(
            "{} PAGE   {:<45} locators={} flows={} conf={:.2}{}\n",
            lock,
            page.route,
            page.locators.len(),
            page.form_flows.len(),
            page.confidence,
            dynamic
        ));
        for loc in &page.locators {
            out.push_str(&format!(
                "         [{:?}] {:<30} conf={:.2}  {}\n",
                loc.strategy, loc.name, loc.confidence, loc.selector
            ));
        }
    }

    let low: Vec<String> = blueprint
        .endpoints
        .iter()
        .filter(|ep| ep.confidence < LOW_CONFIDENCE)
        .map(|ep| format!("{} {} ({:.2})", ep.method.as_str(), ep.path, ep.confidence))
        .chain(
            blueprint
                .pages
                .iter()
                .filter(|pg| pg.confidence < LOW_CONFIDENCE)
                .map(|pg| format!("PAGE {} ({:.2})", pg.route, pg.confidence)),
        )
        .collect();

    if !low.is_empty() {
        out.push_str("\nLow confidence:\n");
        for line in low {
            out.push_str(&format!("  \u{26A0} {}\n", line));
        }
    }

    out
}

/// Format a chunk listing for terminal output, one line per chunk.
pub fn format_chunk_report(chunks: &[BlueprintChunk]) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Chunks: {} ===\n\n", chunks.len()));

    for chunk in chunks {
        out.push_str(&format!(
            "[{:<15}] {:<30} eps={:2} pages={:2} auth={:?}\n",
            chunk.domain,
            chunk.output_name,
            chunk.endpoints.len(),
            chunk.pages.len(),
            chunk.auth_strategy
        ));
    }

    out
}
