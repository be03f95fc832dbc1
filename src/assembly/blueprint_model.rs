use serde::{Deserialize, Serialize};

use crate::facts::fact_model::{AuthFact, Endpoint, HttpMethod, Page};
use crate::facts::normalize::normalize_path;

// ============================================================================
// Assembled blueprint
// ============================================================================

/// The fully merged, scored, linked intermediate representation of a
/// target application's API and UI surface. Immutable input to the
/// chunker and to downstream generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blueprint {
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,

    #[serde(default)]
    pub pages: Vec<Page>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthFact>,
}

impl Blueprint {
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty() && self.pages.is_empty()
    }

    /// Look up a merged endpoint by its identity key.
    pub fn find_endpoint(&self, method: HttpMethod, path: &str) -> Option<&Endpoint> {
        let normalized = normalize_path(path);
        self.endpoints
            .iter()
            .find(|ep| ep.method == method && normalize_path(&ep.path) == normalized)
    }

    pub fn find_page(&self, route: &str) -> Option<&Page> {
        let normalized = normalize_path(route);
        self.pages
            .iter()
            .find(|pg| pg.normalized_route == normalized)
    }
}
