use serde::{Deserialize, Serialize};

use crate::facts::fact_model::{AuthFact, AuthMechanism};

// ============================================================================
// Auth strategy classification
// ============================================================================

/// How a chunk's generated tests should authenticate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthStrategy {
    /// One shared, pre-authenticated browser session reused by every
    /// test in the unit.
    StorageState,
    /// A stateless token acquired per unit and sent inline.
    BearerInline,
    None,
}

/// Pure function of the global auth fact, identical for every chunk:
/// cookie/SSO sessions cannot be re-established per request, so they
/// need the shared browser-session strategy; every other authenticated
/// mechanism works with an inline token.
pub fn classify_auth_strategy(auth: Option<&AuthFact>) -> AuthStrategy {
    match auth {
        None => AuthStrategy::None,
        Some(fact) => match fact.mechanism {
            AuthMechanism::SessionCookie | AuthMechanism::Sso => AuthStrategy::StorageState,
            AuthMechanism::BearerJwt
            | AuthMechanism::Basic
            | AuthMechanism::ApiKey
            | AuthMechanism::Custom => AuthStrategy::BearerInline,
        },
    }
}
