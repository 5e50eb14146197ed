use serde::Deserialize;
use validator::Validate;

/// Payload for creating a subdomain request. The structural bounds here are
/// the first line of defense; label syntax, per-type target parsing and plan
/// policy are enforced by the services before anything is written.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRequestPayload {
    #[validate(length(min = 1, max = 63))]
    pub subdomain: String,
    pub record_type: String,
    #[validate(length(min = 1, max = 255))]
    pub target_value: String,
    #[validate(range(min = 60, max = 86400))]
    pub ttl: i64,
}

#[derive(Debug, Deserialize)]
pub struct RejectPayload {
    pub reason: Option<String>,
}
