use std::env;

/// Cloudflare DNS provider configuration.
///
/// The provider client is constructed once at startup from this config and
/// passed through `AppState` — handlers never reach for ambient credentials.
#[derive(Debug, Clone)]
pub struct DnsConfig {
    pub api_base: String,
    pub api_token: String,
    pub zone_id: String,
    /// Parent domain all subdomains are issued under, e.g. "seeky.click".
    pub base_domain: String,
    /// Upper bound for any single provider API call, in seconds.
    pub timeout_secs: u64,
}

impl DnsConfig {
    pub fn from_env() -> Self {
        Self {
            api_base: env::var("SUBDESK_CLOUDFLARE_API_BASE")
                .unwrap_or_else(|_| "https://api.cloudflare.com/client/v4".to_string()),
            api_token: env::var("SUBDESK_CLOUDFLARE_API_TOKEN").unwrap_or_default(),
            zone_id: env::var("SUBDESK_CLOUDFLARE_ZONE_ID").unwrap_or_default(),
            base_domain: env::var("SUBDESK_BASE_DOMAIN")
                .unwrap_or_else(|_| "example.com".to_string()),
            timeout_secs: env::var("SUBDESK_PROVIDER_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }
}
