use std::env;

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 signing secret for access tokens.
    pub jwt_secret: String,
    /// Access token lifetime in seconds.
    pub access_token_expire: i64,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            jwt_secret: env::var("SUBDESK_JWT_SECRET")
                .unwrap_or_else(|_| "subdesk-dev-secret".to_string()),
            access_token_expire: env::var("SUBDESK_ACCESS_TOKEN_EXPIRE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
        }
    }
}
