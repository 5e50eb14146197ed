//! Password hashing and access-token handling.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::CONFIG;
use crate::error::Result;
use crate::models::user;

/// JWT token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user id)
    pub iss: String, // Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: i64, // Expiration time
    pub iat: i64, // Issued at
}

/// Hash a password with bcrypt
pub fn hash_password(password: &str) -> Result<String> {
    Ok(bcrypt::hash(password, bcrypt::DEFAULT_COST)?)
}

/// Verify a password against a bcrypt hash
pub fn verify_password(password: &str, hashed: &str) -> Result<bool> {
    Ok(bcrypt::verify(password, hashed)?)
}

/// Create a signed access token for a user
pub fn create_access_token(user: &user::Model) -> Result<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id.to_string(),
        iss: "subdesk".to_string(),
        email: Some(user.email.clone()),
        exp: (now + Duration::seconds(CONFIG.auth.access_token_expire)).timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(CONFIG.auth.jwt_secret.as_bytes()),
    )?;
    Ok(token)
}

/// Decode and validate an access token
pub fn decode_token(token: &str) -> Result<Claims> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(CONFIG.auth.jwt_secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}
