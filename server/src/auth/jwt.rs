//! JWT Token Generation and Validation
//!
//! HMAC-SHA256 signed access and refresh tokens. The shared secret comes
//! from `JWT_SECRET`; access tokens are short-lived, refresh tokens carry a
//! `jti` so rotation can be tracked.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{AuthError, AuthResult};

/// JWT claims for access and refresh tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID as UUID string).
    pub sub: String,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Token type (access or refresh).
    pub typ: TokenType,
    /// JWT ID for refresh token rotation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

/// Token type discriminator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived access token.
    Access,
    /// Long-lived refresh token.
    Refresh,
}

/// Token pair returned after successful authentication.
#[derive(Debug)]
pub struct TokenPair {
    /// Access token (short-lived).
    pub access_token: String,
    /// Refresh token (long-lived).
    pub refresh_token: String,
    /// Access token expiry in seconds.
    pub access_expires_in: i64,
}

/// Generate both access and refresh tokens.
///
/// # Arguments
/// * `user_id` - The user's UUID
/// * `secret` - HMAC signing secret
/// * `access_expiry_seconds` - Access token validity (typically 900 = 15 min)
/// * `refresh_expiry_seconds` - Refresh token validity (typically 604800 = 7 days)
pub fn generate_token_pair(
    user_id: Uuid,
    secret: &str,
    access_expiry_seconds: i64,
    refresh_expiry_seconds: i64,
) -> AuthResult<TokenPair> {
    let now = Utc::now();
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());

    // Access token
    let access_claims = Claims {
        sub: user_id.to_string(),
        exp: (now + Duration::seconds(access_expiry_seconds)).timestamp(),
        iat: now.timestamp(),
        typ: TokenType::Access,
        jti: None,
    };

    let access_token = encode(&Header::new(Algorithm::HS256), &access_claims, &encoding_key)?;

    // Refresh token (includes jti for rotation tracking)
    let refresh_claims = Claims {
        sub: user_id.to_string(),
        exp: (now + Duration::seconds(refresh_expiry_seconds)).timestamp(),
        iat: now.timestamp(),
        typ: TokenType::Refresh,
        jti: Some(Uuid::now_v7().to_string()),
    };

    let refresh_token = encode(&Header::new(Algorithm::HS256), &refresh_claims, &encoding_key)?;

    Ok(TokenPair {
        access_token,
        refresh_token,
        access_expires_in: access_expiry_seconds,
    })
}

/// Validate a token and return its claims, requiring the expected type.
fn validate_token(token: &str, secret: &str, expected: TokenType) -> AuthResult<Claims> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::new(Algorithm::HS256);

    let claims = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?
        .claims;

    if claims.typ != expected {
        return Err(AuthError::InvalidToken);
    }

    Ok(claims)
}

/// Validate an access token.
pub fn validate_access_token(token: &str, secret: &str) -> AuthResult<Claims> {
    validate_token(token, secret, TokenType::Access)
}

/// Validate a refresh token.
pub fn validate_refresh_token(token: &str, secret: &str) -> AuthResult<Claims> {
    validate_token(token, secret, TokenType::Refresh)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_access_token_roundtrip() {
        let user_id = Uuid::now_v7();
        let pair = generate_token_pair(user_id, SECRET, 900, 604_800).unwrap();

        let claims = validate_access_token(&pair.access_token, SECRET).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.typ, TokenType::Access);
        assert_eq!(pair.access_expires_in, 900);
    }

    #[test]
    fn test_refresh_token_roundtrip() {
        let user_id = Uuid::now_v7();
        let pair = generate_token_pair(user_id, SECRET, 900, 604_800).unwrap();

        let claims = validate_refresh_token(&pair.refresh_token, SECRET).unwrap();
        assert_eq!(claims.typ, TokenType::Refresh);
        assert!(claims.jti.is_some());
    }

    #[test]
    fn test_token_type_not_interchangeable() {
        let pair = generate_token_pair(Uuid::now_v7(), SECRET, 900, 604_800).unwrap();

        assert!(matches!(
            validate_access_token(&pair.refresh_token, SECRET),
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(
            validate_refresh_token(&pair.access_token, SECRET),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let pair = generate_token_pair(Uuid::now_v7(), SECRET, 900, 604_800).unwrap();

        assert!(validate_access_token(&pair.access_token, "other-secret").is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(matches!(
            validate_access_token("not-a-jwt", SECRET),
            Err(AuthError::InvalidToken)
        ));
    }
}
