//! Signed session token creation and validation.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use biblios_core::config::AuthConfig;
use biblios_core::error::AppError;
use biblios_entity::user::UserRole;

/// Claims payload embedded in every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject, the user ID.
    pub sub: Uuid,
    /// User role at the time the session was opened.
    pub role: UserRole,
    /// Username for convenience.
    pub username: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token ID.
    pub jti: Uuid,
}

impl SessionClaims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Creates and validates signed session tokens.
#[derive(Clone)]
pub struct TokenCodec {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
    /// Session TTL in hours.
    session_ttl_hours: i64,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("validation", &self.validation)
            .field("session_ttl_hours", &self.session_ttl_hours)
            .finish()
    }
}

impl TokenCodec {
    /// Creates a new codec from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            session_ttl_hours: config.session_ttl_hours as i64,
        }
    }

    /// Generates a signed session token for the given user.
    pub fn generate_session_token(
        &self,
        user_id: Uuid,
        role: &UserRole,
        username: &str,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let exp = now + chrono::Duration::hours(self.session_ttl_hours);

        let claims = SessionClaims {
            sub: user_id,
            role: role.clone(),
            username: username.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))?;

        Ok((token, exp))
    }

    /// Decodes and validates a session token string.
    pub fn decode_session_token(&self, token: &str) -> Result<SessionClaims, AppError> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::unauthorized("Session has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::unauthorized("Invalid session token format")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::unauthorized("Invalid session token signature")
                }
                _ => AppError::unauthorized(format!("Session validation failed: {e}")),
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret-at-least-32-characters!!".to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_token_roundtrip() {
        let codec = TokenCodec::new(&test_config());
        let user_id = Uuid::new_v4();
        let (token, exp) = codec
            .generate_session_token(user_id, &UserRole::Librarian, "mina")
            .unwrap();

        let claims = codec.decode_session_token(&token).unwrap();
        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.username, "mina");
        assert_eq!(claims.role, UserRole::Librarian);
        assert_eq!(claims.exp, exp.timestamp());
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let codec = TokenCodec::new(&test_config());
        let (token, _) = codec
            .generate_session_token(Uuid::new_v4(), &UserRole::Member, "eve")
            .unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        assert!(codec.decode_session_token(&tampered).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let codec = TokenCodec::new(&test_config());
        let (token, _) = codec
            .generate_session_token(Uuid::new_v4(), &UserRole::Admin, "root")
            .unwrap();

        let other = TokenCodec::new(&AuthConfig {
            jwt_secret: "a-completely-different-secret-value".to_string(),
            ..AuthConfig::default()
        });
        assert!(other.decode_session_token(&token).is_err());
    }
}
