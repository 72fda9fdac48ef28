//! Signed, time-limited session tokens (HS256 JWT).
//!
//! Tokens are stateless: nothing is stored server side, so a token stays valid
//! until its `exp` even after logout clears the client's cookie.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Lifetime shared by the token `exp` claim and the cookie `Max-Age`.
pub const SESSION_TTL_SECS: u64 = 7 * 24 * 60 * 60;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
}

/// Malformed, tampered and expired tokens all collapse into this one error.
#[derive(Debug, thiserror::Error)]
#[error("invalid token")]
pub struct InvalidToken;

#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn issue(&self, user_id: impl Into<String>) -> anyhow::Result<String> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

        self.issue_at(user_id, now)
    }

    pub fn issue_at(&self, user_id: impl Into<String>, issued_at: u64) -> anyhow::Result<String> {
        let claims = Claims {
            sub: user_id.into(),
            iat: issued_at,
            exp: issued_at + SESSION_TTL_SECS,
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Returns the user id carried by a valid, unexpired token.
    pub fn verify(&self, token: &str) -> Result<String, InvalidToken> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "session token rejected");
            InvalidToken
        })?;

        if data.claims.sub.is_empty() {
            return Err(InvalidToken);
        }

        // `exp` is the first second the token is no longer valid.
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| InvalidToken)?
            .as_secs();
        if data.claims.exp <= now {
            return Err(InvalidToken);
        }

        Ok(data.claims.sub)
    }
}
