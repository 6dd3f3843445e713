use std::collections::HashMap;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Codec issuing and validating signed session tokens.
///
/// Tokens are HS256 JWTs signed with a process-wide shared secret. The
/// time-to-live is fixed at construction and applied to every issued token;
/// neither secret nor TTL change within a running process.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenCodec {
    /// Create a codec from the shared signing secret and token time-to-live.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl,
        }
    }

    /// Issue a token asserting `subject` and carrying `extra` claims.
    ///
    /// Sets `iat = now` and `exp = now + ttl`.
    ///
    /// # Errors
    /// * `EncodingFailed` - token encoding failed
    pub fn issue(
        &self,
        subject: &str,
        extra: HashMap<String, serde_json::Value>,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            extra,
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Decode a token, verifying signature and expiry.
    ///
    /// The signature is checked before any claim is read; claims from a token
    /// that fails here must never be trusted.
    ///
    /// # Errors
    /// * `Malformed` - the token is not a structurally valid JWT
    /// * `BadSignature` - the signature does not verify against the secret
    /// * `Expired` - the token's expiry has passed
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(e.to_string()),
            })
    }

    /// Check a token against an expected subject at the given instant.
    ///
    /// True iff the token decodes, asserts `expected_subject`, and is not
    /// expired at `now`.
    pub fn is_valid(&self, token: &str, expected_subject: &str, now: DateTime<Utc>) -> bool {
        match self.decode(token) {
            Ok(claims) => claims.sub == expected_subject && !claims.is_expired(now.timestamp()),
            Err(_) => false,
        }
    }
}
