//! Credential issuance and verification.
//!
//! Credentials are HS256 JSON Web Tokens proving identity only; role checks
//! always go back to the directory.

mod claims;

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};

use crate::domain::{DisplayName, EmailAddress, Error};

pub use claims::Claims;

/// Default credential lifetime in days.
pub const DEFAULT_TTL_DAYS: i64 = 50;

const SECS_PER_DAY: i64 = 86_400;

/// A freshly issued credential and its lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact JWT string.
    pub token: String,
    /// Seconds until the token expires.
    pub expires_in_secs: i64,
}

/// Issues and verifies tenancy credentials.
#[derive(Clone)]
pub struct CredentialIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl CredentialIssuer {
    /// Create an issuer with the given signing secret and lifetime in days.
    pub fn new(secret: &[u8], ttl_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl_secs: ttl_days.saturating_mul(SECS_PER_DAY),
        }
    }

    /// Issue a credential for a registered identity.
    pub fn issue(&self, email: &EmailAddress, name: &DisplayName) -> Result<IssuedToken, Error> {
        let now = now_secs();
        let claims = Claims {
            sub: email.to_string(),
            name: name.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
        };
        let token = jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|error| Error::internal(format!("failed to sign credential: {error}")))?;
        Ok(IssuedToken {
            token,
            expires_in_secs: self.ttl_secs,
        })
    }

    /// Verify a presented credential and return its claims.
    ///
    /// Expired, malformed, and wrongly signed tokens all map to the same
    /// `invalid_credential` error so the response does not leak which check
    /// failed.
    pub fn verify(&self, token: &str) -> Result<Claims, Error> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|_| Error::invalid_credential("credential is invalid or expired"))?;
        Ok(data.claims)
    }
}

fn now_secs() -> i64 {
    #[allow(clippy::cast_possible_wrap)]
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64;
    secs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    fn issuer() -> CredentialIssuer {
        CredentialIssuer::new(b"test-secret-key-for-testing", DEFAULT_TTL_DAYS)
    }

    fn email() -> EmailAddress {
        EmailAddress::new("ada@example.com").expect("email")
    }

    fn name() -> DisplayName {
        DisplayName::new("Ada Lovelace").expect("name")
    }

    #[test]
    fn issue_and_verify_round_trip() {
        let issuer = issuer();
        let issued = issuer.issue(&email(), &name()).expect("issue");
        assert_eq!(issued.expires_in_secs, DEFAULT_TTL_DAYS * SECS_PER_DAY);

        let claims = issuer.verify(&issued.token).expect("verify");
        assert_eq!(claims.sub, "ada@example.com");
        assert_eq!(claims.name, "Ada Lovelace");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let issued = CredentialIssuer::new(b"other-secret", DEFAULT_TTL_DAYS)
            .issue(&email(), &name())
            .expect("issue");
        let err = issuer().verify(&issued.token).expect_err("wrong secret");
        assert_eq!(err.code, ErrorCode::InvalidCredential);
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        let err = issuer().verify("not-a-jwt").expect_err("garbage");
        assert_eq!(err.code, ErrorCode::InvalidCredential);
    }

    #[test]
    fn expired_tokens_are_rejected() {
        // Zero-day TTL: exp == iat, already in the past for validation.
        let issued = CredentialIssuer::new(b"test-secret-key-for-testing", 0)
            .issue(&email(), &name())
            .expect("issue");
        let err = issuer().verify(&issued.token).expect_err("expired");
        assert_eq!(err.code, ErrorCode::InvalidCredential);
    }
}
