use super::config::JwtConfig;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Session token time-to-live: 24 hours
pub const TOKEN_TTL: i64 = 86_400;

/// Validation failures, distinguished so callers can map them to
/// distinct rejection codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature is invalid or uses a disallowed algorithm")]
    SignatureInvalid,

    #[error("token has expired")]
    Expired,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64, // Subject (user ID)
    pub iat: i64, // Issued at
    pub exp: i64, // Expiration time
}

/// Stateless JWT token service.
///
/// Validity is solely signature + expiry: there is no revocation list and no
/// server-side session state. Tokens are signed with HS256 and validation
/// allow-lists exactly that algorithm, so tokens carrying "none" or any other
/// algorithm are rejected before the signature is even checked.
#[derive(Clone)]
pub struct JwtAuth {
    secret: String,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!("JWT auth initialized");
        Self {
            secret: config.secret.clone(),
        }
    }

    /// Issue a token for the given subject, valid for [`TOKEN_TTL`] seconds.
    pub fn issue(&self, subject: i64) -> eyre::Result<String> {
        self.issue_with_lifetime(subject, Duration::seconds(TOKEN_TTL))
    }

    fn issue_with_lifetime(&self, subject: i64, lifetime: Duration) -> eyre::Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject,
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        };

        let header = Header {
            alg: Algorithm::HS256,
            ..Default::default()
        };

        let token = encode(
            &header,
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Verify a token and return its subject id.
    ///
    /// Expiry is checked with zero leeway, so a token is rejected the moment
    /// its `exp` passes.
    pub fn validate(&self, token: &str) -> Result<i64, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature
            | ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::ImmatureSignature => TokenError::SignatureInvalid,
            _ => classify_parse_failure(token),
        })?;

        Ok(token_data.claims.sub)
    }
}

/// jsonwebtoken rejects an unrecognized `alg` while deserializing the header,
/// before algorithm validation runs, so a "none"-algorithm token surfaces as
/// a JSON error rather than `InvalidAlgorithm`. Re-read the header segment
/// here: a readable header carrying anything but HS256 is a disallowed
/// algorithm, not malformed structure.
fn classify_parse_failure(token: &str) -> TokenError {
    let header_b64 = match token.split('.').next() {
        Some(segment) => segment,
        None => return TokenError::Malformed,
    };
    let bytes = match URL_SAFE_NO_PAD.decode(header_b64) {
        Ok(bytes) => bytes,
        Err(_) => return TokenError::Malformed,
    };
    let header: serde_json::Value = match serde_json::from_slice(&bytes) {
        Ok(value) => value,
        Err(_) => return TokenError::Malformed,
    };

    match header.get("alg").and_then(|alg| alg.as_str()) {
        Some(alg) if alg != "HS256" => TokenError::SignatureInvalid,
        _ => TokenError::Malformed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("test-secret-that-is-long-enough-for-hs256"))
    }

    #[test]
    fn test_issue_then_validate_returns_subject() {
        let auth = test_auth();
        let token = auth.issue(42).unwrap();
        assert_eq!(auth.validate(&token), Ok(42));
    }

    #[test]
    fn test_two_tokens_validate_to_same_subject() {
        let auth = test_auth();
        let t1 = auth.issue(7).unwrap();
        let t2 = auth.issue(7).unwrap();
        assert_eq!(auth.validate(&t1), Ok(7));
        assert_eq!(auth.validate(&t2), Ok(7));
    }

    #[test]
    fn test_expired_token_is_expired_not_signature_invalid() {
        let auth = test_auth();
        let token = auth
            .issue_with_lifetime(42, Duration::seconds(-1))
            .unwrap();
        assert_eq!(auth.validate(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_wrong_secret_is_signature_invalid() {
        let auth = test_auth();
        let other = JwtAuth::new(&JwtConfig::new("a-completely-different-32-char-secret!!"));
        let token = other.issue(42).unwrap();
        assert_eq!(auth.validate(&token), Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn test_tampered_signature_is_signature_invalid() {
        let auth = test_auth();
        let token = auth.issue(42).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let flipped = if parts[2].starts_with('A') { "B" } else { "A" };
        let tampered_sig = format!("{}{}", flipped, &parts[2][1..]);
        parts[2] = &tampered_sig;
        let tampered = parts.join(".");
        assert_eq!(auth.validate(&tampered), Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn test_none_algorithm_is_rejected() {
        let auth = test_auth();
        // Hand-roll an unsigned token with well-formed claims
        let now = Utc::now().timestamp();
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
        let claims = URL_SAFE_NO_PAD.encode(format!(
            r#"{{"sub":42,"iat":{},"exp":{}}}"#,
            now,
            now + 3600
        ));
        let token = format!("{}.{}.", header, claims);
        assert_eq!(auth.validate(&token), Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn test_unrecognized_algorithm_name_is_rejected() {
        let auth = test_auth();
        let now = Utc::now().timestamp();
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS999","typ":"JWT"}"#);
        let claims = URL_SAFE_NO_PAD.encode(format!(
            r#"{{"sub":42,"iat":{},"exp":{}}}"#,
            now,
            now + 3600
        ));
        let token = format!("{}.{}.sig", header, claims);
        assert_eq!(auth.validate(&token), Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn test_unreadable_header_stays_malformed() {
        let auth = test_auth();
        // Valid base64 but not JSON
        let header = URL_SAFE_NO_PAD.encode("definitely not json");
        let token = format!("{}.e30.sig", header);
        assert_eq!(auth.validate(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn test_hs384_token_is_rejected() {
        let auth = test_auth();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 42,
            iat: now,
            exp: now + 3600,
        };
        let header = Header {
            alg: Algorithm::HS384,
            ..Default::default()
        };
        let token = encode(
            &header,
            &claims,
            &EncodingKey::from_secret("test-secret-that-is-long-enough-for-hs256".as_bytes()),
        )
        .unwrap();
        assert_eq!(auth.validate(&token), Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let auth = test_auth();
        assert_eq!(auth.validate("not-a-jwt"), Err(TokenError::Malformed));
        assert_eq!(auth.validate(""), Err(TokenError::Malformed));
        assert_eq!(auth.validate("a.b"), Err(TokenError::Malformed));
    }
}
