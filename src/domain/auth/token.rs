use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use super::errors::TokenError;

/// Exact prefix stripped from Authorization-header values. Tokens without
/// it are parsed as-is; nothing is blindly sliced off.
const BEARER_PREFIX: &str = "Bearer ";

/// Claims carried by every token this service signs.
///
/// The wire names (`userId`, `email`, `exp`, `iat`, `iss`) and the HS256
/// signature are the interoperability contract: any peer service configured
/// with the same secret and lifetime accepts these tokens without
/// coordination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
  #[serde(rename = "userId")]
  pub user_id: String,
  pub email: String,
  /// Expiration, Unix seconds
  pub exp: i64,
  /// Issued-at, Unix seconds
  pub iat: i64,
  /// Issuing service name
  pub iss: String,
}

/// Issues and validates HS256-signed tokens.
///
/// The secret and lifetime are injected at construction; there is no global
/// configuration. Two instances built with the same secret and lifetime are
/// interchangeable, which is what cross-service token compatibility rests on.
pub struct TokenService {
  encoding_key: EncodingKey,
  decoding_key: DecodingKey,
  token_lifetime: Duration,
  issuer: String,
}

impl TokenService {
  pub fn new(secret: &str, token_lifetime: Duration, issuer: impl Into<String>) -> Self {
    Self {
      encoding_key: EncodingKey::from_secret(secret.as_bytes()),
      decoding_key: DecodingKey::from_secret(secret.as_bytes()),
      token_lifetime,
      issuer: issuer.into(),
    }
  }

  /// Signs a token for the given subject and email
  pub fn issue(&self, user_id: &str, email: &str) -> Result<String, TokenError> {
    if user_id.is_empty() {
      return Err(TokenError::EmptySubject);
    }

    if email.is_empty() {
      return Err(TokenError::EmptyEmail);
    }

    let now = Utc::now();
    let claims = Claims {
      user_id: user_id.to_string(),
      email: email.to_string(),
      exp: (now + self.token_lifetime).timestamp(),
      iat: now.timestamp(),
      iss: self.issuer.clone(),
    };

    encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
      .map_err(|e| TokenError::SigningFailed(e.to_string()))
  }

  /// Parses and verifies a token, accepting either a raw compact token or
  /// one carrying the exact `"Bearer "` prefix.
  ///
  /// Only HS256 is accepted; a token claiming any other algorithm is
  /// rejected regardless of its signature.
  pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
    if token.is_empty() {
      return Err(TokenError::EmptyToken);
    }

    let token = token.strip_prefix(BEARER_PREFIX).unwrap_or(token);

    let mut validation = Validation::new(Algorithm::HS256);
    // Exact expiry semantics; peers share the same clock discipline.
    validation.leeway = 0;

    let data = decode::<Claims>(token, &self.decoding_key, &validation)?;
    Ok(data.claims)
  }

  /// Lifetime applied to newly issued tokens
  pub fn token_lifetime(&self) -> Duration {
    self.token_lifetime
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const SECRET: &str = "test-signing-secret-for-unit-tests";

  fn service() -> TokenService {
    TokenService::new(SECRET, Duration::minutes(10), "userhub")
  }

  #[test]
  fn test_issue_and_validate_round_trip() {
    let service = service();

    let token = service.issue("u1", "u1@x.com").unwrap();
    let claims = service.validate(&token).unwrap();

    assert_eq!(claims.user_id, "u1");
    assert_eq!(claims.email, "u1@x.com");
    assert_eq!(claims.iss, "userhub");
    assert_eq!(claims.exp - claims.iat, 600);
  }

  #[test]
  fn test_issue_rejects_empty_inputs() {
    let service = service();

    assert!(matches!(
      service.issue("", "u1@x.com"),
      Err(TokenError::EmptySubject)
    ));
    assert!(matches!(service.issue("u1", ""), Err(TokenError::EmptyEmail)));
  }

  #[test]
  fn test_validate_rejects_empty_token() {
    assert!(matches!(service().validate(""), Err(TokenError::EmptyToken)));
  }

  #[test]
  fn test_validate_accepts_bearer_prefixed_and_raw_tokens() {
    let service = service();
    let token = service.issue("u1", "u1@x.com").unwrap();

    assert!(service.validate(&token).is_ok());
    assert!(service.validate(&format!("Bearer {}", token)).is_ok());
  }

  #[test]
  fn test_validate_does_not_strip_non_bearer_prefixes() {
    let service = service();
    let token = service.issue("u1", "u1@x.com").unwrap();

    // Lowercase "bearer " is not the header prefix; the mangled string must
    // fail to parse instead of having seven characters blindly removed.
    assert!(service.validate(&format!("bearer {}", token)).is_err());
  }

  #[test]
  fn test_expired_token_fails_with_expiry_error() {
    let expired = TokenService::new(SECRET, Duration::seconds(-1), "userhub");
    let token = expired.issue("u1", "u1@x.com").unwrap();

    assert!(matches!(
      service().validate(&token),
      Err(TokenError::Expired)
    ));
  }

  #[test]
  fn test_cross_instance_compatibility_with_shared_secret() {
    let issuer = TokenService::new(SECRET, Duration::minutes(10), "monolith");
    let verifier = TokenService::new(SECRET, Duration::minutes(10), "userhub");

    let token = issuer.issue("u1", "u1@x.com").unwrap();
    let claims = verifier.validate(&token).unwrap();

    assert_eq!(claims.user_id, "u1");
    assert_eq!(claims.iss, "monolith");
  }

  #[test]
  fn test_token_with_different_secret_is_rejected() {
    let other = TokenService::new("a-different-secret", Duration::minutes(10), "userhub");
    let token = other.issue("u1", "u1@x.com").unwrap();

    assert!(matches!(
      service().validate(&token),
      Err(TokenError::BadSignature)
    ));
  }

  #[test]
  fn test_non_hs256_algorithm_is_rejected() {
    // Same secret, different HMAC variant: must fail the algorithm check,
    // not sneak through on a valid-looking signature.
    let claims = Claims {
      user_id: "u1".to_string(),
      email: "u1@x.com".to_string(),
      exp: (Utc::now() + Duration::minutes(10)).timestamp(),
      iat: Utc::now().timestamp(),
      iss: "userhub".to_string(),
    };

    let token = encode(
      &Header::new(Algorithm::HS384),
      &claims,
      &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    assert!(matches!(
      service().validate(&token),
      Err(TokenError::UnexpectedAlgorithm)
    ));
  }

  #[test]
  fn test_garbage_token_is_malformed() {
    assert!(matches!(
      service().validate("not.a.token"),
      Err(TokenError::Malformed(_))
    ));
  }
}
