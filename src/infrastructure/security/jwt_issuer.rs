use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::auth::errors::{AuthError, TokenError};
use crate::domain::auth::ports::TokenIssuer;

/// JWT claims carried by a session token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
  /// Subject (user id as string)
  pub sub: String,
  /// Issued at timestamp
  pub iat: i64,
  /// Expiration timestamp
  pub exp: i64,
}

/// HS256 session token issuer
pub struct JwtTokenIssuer {
  encoding_key: EncodingKey,
  decoding_key: DecodingKey,
  ttl: Duration,
}

impl JwtTokenIssuer {
  /// Creates a new issuer signing with the given secret
  pub fn new(secret: &str, ttl_minutes: i64) -> Self {
    Self {
      encoding_key: EncodingKey::from_secret(secret.as_bytes()),
      decoding_key: DecodingKey::from_secret(secret.as_bytes()),
      ttl: Duration::minutes(ttl_minutes),
    }
  }

  /// Verifies and decodes a token, returning its claims
  pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
    decode::<Claims>(token, &self.decoding_key, &Validation::default())
      .map(|data| data.claims)
      .map_err(|e| AuthError::Token(TokenError::SigningFailed(e.to_string())))
  }
}

impl TokenIssuer for JwtTokenIssuer {
  fn issue(&self, subject: Uuid) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = Claims {
      sub: subject.to_string(),
      iat: now.timestamp(),
      exp: (now + self.ttl).timestamp(),
    };

    encode(&Header::default(), &claims, &self.encoding_key)
      .map_err(|e| AuthError::Token(TokenError::SigningFailed(e.to_string())))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_issue_and_verify_token() {
    let issuer = JwtTokenIssuer::new("test_secret_key", 30);
    let user_id = Uuid::new_v4();

    let token = issuer.issue(user_id).unwrap();
    let claims = issuer.verify(&token).unwrap();

    assert_eq!(claims.sub, user_id.to_string());
    assert!(claims.exp > claims.iat);
    assert_eq!(claims.exp - claims.iat, 30 * 60);
  }

  #[test]
  fn test_invalid_token_rejected() {
    let issuer = JwtTokenIssuer::new("test_secret_key", 30);
    assert!(issuer.verify("not_a_token").is_err());
  }

  #[test]
  fn test_wrong_secret_rejected() {
    let issuer1 = JwtTokenIssuer::new("secret1", 30);
    let issuer2 = JwtTokenIssuer::new("secret2", 30);

    let token = issuer1.issue(Uuid::new_v4()).unwrap();
    assert!(issuer2.verify(&token).is_err());
  }
}
