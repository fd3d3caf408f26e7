use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ValueObjectError {
  #[error("Identifier must not be empty")]
  EmptyIdentifier,

  #[error("Password is too long (max {max} bytes)")]
  PasswordTooLong { max: usize },

  #[error("Password must not be empty")]
  EmptyPassword,
}

// ============================================================================
// Notification Channel
// ============================================================================

/// Channel an OTP is routed through, inferred from the identifier shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
  Email,
  Sms,
}

impl fmt::Display for Channel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Email => write!(f, "email"),
      Self::Sms => write!(f, "sms"),
    }
  }
}

// ============================================================================
// Identifier Value Object (Email or Phone)
// ============================================================================

/// User-supplied email or phone string used to look up an account or
/// route a notification. Anything containing `@` is treated as email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier(String);

impl Identifier {
  /// Creates a new Identifier from raw input
  pub fn new(identifier: impl Into<String>) -> Result<Self, ValueObjectError> {
    let identifier = identifier.into();
    let trimmed = identifier.trim();

    if trimmed.is_empty() {
      return Err(ValueObjectError::EmptyIdentifier);
    }

    Ok(Self(trimmed.to_string()))
  }

  /// Returns the channel this identifier routes to
  pub fn channel(&self) -> Channel {
    if self.0.contains('@') {
      Channel::Email
    } else {
      Channel::Sms
    }
  }

  /// Masks the identifier for display in responses.
  ///
  /// Emails keep the first 3 characters of the local part (all of it if
  /// shorter) followed by `***@domain`. Phone-like identifiers of
  /// length >= 11 keep the first 3 and last 2 characters with a fixed
  /// run of asterisks in between; shorter ones are returned as-is.
  pub fn masked(&self) -> String {
    match self.0.split_once('@') {
      Some((local, domain)) => {
        let kept: String = local.chars().take(3).collect();
        format!("{}***@{}", kept, domain)
      }
      None => {
        if self.0.chars().count() >= 11 {
          let head: String = self.0.chars().take(3).collect();
          let tail: String = {
            let chars: Vec<char> = self.0.chars().collect();
            chars[chars.len() - 2..].iter().collect()
          };
          format!("{}******{}", head, tail)
        } else {
          self.0.clone()
        }
      }
    }
  }

  /// Returns the identifier as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Identifier {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for Identifier {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

// ============================================================================
// Password Value Object (Plain Password - Never Stored)
// ============================================================================

#[derive(Clone)]
pub struct Password(String);

impl Password {
  /// Byte-length cap matching the hashing primitive's input limit.
  /// Checked before any store access so the hasher never sees an
  /// oversized input.
  pub const MAX_BYTES: usize = 72;

  /// Creates a new Password after validation
  pub fn new(password: impl Into<String>) -> Result<Self, ValueObjectError> {
    let password = password.into();

    if password.is_empty() {
      return Err(ValueObjectError::EmptyPassword);
    }

    if password.len() > Self::MAX_BYTES {
      return Err(ValueObjectError::PasswordTooLong {
        max: Self::MAX_BYTES,
      });
    }

    Ok(Self(password))
  }

  /// Returns the password as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

// Implement Debug without exposing the password
impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

// Implement Display without exposing the password
impl fmt::Display for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("***")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_identifier_rejects_empty() {
    assert!(Identifier::new("").is_err());
    assert!(Identifier::new("   ").is_err());
  }

  #[test]
  fn test_identifier_channel_detection() {
    let email = Identifier::new("john@example.com").unwrap();
    let phone = Identifier::new("01712345678").unwrap();

    assert_eq!(email.channel(), Channel::Email);
    assert_eq!(phone.channel(), Channel::Sms);
  }

  #[test]
  fn test_email_masking() {
    let id = Identifier::new("john@example.com").unwrap();
    assert_eq!(id.masked(), "joh***@example.com");
  }

  #[test]
  fn test_short_local_part_masking() {
    let id = Identifier::new("ab@example.com").unwrap();
    assert_eq!(id.masked(), "ab***@example.com");
  }

  #[test]
  fn test_phone_masking() {
    let id = Identifier::new("01712345678").unwrap();
    assert_eq!(id.masked(), "017******78");
  }

  #[test]
  fn test_short_phone_unmasked() {
    let id = Identifier::new("0171234567").unwrap();
    assert_eq!(id.masked(), "0171234567");
  }

  #[test]
  fn test_password_validation() {
    assert!(Password::new("correct horse").is_ok());
    assert!(matches!(
      Password::new(""),
      Err(ValueObjectError::EmptyPassword)
    ));

    // Exactly at the cap is fine
    assert!(Password::new("a".repeat(72)).is_ok());

    // One byte over the cap is rejected
    assert!(matches!(
      Password::new("a".repeat(73)),
      Err(ValueObjectError::PasswordTooLong { max: 72 })
    ));
  }

  #[test]
  fn test_password_byte_length_not_char_length() {
    // 25 four-byte characters exceed 72 bytes
    let wide = "\u{1F512}".repeat(25);
    assert!(Password::new(wide).is_err());
  }

  #[test]
  fn test_password_debug_redacted() {
    let password = Password::new("supersecret").unwrap();
    assert_eq!(format!("{:?}", password), "Password(***)");
    assert_eq!(password.to_string(), "***");
  }
}
