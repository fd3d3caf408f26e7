use thiserror::Error;

use super::entities::UserStatus;
use super::value_objects::ValueObjectError;

/// Main authentication error type.
///
/// Every variant up to `Repository` is a recoverable domain outcome that
/// the HTTP boundary surfaces as a `success=false` response. The
/// remaining variants are server faults.
#[derive(Debug, Error)]
pub enum AuthError {
  #[error("Password is too long (max 72 characters)")]
  PasswordTooLong,

  /// Covers both unknown identifier and wrong password; intentionally
  /// indistinguishable so account existence does not leak.
  #[error("No account found or invalid password")]
  InvalidCredentials,

  #[error("Your account is {status}. Please contact support.")]
  AccountNotActive { status: UserStatus },

  #[error("No company account found")]
  NoCompanyFound,

  #[error("Maximum limit of 10 companies per user reached")]
  CompanyLimitReached,

  #[error("Company already exists for this user")]
  DuplicateCompany,

  #[error("Email or phone already registered with different account")]
  IdentifierConflict,

  #[error("Invalid or expired OTP code")]
  InvalidOrExpiredOtp,

  #[error("No account found with this contact")]
  AccountNotFound,

  #[error("Invalid company for this user")]
  CompanyOwnershipMismatch,

  #[error("Missing required field: {field}")]
  MissingField { field: String },

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),

  #[error("Hash error: {0}")]
  Hash(#[from] HashError),

  #[error("Token error: {0}")]
  Token(#[from] TokenError),
}

impl AuthError {
  /// Missing-field constructor used by the step-driven reset flow
  pub fn missing(field: &str) -> Self {
    AuthError::MissingField {
      field: field.to_string(),
    }
  }
}

/// Repository-related errors
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("Database connection failed: {0}")]
  ConnectionFailed(String),

  #[error("Query execution failed: {0}")]
  QueryFailed(String),

  #[error("Record not found")]
  NotFound,

  #[error("Duplicate key violation: {0}")]
  DuplicateKey(String),

  #[error("Database error: {0}")]
  DatabaseError(String),
}

/// Password hashing and verification errors
#[derive(Debug, Error)]
pub enum HashError {
  #[error("Failed to hash password: {0}")]
  HashingFailed(String),

  #[error("Failed to verify password: {0}")]
  VerificationFailed(String),
}

/// Session token signing errors
#[derive(Debug, Error)]
pub enum TokenError {
  #[error("Failed to sign token: {0}")]
  SigningFailed(String),
}

// Automatic conversions from external error types

impl From<ValueObjectError> for AuthError {
  fn from(error: ValueObjectError) -> Self {
    match error {
      ValueObjectError::PasswordTooLong { .. } => AuthError::PasswordTooLong,
      ValueObjectError::EmptyPassword => AuthError::missing("password"),
      ValueObjectError::EmptyIdentifier => AuthError::missing("identifier"),
    }
  }
}

impl From<sqlx::Error> for RepositoryError {
  fn from(error: sqlx::Error) -> Self {
    match error {
      sqlx::Error::RowNotFound => RepositoryError::NotFound,
      sqlx::Error::Database(db_err) => {
        if db_err.is_unique_violation() {
          RepositoryError::DuplicateKey(db_err.message().to_string())
        } else {
          RepositoryError::DatabaseError(db_err.message().to_string())
        }
      }
      sqlx::Error::PoolTimedOut => RepositoryError::ConnectionFailed("Pool timed out".to_string()),
      sqlx::Error::PoolClosed => RepositoryError::ConnectionFailed("Pool closed".to_string()),
      _ => RepositoryError::QueryFailed(error.to_string()),
    }
  }
}

impl From<sqlx::Error> for AuthError {
  fn from(error: sqlx::Error) -> Self {
    AuthError::Repository(RepositoryError::from(error))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_account_not_active_carries_status() {
    let err = AuthError::AccountNotActive {
      status: UserStatus::Restricted,
    };
    assert_eq!(
      err.to_string(),
      "Your account is restricted. Please contact support."
    );
  }

  #[test]
  fn test_missing_field_message() {
    let err = AuthError::missing("otp_code");
    assert_eq!(err.to_string(), "Missing required field: otp_code");
  }
}
