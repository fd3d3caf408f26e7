use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::auth::errors::{AuthError, RepositoryError};

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses.
/// Every body carries `success: false` so clients can branch on a
/// single flag.
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ApiError {
  /// Validation error (400 Bad Request)
  Validation(String),

  /// Domain outcome surfaced to the client
  Auth(AuthErrorKind),

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

/// Recoverable domain outcomes with their own HTTP mapping
#[derive(Debug, Serialize)]
pub enum AuthErrorKind {
  /// Bad identifier or password (401)
  InvalidCredentials,

  /// Account restricted or suspended (403)
  AccountNotActive(String),

  /// No company attached to the account (404)
  NoCompanyFound,

  /// No account matches the contact (404)
  AccountNotFound,

  /// Per-user company cap hit (409)
  CompanyLimitReached,

  /// Company name already used by this owner (409)
  DuplicateCompany,

  /// Email or phone owned by a different identity (409)
  IdentifierConflict,

  /// No live matching OTP row (400)
  InvalidOrExpiredOtp,

  /// Company does not belong to the user (403)
  CompanyOwnershipMismatch,
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::Auth(kind) => write!(f, "Authentication error: {:?}", kind),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl AuthErrorKind {
  fn parts(&self) -> (&'static str, String) {
    match self {
      AuthErrorKind::InvalidCredentials => (
        "invalid_credentials",
        "No account found or invalid password".to_string(),
      ),
      AuthErrorKind::AccountNotActive(status) => (
        "account_not_active",
        format!("Your account is {}. Please contact support.", status),
      ),
      AuthErrorKind::NoCompanyFound => {
        ("no_company_found", "No company account found".to_string())
      }
      AuthErrorKind::AccountNotFound => (
        "account_not_found",
        "No account found with this contact".to_string(),
      ),
      AuthErrorKind::CompanyLimitReached => (
        "company_limit_reached",
        "Maximum limit of 10 companies per user reached".to_string(),
      ),
      AuthErrorKind::DuplicateCompany => (
        "duplicate_company",
        "Company already exists for this user".to_string(),
      ),
      AuthErrorKind::IdentifierConflict => (
        "identifier_conflict",
        "Email or phone already registered with different account".to_string(),
      ),
      AuthErrorKind::InvalidOrExpiredOtp => {
        ("invalid_otp", "Invalid or expired OTP code".to_string())
      }
      AuthErrorKind::CompanyOwnershipMismatch => (
        "company_ownership_mismatch",
        "Invalid company for this user".to_string(),
      ),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Auth(kind) => match kind {
        AuthErrorKind::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthErrorKind::AccountNotActive(_) => StatusCode::FORBIDDEN,
        AuthErrorKind::NoCompanyFound => StatusCode::NOT_FOUND,
        AuthErrorKind::AccountNotFound => StatusCode::NOT_FOUND,
        AuthErrorKind::CompanyLimitReached => StatusCode::CONFLICT,
        AuthErrorKind::DuplicateCompany => StatusCode::CONFLICT,
        AuthErrorKind::IdentifierConflict => StatusCode::CONFLICT,
        AuthErrorKind::InvalidOrExpiredOtp => StatusCode::BAD_REQUEST,
        AuthErrorKind::CompanyOwnershipMismatch => StatusCode::FORBIDDEN,
      },
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::Auth(kind) => kind.parts(),
      ApiError::Internal(msg) => {
        // Don't expose internal error details in production
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
        )
      }
    };

    let error_response = ErrorResponse {
      success: false,
      error: error_type.to_string(),
      message,
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(error_response)
  }
}

/// Convert AuthError to ApiError
impl From<AuthError> for ApiError {
  fn from(error: AuthError) -> Self {
    match error {
      AuthError::PasswordTooLong => ApiError::Validation(error.to_string()),
      AuthError::MissingField { .. } => ApiError::Validation(error.to_string()),
      AuthError::InvalidCredentials => ApiError::Auth(AuthErrorKind::InvalidCredentials),
      AuthError::AccountNotActive { status } => {
        ApiError::Auth(AuthErrorKind::AccountNotActive(status.to_string()))
      }
      AuthError::NoCompanyFound => ApiError::Auth(AuthErrorKind::NoCompanyFound),
      AuthError::AccountNotFound => ApiError::Auth(AuthErrorKind::AccountNotFound),
      AuthError::CompanyLimitReached => ApiError::Auth(AuthErrorKind::CompanyLimitReached),
      AuthError::DuplicateCompany => ApiError::Auth(AuthErrorKind::DuplicateCompany),
      AuthError::IdentifierConflict => ApiError::Auth(AuthErrorKind::IdentifierConflict),
      AuthError::InvalidOrExpiredOtp => ApiError::Auth(AuthErrorKind::InvalidOrExpiredOtp),
      AuthError::CompanyOwnershipMismatch => {
        ApiError::Auth(AuthErrorKind::CompanyOwnershipMismatch)
      }
      AuthError::Repository(err) => match err {
        RepositoryError::NotFound => ApiError::Auth(AuthErrorKind::AccountNotFound),
        // A concurrent registration losing the race on the unique
        // constraint surfaces the same way as the pre-check
        RepositoryError::DuplicateKey(_) => ApiError::Auth(AuthErrorKind::IdentifierConflict),
        _ => ApiError::Internal(err.to_string()),
      },
      AuthError::Hash(err) => ApiError::Internal(err.to_string()),
      AuthError::Token(err) => ApiError::Internal(err.to_string()),
    }
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();

    ApiError::Validation(messages.join(", "))
  }
}
