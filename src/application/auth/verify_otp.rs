use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;

/// Post-login landing path handed to the client
const DASHBOARD_PATH: &str = "/dashboard";

/// Command for the OTP step of the login flow
#[derive(Debug, Clone)]
pub struct VerifyOtpCommand {
  pub user_id: Uuid,
  /// The 6-digit code
  pub code: String,
  pub ip_address: Option<String>,
}

/// Response after successful OTP verification: the session is live
#[derive(Debug, Clone)]
pub struct VerifyOtpResponse {
  /// Signed session token
  pub access_token: String,
  /// Where the client should navigate next
  pub redirect: &'static str,
}

/// Use case completing login by consuming the OTP and minting a token
pub struct VerifyOtpUseCase {
  auth_service: Arc<AuthService>,
}

impl VerifyOtpUseCase {
  /// Creates a new instance of VerifyOtpUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Verifies the code and issues the session token
  ///
  /// # Errors
  /// Returns `AuthError::InvalidOrExpiredOtp` when no live matching
  /// code exists
  pub async fn execute(&self, command: VerifyOtpCommand) -> Result<VerifyOtpResponse, AuthError> {
    let access_token = self
      .auth_service
      .verify_login_otp(command.user_id, &command.code, command.ip_address)
      .await?;

    Ok(VerifyOtpResponse {
      access_token,
      redirect: DASHBOARD_PATH,
    })
  }
}
