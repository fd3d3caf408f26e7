use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Channel, Identifier};

/// Command for an explicit OTP request after company selection, and
/// for resends
#[derive(Debug, Clone)]
pub struct RequestOtpCommand {
  pub user_id: Uuid,
  pub company_id: Uuid,
  /// Identifier the code should be delivered to
  pub identifier: String,
  pub ip_address: Option<String>,
}

/// Response after an OTP was issued
#[derive(Debug, Clone)]
pub struct RequestOtpResponse {
  pub channel: Channel,
  pub masked_identifier: String,
}

/// Use case for requesting a login OTP for a chosen company
pub struct RequestOtpUseCase {
  auth_service: Arc<AuthService>,
}

impl RequestOtpUseCase {
  /// Creates a new instance of RequestOtpUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Issues a fresh code for the (user, company) pair
  ///
  /// # Errors
  /// Returns `AuthError` if the company does not belong to the user or
  /// the account is not active
  pub async fn execute(&self, command: RequestOtpCommand) -> Result<RequestOtpResponse, AuthError> {
    let identifier = Identifier::new(command.identifier)?;

    let requested = self
      .auth_service
      .request_otp(
        command.user_id,
        command.company_id,
        identifier,
        command.ip_address,
      )
      .await?;

    Ok(RequestOtpResponse {
      channel: requested.channel,
      masked_identifier: requested.masked_identifier,
    })
  }
}
