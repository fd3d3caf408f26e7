use std::sync::Arc;
use uuid::Uuid;

use super::login_user::CompanySummary;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Channel, Identifier, Password};

/// One step of the four-step password reset conversation. The client
/// drives the sequence; the server holds no state between steps beyond
/// the OTP row itself.
#[derive(Debug, Clone)]
pub enum ForgotPasswordCommand {
  /// Step 1: resolve the account and send a reset code
  Initiate {
    contact: String,
    method: Channel,
    ip_address: Option<String>,
  },
  /// Step 2: consume the reset code
  Verify { contact: String, code: String },
  /// Step 3: list the account's companies for selection
  Companies { contact: String },
  /// Step 4: overwrite the password
  Commit {
    contact: String,
    company_id: Uuid,
    new_password: String,
    ip_address: Option<String>,
  },
}

/// Step-specific reset outcome
#[derive(Debug, Clone)]
pub enum ForgotPasswordResponse {
  /// Step 1 succeeded; carries the masked contact for display
  CodeSent { masked_contact: String },
  /// Step 2 succeeded
  CodeVerified,
  /// Step 3 result
  Companies { companies: Vec<CompanySummary> },
  /// Step 4 succeeded
  PasswordChanged,
}

/// Use case for the stateless multi-step password reset flow
pub struct ForgotPasswordUseCase {
  auth_service: Arc<AuthService>,
}

impl ForgotPasswordUseCase {
  /// Creates a new instance of ForgotPasswordUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes one step of the reset flow
  ///
  /// # Errors
  /// Returns `AuthError` when the account cannot be resolved, the code
  /// is invalid or expired, or the chosen company is not owned by the
  /// account
  pub async fn execute(
    &self,
    command: ForgotPasswordCommand,
  ) -> Result<ForgotPasswordResponse, AuthError> {
    match command {
      ForgotPasswordCommand::Initiate {
        contact,
        method,
        ip_address,
      } => {
        let contact = Identifier::new(contact)?;
        let masked_contact = self
          .auth_service
          .reset_initiate(contact, method, ip_address)
          .await?;
        Ok(ForgotPasswordResponse::CodeSent { masked_contact })
      }
      ForgotPasswordCommand::Verify { contact, code } => {
        let contact = Identifier::new(contact)?;
        self.auth_service.reset_verify(contact, &code).await?;
        Ok(ForgotPasswordResponse::CodeVerified)
      }
      ForgotPasswordCommand::Companies { contact } => {
        let contact = Identifier::new(contact)?;
        let companies = self.auth_service.reset_companies(contact).await?;
        Ok(ForgotPasswordResponse::Companies {
          companies: companies.into_iter().map(CompanySummary::from).collect(),
        })
      }
      ForgotPasswordCommand::Commit {
        contact,
        company_id,
        new_password,
        ip_address,
      } => {
        let contact = Identifier::new(contact)?;
        let new_password = Password::new(new_password)?;
        self
          .auth_service
          .reset_commit(contact, company_id, new_password, ip_address)
          .await?;
        Ok(ForgotPasswordResponse::PasswordChanged)
      }
    }
  }
}
