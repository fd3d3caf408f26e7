use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::{AuthService, LoginOutcome};
use crate::domain::auth::value_objects::{Channel, Identifier, Password};
use crate::domain::company::Company;

/// Command for the credential step of the login flow
#[derive(Debug, Clone)]
pub struct LoginUserCommand {
  /// Email address or phone number
  pub identifier: String,
  /// User's password (plain text)
  pub password: String,
  /// Source IP of the request, for the audit trail
  pub ip_address: Option<String>,
}

/// Minimal company view handed back to the client for selection
#[derive(Debug, Clone, serde::Serialize)]
pub struct CompanySummary {
  pub company_id: Uuid,
  pub company_name: String,
}

impl From<Company> for CompanySummary {
  fn from(company: Company) -> Self {
    Self {
      company_id: company.id,
      company_name: company.company_name,
    }
  }
}

/// Response after a successful credential check. Login is never
/// complete at this point; an OTP must still be verified.
#[derive(Debug, Clone)]
pub enum LoginUserResponse {
  /// Single company: a code was sent to the login identifier
  OtpSent {
    user_id: Uuid,
    company_id: Uuid,
    channel: Channel,
    masked_identifier: String,
  },
  /// Multiple companies: the client picks one, then requests an OTP
  SelectCompany {
    user_id: Uuid,
    companies: Vec<CompanySummary>,
  },
}

/// Use case for the credential step of login
pub struct LoginUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LoginUserUseCase {
  /// Creates a new instance of LoginUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the credential check and, for single-company accounts,
  /// kicks off OTP delivery
  ///
  /// # Errors
  /// Returns `AuthError` on bad credentials, non-active status or an
  /// account without companies
  pub async fn execute(&self, command: LoginUserCommand) -> Result<LoginUserResponse, AuthError> {
    let identifier = Identifier::new(command.identifier)?;
    let password = Password::new(command.password)?;

    let outcome = self
      .auth_service
      .login(identifier, password, command.ip_address)
      .await?;

    Ok(match outcome {
      LoginOutcome::OtpSent {
        user_id,
        company_id,
        channel,
        masked_identifier,
      } => LoginUserResponse::OtpSent {
        user_id,
        company_id,
        channel,
        masked_identifier,
      },
      LoginOutcome::SelectCompany { user_id, companies } => LoginUserResponse::SelectCompany {
        user_id,
        companies: companies.into_iter().map(CompanySummary::from).collect(),
      },
    })
  }
}
