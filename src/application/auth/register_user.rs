use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::Password;

/// Command for registering a user/company pair
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
  /// User's full name
  pub full_name: String,
  /// User's email address
  pub email: String,
  /// User's phone number
  pub phone: String,
  /// Name of the company to create
  pub company_name: String,
  /// User's password (plain text, will be hashed)
  pub password: String,
  /// Source IP of the request, for the audit trail
  pub ip_address: Option<String>,
}

/// Use case for registering a user together with a company.
/// Registration does not log the caller in; no token is returned.
pub struct RegisterUserUseCase {
  auth_service: Arc<AuthService>,
}

impl RegisterUserUseCase {
  /// Creates a new instance of RegisterUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the registration use case
  ///
  /// # Errors
  /// Returns `AuthError` if registration fails (e.g. company limit
  /// reached, duplicate company name, identifier conflict)
  pub async fn execute(&self, command: RegisterUserCommand) -> Result<(), AuthError> {
    let password = Password::new(command.password)?;

    self
      .auth_service
      .register(
        command.full_name,
        command.email,
        command.phone,
        command.company_name,
        password,
        command.ip_address,
      )
      .await
  }
}
