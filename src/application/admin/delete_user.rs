use std::sync::Arc;

use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::{ActivityLogRepository, UserRepository};
use crate::domain::auth::services::ActivityRecorder;

/// Command for an admin account deletion
#[derive(Debug, Clone)]
pub struct DeleteUserCommand {
  pub target_user_id: Uuid,
  /// Acting admin, if authenticated
  pub actor_id: Option<Uuid>,
  pub ip_address: Option<String>,
}

/// Use case for hard-deleting an account. Companies and OTP rows
/// cascade at the storage layer; audit rows survive with their user
/// references nulled.
pub struct DeleteUserUseCase {
  user_repo: Arc<dyn UserRepository>,
  activity: ActivityRecorder,
}

impl DeleteUserUseCase {
  /// Creates a new instance of DeleteUserUseCase
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    log_repo: Arc<dyn ActivityLogRepository>,
  ) -> Self {
    Self {
      user_repo,
      activity: ActivityRecorder::new(log_repo),
    }
  }

  /// Deletes the account and audits it as `DELETE_USER`
  ///
  /// # Errors
  /// Returns `AuthError::AccountNotFound` if the user does not exist
  pub async fn execute(&self, command: DeleteUserCommand) -> Result<(), AuthError> {
    let user = self
      .user_repo
      .find_by_id(command.target_user_id)
      .await?
      .ok_or(AuthError::AccountNotFound)?;

    self.user_repo.delete(user.id).await?;

    // Audited after the delete so the entry survives with the email in
    // the details rather than a dangling reference
    self
      .activity
      .record(
        "DELETE_USER",
        &format!("Deleted account {}", user.email),
        command.actor_id,
        None,
        command.ip_address,
      )
      .await;

    Ok(())
  }
}
