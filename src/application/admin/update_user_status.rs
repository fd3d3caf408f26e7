use std::sync::Arc;

use uuid::Uuid;

use crate::domain::auth::entities::UserStatus;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::{ActivityLogRepository, UserRepository};
use crate::domain::auth::services::ActivityRecorder;

/// Command for an admin status change
#[derive(Debug, Clone)]
pub struct UpdateUserStatusCommand {
  /// User whose status is being changed
  pub target_user_id: Uuid,
  /// New status
  pub status: UserStatus,
  /// Acting admin, if authenticated
  pub actor_id: Option<Uuid>,
  pub ip_address: Option<String>,
}

/// Use case for moving an account between active, restricted and
/// suspended
pub struct UpdateUserStatusUseCase {
  user_repo: Arc<dyn UserRepository>,
  activity: ActivityRecorder,
}

impl UpdateUserStatusUseCase {
  /// Creates a new instance of UpdateUserStatusUseCase
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    log_repo: Arc<dyn ActivityLogRepository>,
  ) -> Self {
    Self {
      user_repo,
      activity: ActivityRecorder::new(log_repo),
    }
  }

  /// Applies the status change and audits it as `STATUS_UPDATE`
  ///
  /// # Errors
  /// Returns `AuthError::AccountNotFound` if the user does not exist
  pub async fn execute(&self, command: UpdateUserStatusCommand) -> Result<(), AuthError> {
    let user = self
      .user_repo
      .find_by_id(command.target_user_id)
      .await?
      .ok_or(AuthError::AccountNotFound)?;

    self
      .user_repo
      .update_status(user.id, command.status)
      .await?;

    self
      .activity
      .record(
        "STATUS_UPDATE",
        &format!("Status changed from {} to {}", user.status, command.status),
        command.actor_id,
        Some(user.id),
        command.ip_address,
      )
      .await;

    Ok(())
  }
}
