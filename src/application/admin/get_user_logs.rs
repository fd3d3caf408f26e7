use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::auth::entities::ActivityLog;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::{ActivityLogRepository, UserRepository};

/// Command for fetching a user's audit trail
#[derive(Debug, Clone)]
pub struct GetUserLogsCommand {
  pub user_id: Uuid,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ActivityLogEntry {
  pub id: Uuid,
  pub action: String,
  pub details: Option<String>,
  pub ip_address: Option<String>,
  pub created_at: DateTime<Utc>,
}

impl From<ActivityLog> for ActivityLogEntry {
  fn from(log: ActivityLog) -> Self {
    Self {
      id: log.id,
      action: log.action,
      details: log.details,
      ip_address: log.ip_address,
      created_at: log.created_at,
    }
  }
}

/// Response carrying the user's audit entries, newest first
#[derive(Debug, Clone)]
pub struct GetUserLogsResponse {
  pub logs: Vec<ActivityLogEntry>,
}

/// Use case fetching audit entries where the user is actor or target
pub struct GetUserLogsUseCase {
  user_repo: Arc<dyn UserRepository>,
  log_repo: Arc<dyn ActivityLogRepository>,
}

impl GetUserLogsUseCase {
  /// Creates a new instance of GetUserLogsUseCase
  pub fn new(user_repo: Arc<dyn UserRepository>, log_repo: Arc<dyn ActivityLogRepository>) -> Self {
    Self {
      user_repo,
      log_repo,
    }
  }

  /// Fetches the audit trail for the given user
  ///
  /// # Errors
  /// Returns `AuthError::AccountNotFound` if the user does not exist
  pub async fn execute(&self, command: GetUserLogsCommand) -> Result<GetUserLogsResponse, AuthError> {
    if self.user_repo.find_by_id(command.user_id).await?.is_none() {
      return Err(AuthError::AccountNotFound);
    }

    let logs = self.log_repo.find_for_user(command.user_id).await?;
    Ok(GetUserLogsResponse {
      logs: logs.into_iter().map(ActivityLogEntry::from).collect(),
    })
  }
}
