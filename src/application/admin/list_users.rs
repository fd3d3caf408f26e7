use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::auth::entities::{User, UserStatus};
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::UserRepository;

/// Admin-facing user view. The password hash never leaves the
/// repository layer.
#[derive(Debug, Clone, serde::Serialize)]
pub struct UserSummary {
  pub user_id: Uuid,
  pub full_name: String,
  pub email: String,
  pub phone: String,
  pub status: UserStatus,
  pub created_at: DateTime<Utc>,
}

impl From<User> for UserSummary {
  fn from(user: User) -> Self {
    Self {
      user_id: user.id,
      full_name: user.full_name,
      email: user.email,
      phone: user.phone,
      status: user.status,
      created_at: user.created_at,
    }
  }
}

/// Response listing every registered user
#[derive(Debug, Clone)]
pub struct ListUsersResponse {
  pub users: Vec<UserSummary>,
}

/// Use case for the admin user listing
pub struct ListUsersUseCase {
  user_repo: Arc<dyn UserRepository>,
}

impl ListUsersUseCase {
  /// Creates a new instance of ListUsersUseCase
  pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
    Self { user_repo }
  }

  /// Lists all users
  ///
  /// # Errors
  /// Returns `AuthError` on repository failure
  pub async fn execute(&self) -> Result<ListUsersResponse, AuthError> {
    let users = self.user_repo.list_all().await?;
    Ok(ListUsersResponse {
      users: users.into_iter().map(UserSummary::from).collect(),
    })
  }
}
