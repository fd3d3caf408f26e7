use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::{UserRepository, UserStatusCounts};

/// Response carrying per-status account totals for the admin dashboard
#[derive(Debug, Clone)]
pub struct DashboardStatsResponse {
  pub counts: UserStatusCounts,
}

/// Use case computing the dashboard headline numbers
pub struct DashboardStatsUseCase {
  user_repo: Arc<dyn UserRepository>,
}

impl DashboardStatsUseCase {
  /// Creates a new instance of DashboardStatsUseCase
  pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
    Self { user_repo }
  }

  /// Computes the totals
  ///
  /// # Errors
  /// Returns `AuthError` on repository failure
  pub async fn execute(&self) -> Result<DashboardStatsResponse, AuthError> {
    let counts = self.user_repo.status_counts().await?;
    Ok(DashboardStatsResponse { counts })
  }
}
