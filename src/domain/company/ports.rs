use async_trait::async_trait;
use uuid::Uuid;

use super::entities::Company;
use crate::domain::auth::errors::AuthError;

/// Repository trait for company persistence operations
#[async_trait]
pub trait CompanyRepository: Send + Sync {
  /// Creates a new company. The (user_id, company_name) uniqueness
  /// constraint backstops the duplicate check in the flow.
  async fn create(&self, company: Company) -> Result<Company, AuthError>;

  /// Number of companies owned by the user
  async fn count_for_user(&self, user_id: Uuid) -> Result<i64, AuthError>;

  /// All companies owned by the user
  async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Company>, AuthError>;

  /// Finds a company of the user by exact name
  async fn find_by_user_and_name(
    &self,
    user_id: Uuid,
    company_name: &str,
  ) -> Result<Option<Company>, AuthError>;

  /// Finds a company only if it belongs to the given user
  async fn find_owned(
    &self,
    company_id: Uuid,
    user_id: Uuid,
  ) -> Result<Option<Company>, AuthError>;
}
