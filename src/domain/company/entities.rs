use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Hard cap on companies owned by a single user
pub const MAX_COMPANIES_PER_USER: i64 = 10;

/// Company entity: a named business entity owned by exactly one user.
/// Unique on (user_id, company_name) at the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
  /// Unique identifier for the company
  pub id: Uuid,
  /// Owning user
  pub user_id: Uuid,
  /// Company name (unique per owner)
  pub company_name: String,
  /// Contact email, copied from the registration request
  pub company_email: String,
  /// Contact phone, copied from the registration request
  pub company_phone: String,
  /// Timestamp when the company was created
  pub created_at: DateTime<Utc>,
}

impl Company {
  /// Creates a new company attached to the given user
  pub fn new(
    user_id: Uuid,
    company_name: String,
    company_email: String,
    company_phone: String,
  ) -> Self {
    Self {
      id: Uuid::new_v4(),
      user_id,
      company_name,
      company_email,
      company_phone,
      created_at: Utc::now(),
    }
  }

  /// Creates a company from database fields (for reconstruction)
  pub fn from_db(
    id: Uuid,
    user_id: Uuid,
    company_name: String,
    company_email: String,
    company_phone: String,
    created_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      user_id,
      company_name,
      company_email,
      company_phone,
      created_at,
    }
  }
}
