use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{ActivityLog, OtpCode, OtpPurpose, User, UserStatus};
use super::errors::AuthError;
use super::value_objects::{Identifier, Password};

/// Per-status user totals for the admin dashboard
#[derive(Debug, Clone, Copy, Default)]
pub struct UserStatusCounts {
  pub total: i64,
  pub active: i64,
  pub restricted: i64,
  pub suspended: i64,
}

/// Repository trait for user persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Creates a new user. The store's (email, phone) uniqueness
  /// constraint is the last line of defense against concurrent
  /// registration races.
  async fn create(&self, user: User) -> Result<User, AuthError>;

  /// Finds a user by their unique identifier
  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError>;

  /// Finds a user by the exact (email, phone) pair
  async fn find_by_email_and_phone(
    &self,
    email: &str,
    phone: &str,
  ) -> Result<Option<User>, AuthError>;

  /// Finds a user whose email or phone exactly matches the identifier
  async fn find_by_identifier(&self, identifier: &Identifier) -> Result<Option<User>, AuthError>;

  /// Finds a user by exact email match only
  async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

  /// Finds a user by exact phone match only
  async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, AuthError>;

  /// Finds any user owning either the email or the phone individually
  async fn find_by_email_or_phone(
    &self,
    email: &str,
    phone: &str,
  ) -> Result<Option<User>, AuthError>;

  /// Overwrites the stored password hash
  async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), AuthError>;

  /// Mutates the account status
  async fn update_status(&self, id: Uuid, status: UserStatus) -> Result<(), AuthError>;

  /// Lists every user (admin listing)
  async fn list_all(&self) -> Result<Vec<User>, AuthError>;

  /// Hard-deletes a user; owned records cascade at the storage layer
  async fn delete(&self, id: Uuid) -> Result<(), AuthError>;

  /// Per-status totals for the dashboard
  async fn status_counts(&self) -> Result<UserStatusCounts, AuthError>;
}

/// Repository trait for OTP code persistence operations
#[async_trait]
pub trait OtpRepository: Send + Sync {
  /// Persists a freshly issued code (append-only; older rows stay)
  async fn create(&self, code: OtpCode) -> Result<OtpCode, AuthError>;

  /// Finds the newest unverified, unexpired row matching
  /// (user, code, purpose)
  async fn find_actionable(
    &self,
    user_id: Uuid,
    code: &str,
    purpose: OtpPurpose,
  ) -> Result<Option<OtpCode>, AuthError>;

  /// Marks a code as consumed
  async fn mark_verified(&self, id: Uuid) -> Result<(), AuthError>;
}

/// Repository trait for the append-only audit trail
#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
  /// Appends an audit entry
  async fn append(&self, log: ActivityLog) -> Result<(), AuthError>;

  /// Entries where the user is actor or target, newest first
  async fn find_for_user(&self, user_id: Uuid) -> Result<Vec<ActivityLog>, AuthError>;
}

/// Service trait for password hashing operations. The hash is opaque to
/// the rest of the system; any slow, salted, adaptive scheme satisfies
/// the contract.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  /// Hashes a plain text password
  async fn hash(&self, password: &Password) -> Result<String, AuthError>;

  /// Verifies a plain text password against a stored hash
  async fn verify(&self, password: &Password, password_hash: &str) -> Result<bool, AuthError>;
}

/// Service trait minting signed, time-boxed session tokens
pub trait TokenIssuer: Send + Sync {
  /// Issues a token binding the user id as subject
  fn issue(&self, subject: Uuid) -> Result<String, AuthError>;
}

/// Outbound OTP delivery. Best-effort: the caller schedules dispatch
/// after its own response is framed and never reacts to the outcome.
#[async_trait]
pub trait OtpDispatcher: Send + Sync {
  /// Routes the code to email or SMS based on the identifier shape;
  /// returns whether the channel accepted it
  async fn dispatch(&self, identifier: &str, code: &str, display_name: &str) -> bool;
}
