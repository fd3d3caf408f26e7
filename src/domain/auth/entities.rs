use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Account status controlling whether a user may log in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
  Active,
  Restricted,
  Suspended,
}

impl fmt::Display for UserStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Active => write!(f, "active"),
      Self::Restricted => write!(f, "restricted"),
      Self::Suspended => write!(f, "suspended"),
    }
  }
}

impl UserStatus {
  /// Parses a status from its wire representation
  pub fn parse(value: &str) -> Option<Self> {
    match value {
      "active" => Some(Self::Active),
      "restricted" => Some(Self::Restricted),
      "suspended" => Some(Self::Suspended),
      _ => None,
    }
  }
}

/// User entity: one identity owning up to 10 companies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  /// Unique identifier for the user
  pub id: Uuid,
  /// User's full name
  pub full_name: String,
  /// User's email address (unique together with phone)
  pub email: String,
  /// User's phone number (unique together with email)
  pub phone: String,
  /// Hashed password
  pub password_hash: String,
  /// Account status
  pub status: UserStatus,
  /// Timestamp when the user was created
  pub created_at: DateTime<Utc>,
  /// Timestamp when the user was last updated
  pub updated_at: DateTime<Utc>,
}

impl User {
  /// Creates a new active user with the given details
  pub fn new(full_name: String, email: String, phone: String, password_hash: String) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      full_name,
      email,
      phone,
      password_hash,
      status: UserStatus::Active,
      created_at: now,
      updated_at: now,
    }
  }

  /// Creates a user from database fields (for reconstruction)
  #[allow(clippy::too_many_arguments)]
  pub fn from_db(
    id: Uuid,
    full_name: String,
    email: String,
    phone: String,
    password_hash: String,
    status: UserStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      full_name,
      email,
      phone,
      password_hash,
      status,
      created_at,
      updated_at,
    }
  }

  /// Whether this account is allowed to authenticate
  pub fn is_active(&self) -> bool {
    self.status == UserStatus::Active
  }

  /// Overwrites the password hash after a completed reset
  pub fn update_password(&mut self, new_password_hash: String) {
    self.password_hash = new_password_hash;
    self.updated_at = Utc::now();
  }

  /// Mutates the account status (admin action)
  pub fn set_status(&mut self, status: UserStatus) {
    self.status = status;
    self.updated_at = Utc::now();
  }
}

/// Context tag scoping an OTP to one usage path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "otp_purpose", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
  Registration,
  Login,
  PasswordReset,
}

impl fmt::Display for OtpPurpose {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Registration => write!(f, "registration"),
      Self::Login => write!(f, "login"),
      Self::PasswordReset => write!(f, "password_reset"),
    }
  }
}

/// How long an issued code stays valid
pub const OTP_TTL_MINUTES: i64 = 10;

/// Ephemeral one-time passcode row. Issuance is append-only: a new
/// request creates a new row, older unverified rows are left alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpCode {
  /// Unique identifier for the code row
  pub id: Uuid,
  /// Owning user
  pub user_id: Uuid,
  /// Email or phone the code was sent to
  pub identifier: String,
  /// 6-digit decimal code
  pub code: String,
  /// Usage path this code is scoped to
  pub purpose: OtpPurpose,
  /// Expiry timestamp (issuance + 10 minutes)
  pub expires_at: DateTime<Utc>,
  /// Set once the code has been consumed
  pub verified: bool,
  /// Extension point for rate limiting; never read by validation
  pub attempt_count: i32,
  /// Extension point for lockout; never read by validation
  pub blocked_until: Option<DateTime<Utc>>,
  /// Timestamp when the code was issued
  pub created_at: DateTime<Utc>,
}

impl OtpCode {
  /// Creates a new unverified code expiring in [`OTP_TTL_MINUTES`]
  pub fn new(user_id: Uuid, identifier: String, code: String, purpose: OtpPurpose) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      user_id,
      identifier,
      code,
      purpose,
      expires_at: now + Duration::minutes(OTP_TTL_MINUTES),
      verified: false,
      attempt_count: 0,
      blocked_until: None,
      created_at: now,
    }
  }

  /// Creates a code from database fields (for reconstruction)
  #[allow(clippy::too_many_arguments)]
  pub fn from_db(
    id: Uuid,
    user_id: Uuid,
    identifier: String,
    code: String,
    purpose: OtpPurpose,
    expires_at: DateTime<Utc>,
    verified: bool,
    attempt_count: i32,
    blocked_until: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      user_id,
      identifier,
      code,
      purpose,
      expires_at,
      verified,
      attempt_count,
      blocked_until,
      created_at,
    }
  }

  /// Checks if the code has expired
  pub fn is_expired(&self) -> bool {
    self.expires_at <= Utc::now()
  }

  /// Checks if the code can still be consumed
  pub fn is_actionable(&self) -> bool {
    !self.verified && !self.is_expired()
  }

  /// Consumes the code; a consumed code never validates again
  pub fn mark_verified(&mut self) {
    self.verified = true;
  }
}

/// Append-only audit trail entry. Writes are best-effort and must not
/// fail the operation that produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLog {
  /// Unique identifier for the log entry
  pub id: Uuid,
  /// Acting user, if known
  pub user_id: Option<Uuid>,
  /// Affected user, for admin actions
  pub target_user_id: Option<Uuid>,
  /// Action tag, e.g. `LOGIN_SUCCESS`
  pub action: String,
  /// Free-text detail
  pub details: Option<String>,
  /// Source IP of the triggering request
  pub ip_address: Option<String>,
  /// Timestamp when the entry was written
  pub created_at: DateTime<Utc>,
}

impl ActivityLog {
  /// Creates a new audit entry
  pub fn new(
    action: impl Into<String>,
    details: Option<String>,
    user_id: Option<Uuid>,
    target_user_id: Option<Uuid>,
    ip_address: Option<String>,
  ) -> Self {
    Self {
      id: Uuid::new_v4(),
      user_id,
      target_user_id,
      action: action.into(),
      details,
      ip_address,
      created_at: Utc::now(),
    }
  }

  /// Creates a log entry from database fields (for reconstruction)
  pub fn from_db(
    id: Uuid,
    user_id: Option<Uuid>,
    target_user_id: Option<Uuid>,
    action: String,
    details: Option<String>,
    ip_address: Option<String>,
    created_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      user_id,
      target_user_id,
      action,
      details,
      ip_address,
      created_at,
    }
  }
}
