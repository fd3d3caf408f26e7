use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::application::admin::{ActivityLogEntry, UserSummary};
use crate::application::auth::CompanySummary;
use crate::domain::auth::ports::UserStatusCounts;
use crate::domain::auth::value_objects::Channel;

/// Request for registering a user/company pair
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
  /// User's full name
  #[validate(length(
    min = 1,
    max = 255,
    message = "Full name must be between 1 and 255 characters"
  ))]
  pub full_name: String,

  /// User's email address
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  /// User's phone number
  #[validate(length(min = 7, max = 20, message = "Invalid phone number"))]
  pub phone: String,

  /// Name of the company to create
  #[validate(length(
    min = 1,
    max = 255,
    message = "Company name must be between 1 and 255 characters"
  ))]
  pub company_name: String,

  /// User's password
  #[validate(length(
    min = 8,
    max = 72,
    message = "Password must be between 8 and 72 characters"
  ))]
  pub password: String,
}

/// Request for the credential step of login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
  /// Email address or phone number
  #[validate(length(min = 1, message = "Identifier is required"))]
  pub identifier: String,

  /// User's password
  #[validate(length(min = 1, message = "Password is required"))]
  pub password: String,
}

/// Request for an explicit OTP (re-)send after company selection
#[derive(Debug, Clone, Deserialize)]
pub struct RequestOtpRequest {
  pub user_id: Uuid,
  pub company_id: Uuid,
  /// Identifier the code should be delivered to
  pub identifier: String,
}

/// Request for the OTP step of login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyOtpRequest {
  pub user_id: Uuid,

  /// The 6-digit code
  #[validate(length(equal = 6, message = "OTP code must be 6 digits"))]
  pub otp_code: String,
}

/// Request for one step of the password reset conversation. Which
/// fields are required depends on the step; the handler enforces that.
#[derive(Debug, Clone, Deserialize)]
pub struct ForgotPasswordRequest {
  /// Reset step: 1 initiate, 2 verify, 3 companies, 4 commit
  pub step: u8,

  /// Email address or phone number identifying the account
  pub contact: String,

  /// Step 1: delivery method, "email" or "sms"
  #[serde(default)]
  pub method: Option<String>,

  /// Step 2: the received code
  #[serde(default)]
  pub otp_code: Option<String>,

  /// Step 4: chosen company
  #[serde(default)]
  pub company_id: Option<Uuid>,

  /// Step 4: replacement password
  #[serde(default)]
  pub new_password: Option<String>,
}

/// Request for an admin status change
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
  /// New status: "active", "restricted" or "suspended"
  pub status: String,
}

/// Response after the credential step of login
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum LoginResponse {
  /// Single company: an OTP is on its way
  OtpSent {
    success: bool,
    user_id: Uuid,
    company_id: Uuid,
    channel: Channel,
    masked_identifier: String,
  },
  /// Multiple companies: the client must pick one
  SelectCompany {
    success: bool,
    user_id: Uuid,
    companies: Vec<CompanySummary>,
  },
}

/// Response after an OTP was (re-)issued
#[derive(Debug, Clone, Serialize)]
pub struct OtpSentResponse {
  pub success: bool,
  pub channel: Channel,
  pub masked_identifier: String,
}

/// Response after successful OTP verification
#[derive(Debug, Clone, Serialize)]
pub struct VerifyOtpResponse {
  pub success: bool,

  /// Signed session token
  pub access_token: String,

  /// Token scheme for the Authorization header
  pub token_type: &'static str,

  /// Where the client should navigate next
  pub redirect: &'static str,
}

/// Step-specific password reset response
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ForgotPasswordApiResponse {
  CodeSent {
    success: bool,
    masked_contact: String,
  },
  Companies {
    success: bool,
    companies: Vec<CompanySummary>,
  },
  Message {
    success: bool,
    message: String,
  },
}

/// Response listing every user for the admin screen
#[derive(Debug, Clone, Serialize)]
pub struct UserListResponse {
  pub success: bool,
  pub users: Vec<UserSummary>,
}

/// Response carrying a user's audit entries
#[derive(Debug, Clone, Serialize)]
pub struct UserLogsResponse {
  pub success: bool,
  pub logs: Vec<ActivityLogEntry>,
}

/// Response with dashboard headline numbers
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStatsApiResponse {
  pub success: bool,
  pub total: i64,
  pub active: i64,
  pub restricted: i64,
  pub suspended: i64,
}

impl From<UserStatusCounts> for DashboardStatsApiResponse {
  fn from(counts: UserStatusCounts) -> Self {
    Self {
      success: true,
      total: counts.total,
      active: counts.active,
      restricted: counts.restricted,
      suspended: counts.suspended,
    }
  }
}

/// Standard success response for operations without data
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
  pub success: bool,

  /// Success message
  pub message: String,
}

impl SuccessResponse {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      success: true,
      message: message.into(),
    }
  }
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  pub success: bool,

  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,
}
