pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

#[cfg(test)]
pub mod test_support;

// Re-export commonly used types
pub use entities::{ActivityLog, OTP_TTL_MINUTES, OtpCode, OtpPurpose, User, UserStatus};
pub use errors::{AuthError, HashError, RepositoryError, TokenError};
pub use services::{ActivityRecorder, AuthService, LoginOutcome, OtpRequested, OtpService};
pub use value_objects::{Channel, Identifier, Password};
