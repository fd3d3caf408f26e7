pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod routes;

// Re-export commonly used types
pub use dtos::{
  ErrorResponse, ForgotPasswordRequest, LoginRequest, LoginResponse, RegisterRequest,
  RequestOtpRequest, SuccessResponse, VerifyOtpRequest, VerifyOtpResponse,
};
pub use errors::{ApiError, AuthErrorKind};
pub use routes::{configure_auth_routes, configure_user_routes};
