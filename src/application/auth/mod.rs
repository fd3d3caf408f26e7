//! Authentication use cases
//!
//! This module contains all authentication-related use cases that orchestrate
//! domain services to implement application-specific workflows.

mod forgot_password;
mod login_user;
mod register_user;
mod request_otp;
mod verify_otp;

pub use forgot_password::{ForgotPasswordCommand, ForgotPasswordResponse, ForgotPasswordUseCase};
pub use login_user::{CompanySummary, LoginUserCommand, LoginUserResponse, LoginUserUseCase};
pub use register_user::{RegisterUserCommand, RegisterUserUseCase};
pub use request_otp::{RequestOtpCommand, RequestOtpResponse, RequestOtpUseCase};
pub use verify_otp::{VerifyOtpCommand, VerifyOtpResponse, VerifyOtpUseCase};
