use actix_web::web;
use std::sync::Arc;

use crate::application::admin::{
  DashboardStatsUseCase, DeleteUserUseCase, GetUserLogsUseCase, ListUsersUseCase,
  UpdateUserStatusUseCase,
};
use crate::application::auth::{
  ForgotPasswordUseCase, LoginUserUseCase, RegisterUserUseCase, RequestOtpUseCase,
  VerifyOtpUseCase,
};

use super::handlers::auth::{
  forgot_password_handler, login_handler, register_handler, request_otp_handler,
  verify_otp_handler,
};
use super::handlers::users::{
  dashboard_stats_handler, delete_user_handler, list_users_handler, update_status_handler,
  user_logs_handler,
};

/// Configure authentication routes
///
/// Mounts all authentication-related endpoints under the provided scope.
/// All routes are prefixed with the scope path (e.g., /api/auth).
///
/// # Routes
///
/// - POST /register - Register a user together with a company
/// - POST /login - Check credentials and start the OTP step
/// - POST /request-otp - Send an OTP for a selected company (and resends)
/// - POST /verify-otp - Consume the OTP and receive the session token
/// - POST /forgot-password - One step of the password reset conversation
pub fn configure_auth_routes(
  cfg: &mut web::ServiceConfig,
  register_use_case: Arc<RegisterUserUseCase>,
  login_use_case: Arc<LoginUserUseCase>,
  request_otp_use_case: Arc<RequestOtpUseCase>,
  verify_otp_use_case: Arc<VerifyOtpUseCase>,
  forgot_password_use_case: Arc<ForgotPasswordUseCase>,
) {
  // Store use cases in app data so handlers can access them
  cfg
    .app_data(web::Data::new(register_use_case))
    .app_data(web::Data::new(login_use_case))
    .app_data(web::Data::new(request_otp_use_case))
    .app_data(web::Data::new(verify_otp_use_case))
    .app_data(web::Data::new(forgot_password_use_case))
    // Configure routes
    .route("/register", web::post().to(register_handler))
    .route("/login", web::post().to(login_handler))
    .route("/request-otp", web::post().to(request_otp_handler))
    .route("/verify-otp", web::post().to(verify_otp_handler))
    .route("/forgot-password", web::post().to(forgot_password_handler));
}

/// Configure admin user-management routes
///
/// Mounts all user-management endpoints under the provided scope
/// (e.g., /api/users).
///
/// # Routes
///
/// - GET / - List all users
/// - GET /stats - Per-status account totals
/// - GET /{user_id}/logs - A user's audit trail
/// - PUT /{user_id}/status - Change an account's status
/// - DELETE /{user_id} - Delete an account
pub fn configure_user_routes(
  cfg: &mut web::ServiceConfig,
  list_users_use_case: Arc<ListUsersUseCase>,
  get_user_logs_use_case: Arc<GetUserLogsUseCase>,
  update_status_use_case: Arc<UpdateUserStatusUseCase>,
  delete_user_use_case: Arc<DeleteUserUseCase>,
  dashboard_stats_use_case: Arc<DashboardStatsUseCase>,
) {
  cfg
    .app_data(web::Data::new(list_users_use_case))
    .app_data(web::Data::new(get_user_logs_use_case))
    .app_data(web::Data::new(update_status_use_case))
    .app_data(web::Data::new(delete_user_use_case))
    .app_data(web::Data::new(dashboard_stats_use_case))
    .route("", web::get().to(list_users_handler))
    // `/stats` must be registered before the `{user_id}` matchers
    .route("/stats", web::get().to(dashboard_stats_handler))
    .route("/{user_id}/logs", web::get().to(user_logs_handler))
    .route("/{user_id}/status", web::put().to(update_status_handler))
    .route("/{user_id}", web::delete().to(delete_user_handler));
}
