use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;

use crate::adapters::http::{
  dtos::{
    DashboardStatsApiResponse, SuccessResponse, UpdateStatusRequest, UserListResponse,
    UserLogsResponse,
  },
  errors::ApiError,
};
use crate::application::admin::{
  DashboardStatsUseCase, DeleteUserCommand, DeleteUserUseCase, GetUserLogsCommand,
  GetUserLogsUseCase, ListUsersUseCase, UpdateUserStatusCommand, UpdateUserStatusUseCase,
};
use crate::domain::auth::entities::UserStatus;

use super::auth::extract_ip_address;

/// Handler for the admin user listing
///
/// GET /api/users
/// Response: UserListResponse (JSON) with status 200
pub async fn list_users_handler(
  use_case: web::Data<Arc<ListUsersUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case.execute().await?;

  Ok(HttpResponse::Ok().json(UserListResponse {
    success: true,
    users: response.users,
  }))
}

/// Handler for a user's audit trail
///
/// GET /api/users/{user_id}/logs
/// Response: UserLogsResponse (JSON) with status 200, newest first
pub async fn user_logs_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetUserLogsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let command = GetUserLogsCommand {
    user_id: path.into_inner(),
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(UserLogsResponse {
    success: true,
    logs: response.logs,
  }))
}

/// Handler for an admin status change
///
/// PUT /api/users/{user_id}/status
/// Body: UpdateStatusRequest (JSON)
/// Response: SuccessResponse (JSON) with status 200
pub async fn update_status_handler(
  path: web::Path<Uuid>,
  request: web::Json<UpdateStatusRequest>,
  use_case: web::Data<Arc<UpdateUserStatusUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let status = UserStatus::parse(&request.status)
    .ok_or_else(|| ApiError::Validation(format!("Unknown status: {}", request.status)))?;

  let command = UpdateUserStatusCommand {
    target_user_id: path.into_inner(),
    status,
    actor_id: None,
    ip_address: extract_ip_address(&http_req),
  };

  use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(SuccessResponse::new("Status updated")))
}

/// Handler for an admin account deletion
///
/// DELETE /api/users/{user_id}
/// Response: SuccessResponse (JSON) with status 200
pub async fn delete_user_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let command = DeleteUserCommand {
    target_user_id: path.into_inner(),
    actor_id: None,
    ip_address: extract_ip_address(&http_req),
  };

  use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(SuccessResponse::new("User deleted")))
}

/// Handler for the dashboard headline numbers
///
/// GET /api/users/stats
/// Response: DashboardStatsApiResponse (JSON) with status 200
pub async fn dashboard_stats_handler(
  use_case: web::Data<Arc<DashboardStatsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case.execute().await?;

  Ok(HttpResponse::Ok().json(DashboardStatsApiResponse::from(response.counts)))
}
