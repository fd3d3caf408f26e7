//! Admin user-management use cases

mod dashboard_stats;
mod delete_user;
mod get_user_logs;
mod list_users;
mod update_user_status;

pub use dashboard_stats::{DashboardStatsResponse, DashboardStatsUseCase};
pub use delete_user::{DeleteUserCommand, DeleteUserUseCase};
pub use get_user_logs::{ActivityLogEntry, GetUserLogsCommand, GetUserLogsResponse, GetUserLogsUseCase};
pub use list_users::{ListUsersResponse, ListUsersUseCase, UserSummary};
pub use update_user_status::{UpdateUserStatusCommand, UpdateUserStatusUseCase};
