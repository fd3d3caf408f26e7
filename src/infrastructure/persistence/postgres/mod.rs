pub mod activity_log_repository;
pub mod company_repository;
pub mod otp_repository;
pub mod user_repository;

pub use activity_log_repository::PostgresActivityLogRepository;
pub use company_repository::PostgresCompanyRepository;
pub use otp_repository::PostgresOtpRepository;
pub use user_repository::PostgresUserRepository;
