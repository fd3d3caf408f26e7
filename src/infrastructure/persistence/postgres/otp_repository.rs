use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::{
  entities::{OtpCode, OtpPurpose},
  errors::AuthError,
  ports::OtpRepository,
};

/// PostgreSQL implementation of the OtpRepository trait
pub struct PostgresOtpRepository {
  pool: PgPool,
}

impl PostgresOtpRepository {
  /// Creates a new instance of PostgresOtpRepository
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

const OTP_COLUMNS: &str = "id, user_id, identifier, code, purpose, expires_at, verified, attempt_count, blocked_until, created_at";

/// Database row structure for otp_codes table
#[derive(Debug, sqlx::FromRow)]
struct OtpRow {
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
}

impl From<OtpRow> for OtpCode {
  fn from(row: OtpRow) -> Self {
    OtpCode::from_db(
      row.id,
      row.user_id,
      row.identifier,
      row.code,
      row.purpose,
      row.expires_at,
      row.verified,
      row.attempt_count,
      row.blocked_until,
      row.created_at,
    )
  }
}

#[async_trait]
impl OtpRepository for PostgresOtpRepository {
  async fn create(&self, code: OtpCode) -> Result<OtpCode, AuthError> {
    let result = sqlx::query_as::<_, OtpRow>(&format!(
      r#"
            INSERT INTO otp_codes (id, user_id, identifier, code, purpose, expires_at, verified, attempt_count, blocked_until, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {OTP_COLUMNS}
            "#,
    ))
    .bind(code.id)
    .bind(code.user_id)
    .bind(&code.identifier)
    .bind(&code.code)
    .bind(code.purpose)
    .bind(code.expires_at)
    .bind(code.verified)
    .bind(code.attempt_count)
    .bind(code.blocked_until)
    .bind(code.created_at)
    .fetch_one(&self.pool)
    .await?;

    Ok(result.into())
  }

  async fn find_actionable(
    &self,
    user_id: Uuid,
    code: &str,
    purpose: OtpPurpose,
  ) -> Result<Option<OtpCode>, AuthError> {
    // Newest match wins; consumed and expired rows never qualify
    let result = sqlx::query_as::<_, OtpRow>(&format!(
      r#"
            SELECT {OTP_COLUMNS}
            FROM otp_codes
            WHERE user_id = $1
              AND code = $2
              AND purpose = $3
              AND verified = FALSE
              AND expires_at > NOW()
            ORDER BY created_at DESC
            LIMIT 1
            "#,
    ))
    .bind(user_id)
    .bind(code)
    .bind(purpose)
    .fetch_optional(&self.pool)
    .await?;

    Ok(result.map(Into::into))
  }

  async fn mark_verified(&self, id: Uuid) -> Result<(), AuthError> {
    sqlx::query("UPDATE otp_codes SET verified = TRUE WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    Ok(())
  }
}
