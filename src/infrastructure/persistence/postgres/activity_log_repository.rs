use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::{entities::ActivityLog, errors::AuthError, ports::ActivityLogRepository};

/// PostgreSQL implementation of the ActivityLogRepository trait
pub struct PostgresActivityLogRepository {
  pool: PgPool,
}

impl PostgresActivityLogRepository {
  /// Creates a new instance of PostgresActivityLogRepository
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Database row structure for activity_logs table
#[derive(Debug, sqlx::FromRow)]
struct ActivityLogRow {
  id: Uuid,
  user_id: Option<Uuid>,
  target_user_id: Option<Uuid>,
  action: String,
  details: Option<String>,
  ip_address: Option<String>,
  created_at: DateTime<Utc>,
}

impl From<ActivityLogRow> for ActivityLog {
  fn from(row: ActivityLogRow) -> Self {
    ActivityLog::from_db(
      row.id,
      row.user_id,
      row.target_user_id,
      row.action,
      row.details,
      row.ip_address,
      row.created_at,
    )
  }
}

#[async_trait]
impl ActivityLogRepository for PostgresActivityLogRepository {
  async fn append(&self, log: ActivityLog) -> Result<(), AuthError> {
    sqlx::query(
      r#"
            INSERT INTO activity_logs (id, user_id, target_user_id, action, details, ip_address, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
    )
    .bind(log.id)
    .bind(log.user_id)
    .bind(log.target_user_id)
    .bind(&log.action)
    .bind(&log.details)
    .bind(&log.ip_address)
    .bind(log.created_at)
    .execute(&self.pool)
    .await?;

    Ok(())
  }

  async fn find_for_user(&self, user_id: Uuid) -> Result<Vec<ActivityLog>, AuthError> {
    let rows = sqlx::query_as::<_, ActivityLogRow>(
      r#"
            SELECT id, user_id, target_user_id, action, details, ip_address, created_at
            FROM activity_logs
            WHERE user_id = $1 OR target_user_id = $1
            ORDER BY created_at DESC
            "#,
    )
    .bind(user_id)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
  }
}
