use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::{
  entities::{User, UserStatus},
  errors::AuthError,
  ports::{UserRepository, UserStatusCounts},
  value_objects::{Channel, Identifier},
};

/// PostgreSQL implementation of the UserRepository trait
pub struct PostgresUserRepository {
  pool: PgPool,
}

impl PostgresUserRepository {
  /// Creates a new instance of PostgresUserRepository
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

const USER_COLUMNS: &str = "id, full_name, email, phone, password_hash, status, created_at, updated_at";

/// Database row structure for users table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: Uuid,
  full_name: String,
  email: String,
  phone: String,
  password_hash: String,
  status: UserStatus,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
  fn from(row: UserRow) -> Self {
    User::from_db(
      row.id,
      row.full_name,
      row.email,
      row.phone,
      row.password_hash,
      row.status,
      row.created_at,
      row.updated_at,
    )
  }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
  async fn create(&self, user: User) -> Result<User, AuthError> {
    let result = sqlx::query_as::<_, UserRow>(&format!(
      r#"
            INSERT INTO users (id, full_name, email, phone, password_hash, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {USER_COLUMNS}
            "#,
    ))
    .bind(user.id)
    .bind(&user.full_name)
    .bind(&user.email)
    .bind(&user.phone)
    .bind(&user.password_hash)
    .bind(user.status)
    .bind(user.created_at)
    .bind(user.updated_at)
    .fetch_one(&self.pool)
    .await?;

    Ok(result.into())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
    let result = sqlx::query_as::<_, UserRow>(&format!(
      "SELECT {USER_COLUMNS} FROM users WHERE id = $1",
    ))
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(result.map(Into::into))
  }

  async fn find_by_email_and_phone(
    &self,
    email: &str,
    phone: &str,
  ) -> Result<Option<User>, AuthError> {
    let result = sqlx::query_as::<_, UserRow>(&format!(
      "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND phone = $2",
    ))
    .bind(email)
    .bind(phone)
    .fetch_optional(&self.pool)
    .await?;

    Ok(result.map(Into::into))
  }

  async fn find_by_identifier(&self, identifier: &Identifier) -> Result<Option<User>, AuthError> {
    // The identifier shape decides which column is matched; no
    // cross-column fallback
    let column = match identifier.channel() {
      Channel::Email => "email",
      Channel::Sms => "phone",
    };

    let result = sqlx::query_as::<_, UserRow>(&format!(
      "SELECT {USER_COLUMNS} FROM users WHERE {column} = $1",
    ))
    .bind(identifier.as_str())
    .fetch_optional(&self.pool)
    .await?;

    Ok(result.map(Into::into))
  }

  async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
    let result = sqlx::query_as::<_, UserRow>(&format!(
      "SELECT {USER_COLUMNS} FROM users WHERE email = $1",
    ))
    .bind(email)
    .fetch_optional(&self.pool)
    .await?;

    Ok(result.map(Into::into))
  }

  async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, AuthError> {
    let result = sqlx::query_as::<_, UserRow>(&format!(
      "SELECT {USER_COLUMNS} FROM users WHERE phone = $1",
    ))
    .bind(phone)
    .fetch_optional(&self.pool)
    .await?;

    Ok(result.map(Into::into))
  }

  async fn find_by_email_or_phone(
    &self,
    email: &str,
    phone: &str,
  ) -> Result<Option<User>, AuthError> {
    let result = sqlx::query_as::<_, UserRow>(&format!(
      "SELECT {USER_COLUMNS} FROM users WHERE email = $1 OR phone = $2 LIMIT 1",
    ))
    .bind(email)
    .bind(phone)
    .fetch_optional(&self.pool)
    .await?;

    Ok(result.map(Into::into))
  }

  async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), AuthError> {
    sqlx::query(
      r#"
            UPDATE users
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            "#,
    )
    .bind(id)
    .bind(password_hash)
    .execute(&self.pool)
    .await?;

    Ok(())
  }

  async fn update_status(&self, id: Uuid, status: UserStatus) -> Result<(), AuthError> {
    sqlx::query(
      r#"
            UPDATE users
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            "#,
    )
    .bind(id)
    .bind(status)
    .execute(&self.pool)
    .await?;

    Ok(())
  }

  async fn list_all(&self) -> Result<Vec<User>, AuthError> {
    let rows = sqlx::query_as::<_, UserRow>(&format!(
      "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC",
    ))
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  async fn delete(&self, id: Uuid) -> Result<(), AuthError> {
    sqlx::query("DELETE FROM users WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    Ok(())
  }

  async fn status_counts(&self) -> Result<UserStatusCounts, AuthError> {
    let row: (i64, i64, i64) = sqlx::query_as(
      r#"
            SELECT
                COUNT(*) FILTER (WHERE status = 'active'),
                COUNT(*) FILTER (WHERE status = 'restricted'),
                COUNT(*) FILTER (WHERE status = 'suspended')
            FROM users
            "#,
    )
    .fetch_one(&self.pool)
    .await?;

    Ok(UserStatusCounts {
      total: row.0 + row.1 + row.2,
      active: row.0,
      restricted: row.1,
      suspended: row.2,
    })
  }
}
