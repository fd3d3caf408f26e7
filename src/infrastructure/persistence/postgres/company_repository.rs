use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::company::{Company, CompanyRepository};

/// PostgreSQL implementation of the CompanyRepository trait
pub struct PostgresCompanyRepository {
  pool: PgPool,
}

impl PostgresCompanyRepository {
  /// Creates a new instance of PostgresCompanyRepository
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

const COMPANY_COLUMNS: &str =
  "id, user_id, company_name, company_email, company_phone, created_at";

/// Database row structure for companies table
#[derive(Debug, sqlx::FromRow)]
struct CompanyRow {
  id: Uuid,
  user_id: Uuid,
  company_name: String,
  company_email: String,
  company_phone: String,
  created_at: DateTime<Utc>,
}

impl From<CompanyRow> for Company {
  fn from(row: CompanyRow) -> Self {
    Company::from_db(
      row.id,
      row.user_id,
      row.company_name,
      row.company_email,
      row.company_phone,
      row.created_at,
    )
  }
}

#[async_trait]
impl CompanyRepository for PostgresCompanyRepository {
  async fn create(&self, company: Company) -> Result<Company, AuthError> {
    let result = sqlx::query_as::<_, CompanyRow>(&format!(
      r#"
            INSERT INTO companies (id, user_id, company_name, company_email, company_phone, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COMPANY_COLUMNS}
            "#,
    ))
    .bind(company.id)
    .bind(company.user_id)
    .bind(&company.company_name)
    .bind(&company.company_email)
    .bind(&company.company_phone)
    .bind(company.created_at)
    .fetch_one(&self.pool)
    .await?;

    Ok(result.into())
  }

  async fn count_for_user(&self, user_id: Uuid) -> Result<i64, AuthError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM companies WHERE user_id = $1")
      .bind(user_id)
      .fetch_one(&self.pool)
      .await?;

    Ok(count)
  }

  async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Company>, AuthError> {
    let rows = sqlx::query_as::<_, CompanyRow>(&format!(
      "SELECT {COMPANY_COLUMNS} FROM companies WHERE user_id = $1 ORDER BY created_at",
    ))
    .bind(user_id)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  async fn find_by_user_and_name(
    &self,
    user_id: Uuid,
    company_name: &str,
  ) -> Result<Option<Company>, AuthError> {
    let result = sqlx::query_as::<_, CompanyRow>(&format!(
      "SELECT {COMPANY_COLUMNS} FROM companies WHERE user_id = $1 AND company_name = $2",
    ))
    .bind(user_id)
    .bind(company_name)
    .fetch_optional(&self.pool)
    .await?;

    Ok(result.map(Into::into))
  }

  async fn find_owned(
    &self,
    company_id: Uuid,
    user_id: Uuid,
  ) -> Result<Option<Company>, AuthError> {
    let result = sqlx::query_as::<_, CompanyRow>(&format!(
      "SELECT {COMPANY_COLUMNS} FROM companies WHERE id = $1 AND user_id = $2",
    ))
    .bind(company_id)
    .bind(user_id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(result.map(Into::into))
  }
}
