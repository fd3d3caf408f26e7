//! In-memory port implementations for unit testing the domain services.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::entities::{ActivityLog, OtpCode, OtpPurpose, User, UserStatus};
use super::errors::AuthError;
use super::ports::{
  ActivityLogRepository, OtpDispatcher, OtpRepository, PasswordHasher, TokenIssuer, UserRepository,
  UserStatusCounts,
};
use super::value_objects::{Channel, Identifier, Password};
use crate::domain::company::{Company, CompanyRepository};

#[derive(Default)]
pub struct FakeUserRepository {
  users: Mutex<Vec<User>>,
}

impl FakeUserRepository {
  pub fn insert(&self, user: User) {
    self.users.lock().unwrap().push(user);
  }

  pub fn get_by_email(&self, email: &str) -> Option<User> {
    self
      .users
      .lock()
      .unwrap()
      .iter()
      .find(|u| u.email == email)
      .cloned()
  }

  pub fn set_status(&self, id: Uuid, status: UserStatus) {
    let mut users = self.users.lock().unwrap();
    if let Some(user) = users.iter_mut().find(|u| u.id == id) {
      user.status = status;
    }
  }

  pub fn len(&self) -> usize {
    self.users.lock().unwrap().len()
  }
}

#[async_trait]
impl UserRepository for FakeUserRepository {
  async fn create(&self, user: User) -> Result<User, AuthError> {
    self.users.lock().unwrap().push(user.clone());
    Ok(user)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
    Ok(
      self
        .users
        .lock()
        .unwrap()
        .iter()
        .find(|u| u.id == id)
        .cloned(),
    )
  }

  async fn find_by_email_and_phone(
    &self,
    email: &str,
    phone: &str,
  ) -> Result<Option<User>, AuthError> {
    Ok(
      self
        .users
        .lock()
        .unwrap()
        .iter()
        .find(|u| u.email == email && u.phone == phone)
        .cloned(),
    )
  }

  async fn find_by_identifier(&self, identifier: &Identifier) -> Result<Option<User>, AuthError> {
    let value = identifier.as_str();
    Ok(
      self
        .users
        .lock()
        .unwrap()
        .iter()
        .find(|u| match identifier.channel() {
          Channel::Email => u.email == value,
          Channel::Sms => u.phone == value,
        })
        .cloned(),
    )
  }

  async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
    Ok(self.get_by_email(email))
  }

  async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, AuthError> {
    Ok(
      self
        .users
        .lock()
        .unwrap()
        .iter()
        .find(|u| u.phone == phone)
        .cloned(),
    )
  }

  async fn find_by_email_or_phone(
    &self,
    email: &str,
    phone: &str,
  ) -> Result<Option<User>, AuthError> {
    Ok(
      self
        .users
        .lock()
        .unwrap()
        .iter()
        .find(|u| u.email == email || u.phone == phone)
        .cloned(),
    )
  }

  async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), AuthError> {
    let mut users = self.users.lock().unwrap();
    if let Some(user) = users.iter_mut().find(|u| u.id == id) {
      user.password_hash = password_hash.to_string();
    }
    Ok(())
  }

  async fn update_status(&self, id: Uuid, status: UserStatus) -> Result<(), AuthError> {
    self.set_status(id, status);
    Ok(())
  }

  async fn list_all(&self) -> Result<Vec<User>, AuthError> {
    Ok(self.users.lock().unwrap().clone())
  }

  async fn delete(&self, id: Uuid) -> Result<(), AuthError> {
    self.users.lock().unwrap().retain(|u| u.id != id);
    Ok(())
  }

  async fn status_counts(&self) -> Result<UserStatusCounts, AuthError> {
    let users = self.users.lock().unwrap();
    let mut counts = UserStatusCounts {
      total: users.len() as i64,
      ..Default::default()
    };
    for user in users.iter() {
      match user.status {
        UserStatus::Active => counts.active += 1,
        UserStatus::Restricted => counts.restricted += 1,
        UserStatus::Suspended => counts.suspended += 1,
      }
    }
    Ok(counts)
  }
}

#[derive(Default)]
pub struct FakeCompanyRepository {
  companies: Mutex<Vec<Company>>,
}

impl FakeCompanyRepository {
  pub fn count(&self, user_id: Uuid) -> usize {
    self
      .companies
      .lock()
      .unwrap()
      .iter()
      .filter(|c| c.user_id == user_id)
      .count()
  }
}

#[async_trait]
impl CompanyRepository for FakeCompanyRepository {
  async fn create(&self, company: Company) -> Result<Company, AuthError> {
    self.companies.lock().unwrap().push(company.clone());
    Ok(company)
  }

  async fn count_for_user(&self, user_id: Uuid) -> Result<i64, AuthError> {
    Ok(self.count(user_id) as i64)
  }

  async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Company>, AuthError> {
    Ok(
      self
        .companies
        .lock()
        .unwrap()
        .iter()
        .filter(|c| c.user_id == user_id)
        .cloned()
        .collect(),
    )
  }

  async fn find_by_user_and_name(
    &self,
    user_id: Uuid,
    company_name: &str,
  ) -> Result<Option<Company>, AuthError> {
    Ok(
      self
        .companies
        .lock()
        .unwrap()
        .iter()
        .find(|c| c.user_id == user_id && c.company_name == company_name)
        .cloned(),
    )
  }

  async fn find_owned(
    &self,
    company_id: Uuid,
    user_id: Uuid,
  ) -> Result<Option<Company>, AuthError> {
    Ok(
      self
        .companies
        .lock()
        .unwrap()
        .iter()
        .find(|c| c.id == company_id && c.user_id == user_id)
        .cloned(),
    )
  }
}

#[derive(Default)]
pub struct FakeOtpRepository {
  codes: Mutex<Vec<OtpCode>>,
}

impl FakeOtpRepository {
  pub fn count_for_user(&self, user_id: Uuid) -> usize {
    self
      .codes
      .lock()
      .unwrap()
      .iter()
      .filter(|c| c.user_id == user_id)
      .count()
  }

  pub fn latest_code_for(&self, user_id: Uuid) -> Option<String> {
    self
      .codes
      .lock()
      .unwrap()
      .iter()
      .filter(|c| c.user_id == user_id)
      .max_by_key(|c| c.created_at)
      .map(|c| c.code.clone())
  }

  pub fn expire_all(&self, expires_at: DateTime<Utc>) {
    for code in self.codes.lock().unwrap().iter_mut() {
      code.expires_at = expires_at;
    }
  }
}

#[async_trait]
impl OtpRepository for FakeOtpRepository {
  async fn create(&self, code: OtpCode) -> Result<OtpCode, AuthError> {
    self.codes.lock().unwrap().push(code.clone());
    Ok(code)
  }

  async fn find_actionable(
    &self,
    user_id: Uuid,
    code: &str,
    purpose: OtpPurpose,
  ) -> Result<Option<OtpCode>, AuthError> {
    Ok(
      self
        .codes
        .lock()
        .unwrap()
        .iter()
        .filter(|c| {
          c.user_id == user_id && c.code == code && c.purpose == purpose && c.is_actionable()
        })
        .max_by_key(|c| c.created_at)
        .cloned(),
    )
  }

  async fn mark_verified(&self, id: Uuid) -> Result<(), AuthError> {
    let mut codes = self.codes.lock().unwrap();
    if let Some(code) = codes.iter_mut().find(|c| c.id == id) {
      code.mark_verified();
    }
    Ok(())
  }
}

#[derive(Default)]
pub struct FakeActivityLogRepository {
  entries: Mutex<Vec<ActivityLog>>,
}

impl FakeActivityLogRepository {
  pub fn actions(&self) -> Vec<String> {
    self
      .entries
      .lock()
      .unwrap()
      .iter()
      .map(|e| e.action.clone())
      .collect()
  }
}

#[async_trait]
impl ActivityLogRepository for FakeActivityLogRepository {
  async fn append(&self, log: ActivityLog) -> Result<(), AuthError> {
    self.entries.lock().unwrap().push(log);
    Ok(())
  }

  async fn find_for_user(&self, user_id: Uuid) -> Result<Vec<ActivityLog>, AuthError> {
    let mut entries: Vec<ActivityLog> = self
      .entries
      .lock()
      .unwrap()
      .iter()
      .filter(|e| e.user_id == Some(user_id) || e.target_user_id == Some(user_id))
      .cloned()
      .collect();
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(entries)
  }
}

/// Reversible "hash" so tests can assert on verification without the
/// cost of a real KDF.
pub struct PlainHasher;

#[async_trait]
impl PasswordHasher for PlainHasher {
  async fn hash(&self, password: &Password) -> Result<String, AuthError> {
    Ok(format!("plain:{}", password.as_str()))
  }

  async fn verify(&self, password: &Password, password_hash: &str) -> Result<bool, AuthError> {
    Ok(password_hash == format!("plain:{}", password.as_str()))
  }
}

pub struct StaticTokenIssuer;

impl TokenIssuer for StaticTokenIssuer {
  fn issue(&self, _subject: Uuid) -> Result<String, AuthError> {
    Ok("signed-token".to_string())
  }
}

/// Accepts every dispatch without delivering anything
pub struct NullDispatcher;

#[async_trait]
impl OtpDispatcher for NullDispatcher {
  async fn dispatch(&self, _identifier: &str, _code: &str, _display_name: &str) -> bool {
    true
  }
}
