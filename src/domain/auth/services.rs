use rand::Rng;
use std::sync::Arc;
use uuid::Uuid;

use super::entities::{ActivityLog, OtpCode, OtpPurpose, User};
use super::errors::AuthError;
use super::ports::{
  ActivityLogRepository, OtpDispatcher, OtpRepository, PasswordHasher, TokenIssuer, UserRepository,
};
use super::value_objects::{Channel, Identifier, Password};
use crate::domain::company::{Company, CompanyRepository, MAX_COMPANIES_PER_USER};

/// Best-effort audit writer. Failures are logged and discarded so an
/// audit outage never fails the operation being audited.
pub struct ActivityRecorder {
  log_repo: Arc<dyn ActivityLogRepository>,
}

impl ActivityRecorder {
  pub fn new(log_repo: Arc<dyn ActivityLogRepository>) -> Self {
    Self { log_repo }
  }

  /// Appends an audit entry, swallowing any write error
  pub async fn record(
    &self,
    action: &str,
    details: &str,
    user_id: Option<Uuid>,
    target_user_id: Option<Uuid>,
    ip: Option<String>,
  ) {
    let entry = ActivityLog::new(
      action,
      Some(details.to_string()),
      user_id,
      target_user_id,
      ip,
    );
    if let Err(e) = self.log_repo.append(entry).await {
      tracing::debug!(action, "failed to write activity log: {}", e);
    }
  }
}

/// The OTP engine: generates, persists, validates and consumes codes.
///
/// Delivery is fire-and-forget: the dispatch task is spawned after the
/// row is persisted and its outcome is never observed by the caller.
pub struct OtpService {
  otp_repo: Arc<dyn OtpRepository>,
  dispatcher: Arc<dyn OtpDispatcher>,
}

impl OtpService {
  pub fn new(otp_repo: Arc<dyn OtpRepository>, dispatcher: Arc<dyn OtpDispatcher>) -> Self {
    Self {
      otp_repo,
      dispatcher,
    }
  }

  /// Issues a fresh 6-digit code bound to the identifier and schedules
  /// asynchronous delivery. Outstanding older codes are not invalidated.
  pub async fn issue(
    &self,
    user_id: Uuid,
    identifier: &Identifier,
    display_name: &str,
    purpose: OtpPurpose,
  ) -> Result<OtpCode, AuthError> {
    let code = generate_code();
    let entry = OtpCode::new(user_id, identifier.as_str().to_string(), code, purpose);
    let created = self.otp_repo.create(entry).await?;

    let dispatcher = self.dispatcher.clone();
    let target = identifier.as_str().to_string();
    let masked = identifier.masked();
    let otp = created.code.clone();
    let name = display_name.to_string();
    tokio::spawn(async move {
      if !dispatcher.dispatch(&target, &otp, &name).await {
        tracing::warn!("OTP dispatch failed for {}", masked);
      }
    });

    Ok(created)
  }

  /// Validates and consumes the newest matching code. Not idempotent:
  /// the verified flag guards against replay, so a second call with the
  /// same code fails.
  pub async fn verify(
    &self,
    user_id: Uuid,
    code: &str,
    purpose: OtpPurpose,
  ) -> Result<OtpCode, AuthError> {
    let mut record = self
      .otp_repo
      .find_actionable(user_id, code, purpose)
      .await?
      .ok_or(AuthError::InvalidOrExpiredOtp)?;

    self.otp_repo.mark_verified(record.id).await?;
    record.mark_verified();
    Ok(record)
  }
}

/// Uniform 6-digit decimal code
fn generate_code() -> String {
  rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

/// Outcome of a successful credential check during login
#[derive(Debug, Clone)]
pub enum LoginOutcome {
  /// Exactly one company: an OTP is already on its way
  OtpSent {
    user_id: Uuid,
    company_id: Uuid,
    channel: Channel,
    masked_identifier: String,
  },
  /// Multiple companies: the client must pick one and request an OTP
  SelectCompany {
    user_id: Uuid,
    companies: Vec<Company>,
  },
}

/// Result of an explicit OTP (re-)request
#[derive(Debug, Clone)]
pub struct OtpRequested {
  pub channel: Channel,
  pub masked_identifier: String,
}

/// Authentication service orchestrating the registration, login and
/// password-reset flows over the persistence and crypto ports.
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  company_repo: Arc<dyn CompanyRepository>,
  otp_service: Arc<OtpService>,
  password_hasher: Arc<dyn PasswordHasher>,
  token_issuer: Arc<dyn TokenIssuer>,
  activity: ActivityRecorder,
}

impl AuthService {
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    company_repo: Arc<dyn CompanyRepository>,
    otp_service: Arc<OtpService>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_issuer: Arc<dyn TokenIssuer>,
    log_repo: Arc<dyn ActivityLogRepository>,
  ) -> Self {
    Self {
      user_repo,
      company_repo,
      otp_service,
      password_hasher,
      token_issuer,
      activity: ActivityRecorder::new(log_repo),
    }
  }

  /// Registers a user/company pair.
  ///
  /// An existing (email, phone) identity gets the company attached,
  /// subject to the per-user cap and the duplicate-name rule. A new
  /// identity must not collide with either identifier individually.
  /// Registration never logs the caller in.
  ///
  /// # Errors
  /// `PasswordTooLong`, `CompanyLimitReached`, `DuplicateCompany`,
  /// `IdentifierConflict`
  pub async fn register(
    &self,
    full_name: String,
    email: String,
    phone: String,
    company_name: String,
    password: Password,
    ip: Option<String>,
  ) -> Result<(), AuthError> {
    let existing = self
      .user_repo
      .find_by_email_and_phone(&email, &phone)
      .await?;

    let user_id = match existing {
      Some(user) => {
        let count = self.company_repo.count_for_user(user.id).await?;
        if count >= MAX_COMPANIES_PER_USER {
          return Err(AuthError::CompanyLimitReached);
        }

        if self
          .company_repo
          .find_by_user_and_name(user.id, &company_name)
          .await?
          .is_some()
        {
          return Err(AuthError::DuplicateCompany);
        }

        user.id
      }
      None => {
        // One identity must own both identifiers; a partial match means
        // the email or phone already belongs to someone else.
        if self
          .user_repo
          .find_by_email_or_phone(&email, &phone)
          .await?
          .is_some()
        {
          return Err(AuthError::IdentifierConflict);
        }

        let password_hash = self.password_hasher.hash(&password).await?;
        let user = User::new(full_name, email.clone(), phone.clone(), password_hash);
        let created = self.user_repo.create(user).await?;

        self
          .activity
          .record(
            "REGISTER",
            "New user registration",
            Some(created.id),
            None,
            ip.clone(),
          )
          .await;

        created.id
      }
    };

    let company = Company::new(user_id, company_name, email, phone);
    self.company_repo.create(company).await?;

    Ok(())
  }

  /// Checks credentials and begins the OTP step of the login flow.
  ///
  /// # Errors
  /// `InvalidCredentials` uniformly on unknown identifier or password
  /// mismatch; `AccountNotActive` (audited as `LOGIN_DENIED`);
  /// `NoCompanyFound`
  pub async fn login(
    &self,
    identifier: Identifier,
    password: Password,
    ip: Option<String>,
  ) -> Result<LoginOutcome, AuthError> {
    let user = self
      .user_repo
      .find_by_identifier(&identifier)
      .await?
      .ok_or(AuthError::InvalidCredentials)?;

    if !self
      .password_hasher
      .verify(&password, &user.password_hash)
      .await?
    {
      return Err(AuthError::InvalidCredentials);
    }

    if !user.is_active() {
      self
        .activity
        .record(
          "LOGIN_DENIED",
          &format!("Status: {}", user.status),
          Some(user.id),
          None,
          ip,
        )
        .await;
      return Err(AuthError::AccountNotActive {
        status: user.status,
      });
    }

    let companies = self.company_repo.find_by_user(user.id).await?;
    if companies.is_empty() {
      return Err(AuthError::NoCompanyFound);
    }

    if companies.len() == 1 {
      self
        .otp_service
        .issue(user.id, &identifier, &user.full_name, OtpPurpose::Login)
        .await?;

      self
        .activity
        .record("LOGIN_ATTEMPT", "OTP sent", Some(user.id), None, ip)
        .await;

      return Ok(LoginOutcome::OtpSent {
        user_id: user.id,
        company_id: companies[0].id,
        channel: identifier.channel(),
        masked_identifier: identifier.masked(),
      });
    }

    Ok(LoginOutcome::SelectCompany {
      user_id: user.id,
      companies,
    })
  }

  /// Explicit OTP request after company selection (and resends).
  ///
  /// # Errors
  /// `CompanyOwnershipMismatch`, `AccountNotFound`, `AccountNotActive`
  pub async fn request_otp(
    &self,
    user_id: Uuid,
    company_id: Uuid,
    identifier: Identifier,
    ip: Option<String>,
  ) -> Result<OtpRequested, AuthError> {
    if self
      .company_repo
      .find_owned(company_id, user_id)
      .await?
      .is_none()
    {
      return Err(AuthError::CompanyOwnershipMismatch);
    }

    let user = self
      .user_repo
      .find_by_id(user_id)
      .await?
      .ok_or(AuthError::AccountNotFound)?;

    if !user.is_active() {
      return Err(AuthError::AccountNotActive {
        status: user.status,
      });
    }

    self
      .otp_service
      .issue(user.id, &identifier, &user.full_name, OtpPurpose::Login)
      .await?;

    self
      .activity
      .record(
        "OTP_RESEND",
        "OTP requested manually",
        Some(user.id),
        None,
        ip,
      )
      .await;

    Ok(OtpRequested {
      channel: identifier.channel(),
      masked_identifier: identifier.masked(),
    })
  }

  /// Consumes a login OTP and mints the session token.
  ///
  /// # Errors
  /// `InvalidOrExpiredOtp`
  pub async fn verify_login_otp(
    &self,
    user_id: Uuid,
    code: &str,
    ip: Option<String>,
  ) -> Result<String, AuthError> {
    self
      .otp_service
      .verify(user_id, code, OtpPurpose::Login)
      .await?;

    let token = self.token_issuer.issue(user_id)?;

    self
      .activity
      .record("LOGIN_SUCCESS", "User verified OTP", Some(user_id), None, ip)
      .await;

    Ok(token)
  }

  /// Password reset step 1: resolve the account by the chosen contact
  /// method and send a reset OTP. Returns the masked contact.
  ///
  /// # Errors
  /// `AccountNotFound`
  pub async fn reset_initiate(
    &self,
    contact: Identifier,
    method: Channel,
    ip: Option<String>,
  ) -> Result<String, AuthError> {
    let user = match method {
      Channel::Email => self.user_repo.find_by_email(contact.as_str()).await?,
      Channel::Sms => self.user_repo.find_by_phone(contact.as_str()).await?,
    }
    .ok_or(AuthError::AccountNotFound)?;

    self
      .otp_service
      .issue(
        user.id,
        &contact,
        &user.full_name,
        OtpPurpose::PasswordReset,
      )
      .await?;

    self
      .activity
      .record(
        "PWD_RESET_INIT",
        "Password reset started",
        Some(user.id),
        None,
        ip,
      )
      .await;

    Ok(contact.masked())
  }

  /// Password reset step 2: consume the reset OTP.
  ///
  /// # Errors
  /// `AccountNotFound`, `InvalidOrExpiredOtp`
  pub async fn reset_verify(&self, contact: Identifier, code: &str) -> Result<(), AuthError> {
    let user = self
      .user_repo
      .find_by_identifier(&contact)
      .await?
      .ok_or(AuthError::AccountNotFound)?;

    self
      .otp_service
      .verify(user.id, code, OtpPurpose::PasswordReset)
      .await?;

    Ok(())
  }

  /// Password reset step 3: list the account's companies for selection.
  ///
  /// # Errors
  /// `AccountNotFound`
  pub async fn reset_companies(&self, contact: Identifier) -> Result<Vec<Company>, AuthError> {
    let user = self
      .user_repo
      .find_by_identifier(&contact)
      .await?
      .ok_or(AuthError::AccountNotFound)?;

    self.company_repo.find_by_user(user.id).await
  }

  /// Password reset step 4: overwrite the password hash.
  ///
  /// The step carries no server-held proof that step 2 ran; the OTP row
  /// is the only reset state and it is not re-checked here.
  ///
  /// # Errors
  /// `PasswordTooLong`, `AccountNotFound`, `CompanyOwnershipMismatch`
  pub async fn reset_commit(
    &self,
    contact: Identifier,
    company_id: Uuid,
    new_password: Password,
    ip: Option<String>,
  ) -> Result<(), AuthError> {
    let user = self
      .user_repo
      .find_by_identifier(&contact)
      .await?
      .ok_or(AuthError::AccountNotFound)?;

    if self
      .company_repo
      .find_owned(company_id, user.id)
      .await?
      .is_none()
    {
      return Err(AuthError::CompanyOwnershipMismatch);
    }

    let password_hash = self.password_hasher.hash(&new_password).await?;
    self
      .user_repo
      .update_password(user.id, &password_hash)
      .await?;

    self
      .activity
      .record(
        "PWD_RESET_COMPLETE",
        "Password changed successfully",
        Some(user.id),
        None,
        ip,
      )
      .await;

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::entities::UserStatus;
  use crate::domain::auth::test_support::{
    FakeActivityLogRepository, FakeCompanyRepository, FakeOtpRepository, FakeUserRepository,
    NullDispatcher, PlainHasher, StaticTokenIssuer,
  };
  use chrono::{Duration, Utc};

  struct Fixture {
    service: AuthService,
    users: Arc<FakeUserRepository>,
    companies: Arc<FakeCompanyRepository>,
    otps: Arc<FakeOtpRepository>,
    logs: Arc<FakeActivityLogRepository>,
  }

  fn fixture() -> Fixture {
    let users = Arc::new(FakeUserRepository::default());
    let companies = Arc::new(FakeCompanyRepository::default());
    let otps = Arc::new(FakeOtpRepository::default());
    let logs = Arc::new(FakeActivityLogRepository::default());

    let otp_service = Arc::new(OtpService::new(
      otps.clone(),
      Arc::new(NullDispatcher),
    ));
    let service = AuthService::new(
      users.clone(),
      companies.clone(),
      otp_service,
      Arc::new(PlainHasher),
      Arc::new(StaticTokenIssuer),
      logs.clone(),
    );

    Fixture {
      service,
      users,
      companies,
      otps,
      logs,
    }
  }

  async fn register_default(fx: &Fixture, company: &str) -> Result<(), AuthError> {
    fx.service
      .register(
        "Test User".to_string(),
        "test@example.com".to_string(),
        "01712345678".to_string(),
        company.to_string(),
        Password::new("secret123").unwrap(),
        None,
      )
      .await
  }

  #[tokio::test]
  async fn test_register_creates_user_and_company() {
    let fx = fixture();

    register_default(&fx, "Acme Trading").await.unwrap();

    let user = fx
      .users
      .get_by_email("test@example.com")
      .expect("user created");
    assert_eq!(fx.companies.count(user.id), 1);
    assert_eq!(fx.logs.actions(), vec!["REGISTER".to_string()]);
  }

  #[tokio::test]
  async fn test_register_same_pair_attaches_second_company() {
    let fx = fixture();

    register_default(&fx, "Acme Trading").await.unwrap();
    register_default(&fx, "Acme Exports").await.unwrap();

    let user = fx.users.get_by_email("test@example.com").unwrap();
    assert_eq!(fx.users.len(), 1);
    assert_eq!(fx.companies.count(user.id), 2);
    // REGISTER is only audited for the first (user-creating) call
    assert_eq!(fx.logs.actions(), vec!["REGISTER".to_string()]);
  }

  #[tokio::test]
  async fn test_register_duplicate_company_name_rejected() {
    let fx = fixture();

    register_default(&fx, "Acme Trading").await.unwrap();
    let err = register_default(&fx, "Acme Trading").await.unwrap_err();

    assert!(matches!(err, AuthError::DuplicateCompany));
  }

  #[tokio::test]
  async fn test_register_company_limit() {
    let fx = fixture();

    for i in 0..10 {
      register_default(&fx, &format!("Company {}", i)).await.unwrap();
    }
    let err = register_default(&fx, "Company 10").await.unwrap_err();

    assert!(matches!(err, AuthError::CompanyLimitReached));
  }

  #[tokio::test]
  async fn test_register_identifier_conflict() {
    let fx = fixture();

    register_default(&fx, "Acme Trading").await.unwrap();

    // Same email, different phone: identity would be split in two
    let err = fx
      .service
      .register(
        "Other User".to_string(),
        "test@example.com".to_string(),
        "01898765432".to_string(),
        "Other Co".to_string(),
        Password::new("secret123").unwrap(),
        None,
      )
      .await
      .unwrap_err();

    assert!(matches!(err, AuthError::IdentifierConflict));
  }

  #[tokio::test]
  async fn test_duplicate_company_name_across_users_allowed() {
    let fx = fixture();

    register_default(&fx, "Acme Trading").await.unwrap();
    fx.service
      .register(
        "Other User".to_string(),
        "other@example.com".to_string(),
        "01898765432".to_string(),
        "Acme Trading".to_string(),
        Password::new("secret123").unwrap(),
        None,
      )
      .await
      .unwrap();

    assert_eq!(fx.users.len(), 2);
  }

  #[tokio::test]
  async fn test_login_unknown_identifier_is_invalid_credentials() {
    let fx = fixture();

    let err = fx
      .service
      .login(
        Identifier::new("ghost@example.com").unwrap(),
        Password::new("whatever1").unwrap(),
        None,
      )
      .await
      .unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials));
  }

  #[tokio::test]
  async fn test_login_wrong_password_is_invalid_credentials() {
    let fx = fixture();
    register_default(&fx, "Acme Trading").await.unwrap();

    let err = fx
      .service
      .login(
        Identifier::new("test@example.com").unwrap(),
        Password::new("not-the-password").unwrap(),
        None,
      )
      .await
      .unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials));
  }

  #[tokio::test]
  async fn test_login_restricted_account_denied_and_audited() {
    let fx = fixture();
    register_default(&fx, "Acme Trading").await.unwrap();

    let user = fx.users.get_by_email("test@example.com").unwrap();
    fx.users.set_status(user.id, UserStatus::Restricted);

    let err = fx
      .service
      .login(
        Identifier::new("test@example.com").unwrap(),
        Password::new("secret123").unwrap(),
        None,
      )
      .await
      .unwrap_err();

    assert!(matches!(
      err,
      AuthError::AccountNotActive {
        status: UserStatus::Restricted
      }
    ));
    assert_eq!(
      fx.logs
        .actions()
        .iter()
        .filter(|a| a.as_str() == "LOGIN_DENIED")
        .count(),
      1
    );
  }

  #[tokio::test]
  async fn test_login_single_company_sends_otp() {
    let fx = fixture();
    register_default(&fx, "Acme Trading").await.unwrap();

    let outcome = fx
      .service
      .login(
        Identifier::new("test@example.com").unwrap(),
        Password::new("secret123").unwrap(),
        None,
      )
      .await
      .unwrap();

    match outcome {
      LoginOutcome::OtpSent {
        channel,
        masked_identifier,
        ..
      } => {
        assert_eq!(channel, Channel::Email);
        assert_eq!(masked_identifier, "tes***@example.com");
      }
      other => panic!("expected OtpSent, got {:?}", other),
    }

    let user = fx.users.get_by_email("test@example.com").unwrap();
    assert_eq!(fx.otps.count_for_user(user.id), 1);
    assert!(fx.logs.actions().contains(&"LOGIN_ATTEMPT".to_string()));
  }

  #[tokio::test]
  async fn test_login_multiple_companies_requires_selection() {
    let fx = fixture();
    register_default(&fx, "Acme Trading").await.unwrap();
    register_default(&fx, "Acme Exports").await.unwrap();

    let outcome = fx
      .service
      .login(
        Identifier::new("01712345678").unwrap(),
        Password::new("secret123").unwrap(),
        None,
      )
      .await
      .unwrap();

    match outcome {
      LoginOutcome::SelectCompany { companies, .. } => assert_eq!(companies.len(), 2),
      other => panic!("expected SelectCompany, got {:?}", other),
    }

    // No OTP until the client picks a company
    let user = fx.users.get_by_email("test@example.com").unwrap();
    assert_eq!(fx.otps.count_for_user(user.id), 0);
  }

  #[tokio::test]
  async fn test_login_without_company_fails() {
    let fx = fixture();

    // Create the user directly, bypassing registration's company step
    let user = User::new(
      "Lonely User".to_string(),
      "lonely@example.com".to_string(),
      "01700000000".to_string(),
      "plain:secret123".to_string(),
    );
    fx.users.insert(user);

    let err = fx
      .service
      .login(
        Identifier::new("lonely@example.com").unwrap(),
        Password::new("secret123").unwrap(),
        None,
      )
      .await
      .unwrap_err();

    assert!(matches!(err, AuthError::NoCompanyFound));
  }

  #[tokio::test]
  async fn test_request_otp_checks_ownership() {
    let fx = fixture();
    register_default(&fx, "Acme Trading").await.unwrap();
    let user = fx.users.get_by_email("test@example.com").unwrap();

    let err = fx
      .service
      .request_otp(
        user.id,
        Uuid::new_v4(),
        Identifier::new("test@example.com").unwrap(),
        None,
      )
      .await
      .unwrap_err();

    assert!(matches!(err, AuthError::CompanyOwnershipMismatch));
  }

  #[tokio::test]
  async fn test_verify_login_otp_issues_token_and_resists_replay() {
    let fx = fixture();
    register_default(&fx, "Acme Trading").await.unwrap();
    let user = fx.users.get_by_email("test@example.com").unwrap();

    fx.service
      .login(
        Identifier::new("test@example.com").unwrap(),
        Password::new("secret123").unwrap(),
        None,
      )
      .await
      .unwrap();

    let code = fx.otps.latest_code_for(user.id).unwrap();

    let token = fx
      .service
      .verify_login_otp(user.id, &code, None)
      .await
      .unwrap();
    assert_eq!(token, "signed-token");
    assert!(fx.logs.actions().contains(&"LOGIN_SUCCESS".to_string()));

    // Replay with the same code fails: the row is consumed
    let err = fx
      .service
      .verify_login_otp(user.id, &code, None)
      .await
      .unwrap_err();
    assert!(matches!(err, AuthError::InvalidOrExpiredOtp));
  }

  #[tokio::test]
  async fn test_verify_login_otp_rejects_expired() {
    let fx = fixture();
    register_default(&fx, "Acme Trading").await.unwrap();
    let user = fx.users.get_by_email("test@example.com").unwrap();

    fx.service
      .login(
        Identifier::new("test@example.com").unwrap(),
        Password::new("secret123").unwrap(),
        None,
      )
      .await
      .unwrap();

    let code = fx.otps.latest_code_for(user.id).unwrap();
    fx.otps.expire_all(Utc::now() - Duration::seconds(1));

    let err = fx
      .service
      .verify_login_otp(user.id, &code, None)
      .await
      .unwrap_err();
    assert!(matches!(err, AuthError::InvalidOrExpiredOtp));
  }

  #[tokio::test]
  async fn test_reset_flow_end_to_end() {
    let fx = fixture();
    register_default(&fx, "Acme Trading").await.unwrap();
    let user = fx.users.get_by_email("test@example.com").unwrap();
    let contact = Identifier::new("test@example.com").unwrap();

    // Step 1
    let masked = fx
      .service
      .reset_initiate(contact.clone(), Channel::Email, None)
      .await
      .unwrap();
    assert_eq!(masked, "tes***@example.com");
    assert!(fx.logs.actions().contains(&"PWD_RESET_INIT".to_string()));

    // Step 2
    let code = fx.otps.latest_code_for(user.id).unwrap();
    fx.service
      .reset_verify(contact.clone(), &code)
      .await
      .unwrap();

    // Step 3
    let companies = fx.service.reset_companies(contact.clone()).await.unwrap();
    assert_eq!(companies.len(), 1);

    // Step 4
    fx.service
      .reset_commit(
        contact.clone(),
        companies[0].id,
        Password::new("brand-new-pw").unwrap(),
        None,
      )
      .await
      .unwrap();
    assert!(
      fx.logs
        .actions()
        .contains(&"PWD_RESET_COMPLETE".to_string())
    );

    // Old password no longer works, new one does
    let err = fx
      .service
      .login(contact.clone(), Password::new("secret123").unwrap(), None)
      .await
      .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));

    fx.service
      .login(contact, Password::new("brand-new-pw").unwrap(), None)
      .await
      .unwrap();
  }

  #[tokio::test]
  async fn test_reset_initiate_unknown_contact() {
    let fx = fixture();

    let err = fx
      .service
      .reset_initiate(
        Identifier::new("ghost@example.com").unwrap(),
        Channel::Email,
        None,
      )
      .await
      .unwrap_err();

    assert!(matches!(err, AuthError::AccountNotFound));
  }

  #[tokio::test]
  async fn test_reset_commit_wrong_company() {
    let fx = fixture();
    register_default(&fx, "Acme Trading").await.unwrap();

    let err = fx
      .service
      .reset_commit(
        Identifier::new("test@example.com").unwrap(),
        Uuid::new_v4(),
        Password::new("brand-new-pw").unwrap(),
        None,
      )
      .await
      .unwrap_err();

    assert!(matches!(err, AuthError::CompanyOwnershipMismatch));
  }

  #[tokio::test]
  async fn test_otp_purposes_do_not_cross() {
    let fx = fixture();
    register_default(&fx, "Acme Trading").await.unwrap();
    let user = fx.users.get_by_email("test@example.com").unwrap();
    let contact = Identifier::new("test@example.com").unwrap();

    // Issue a reset OTP, then try to consume it as a login OTP
    fx.service
      .reset_initiate(contact, Channel::Email, None)
      .await
      .unwrap();
    let code = fx.otps.latest_code_for(user.id).unwrap();

    let err = fx
      .service
      .verify_login_otp(user.id, &code, None)
      .await
      .unwrap_err();
    assert!(matches!(err, AuthError::InvalidOrExpiredOtp));
  }
}
