use argon2::password_hash::SaltString;
use argon2::{
  Algorithm, Argon2, Params, Version,
  password_hash::{
    PasswordHash as Argon2PasswordHash, PasswordHasher as Argon2PasswordHasherTrait,
    PasswordVerifier,
  },
};
use async_trait::async_trait;

use crate::domain::auth::errors::{AuthError, HashError};
use crate::domain::auth::ports::PasswordHasher;
use crate::domain::auth::value_objects::Password;

/// Argon2id password hasher implementation
///
/// Uses the Argon2id algorithm with secure parameters:
/// - Memory cost: 19 MiB (19456 KiB)
/// - Time cost: 2 iterations
/// - Parallelism: 1 thread
/// - Algorithm: Argon2id (resistant to both side-channel and GPU attacks)
pub struct Argon2PasswordHasher {
  argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
  /// Creates a new Argon2PasswordHasher with the specified parameters
  pub fn new() -> Result<Self, AuthError> {
    // Memory cost: 19 MiB = 19456 KiB
    let memory_cost = 19456;
    // Time cost: 2 iterations
    let time_cost = 2;
    // Parallelism: 1 thread
    let parallelism = 1;
    // Output length: 32 bytes (default)
    let output_len = Some(32);

    let params = Params::new(memory_cost, time_cost, parallelism, output_len).map_err(|e| {
      AuthError::Hash(HashError::HashingFailed(format!(
        "Failed to create Argon2 params: {}",
        e
      )))
    })?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    Ok(Self { argon2 })
  }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
  /// Hashes a plain text password using Argon2id
  ///
  /// # Returns
  /// * `Ok(String)` - The PHC-format hash string
  /// * `Err(AuthError)` - If hashing fails
  async fn hash(&self, password: &Password) -> Result<String, AuthError> {
    // Generate a random salt using the OS's cryptographically secure RNG
    let salt = SaltString::generate(&mut rand::rngs::OsRng);

    let hash = self
      .argon2
      .hash_password(password.as_str().as_bytes(), &salt)
      .map_err(|e| {
        AuthError::Hash(HashError::HashingFailed(format!(
          "Failed to hash password: {}",
          e
        )))
      })?;

    Ok(hash.to_string())
  }

  /// Verifies a plain text password against a stored hash
  ///
  /// Uses constant-time comparison to prevent timing attacks
  ///
  /// # Returns
  /// * `Ok(true)` - If the password matches
  /// * `Ok(false)` - If the password does not match
  /// * `Err(AuthError)` - If verification fails due to invalid hash format
  async fn verify(&self, password: &Password, password_hash: &str) -> Result<bool, AuthError> {
    // Parse the stored hash
    let parsed_hash = Argon2PasswordHash::new(password_hash).map_err(|e| {
      AuthError::Hash(HashError::VerificationFailed(format!(
        "Invalid hash format: {}",
        e
      )))
    })?;

    // verify_password uses constant-time comparison internally
    match self
      .argon2
      .verify_password(password.as_str().as_bytes(), &parsed_hash)
    {
      Ok(_) => Ok(true),
      Err(argon2::password_hash::Error::Password) => Ok(false),
      Err(e) => Err(AuthError::Hash(HashError::VerificationFailed(format!(
        "Password verification failed: {}",
        e
      )))),
    }
  }
}
