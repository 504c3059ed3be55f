use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::errors::{AuthError, HashError, ValidationError};
use super::value_objects::{Email, Password, PasswordPolicy};

/// Consecutive failures that trigger a lockout
pub const MAX_FAILED_LOGIN_ATTEMPTS: u32 = 5;
/// How long a triggered lockout lasts
pub const LOCKOUT_DURATION_MINUTES: i64 = 30;

/// User aggregate: identity, credential, and account-security state.
///
/// The password field holds plaintext between construction and
/// `hash_password`, and the bcrypt hash from then on (and always after
/// reconstruction from storage).
#[derive(Debug, Clone)]
pub struct User {
  pub id: Uuid,
  pub email: Email,
  pub password: Password,
  pub first_name: String,
  pub last_name: String,
  pub is_active: bool,
  pub email_verified: bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub last_login_at: Option<DateTime<Utc>>,
  pub failed_login_attempts: u32,
  pub locked_until: Option<DateTime<Utc>>,
}

impl User {
  /// Creates a new user from raw registration input, validating email and
  /// password with the default policy.
  pub fn new(
    email: impl Into<String>,
    password: impl Into<String>,
    first_name: impl Into<String>,
    last_name: impl Into<String>,
  ) -> Result<Self, ValidationError> {
    Self::with_policy(email, password, first_name, last_name, &PasswordPolicy::default())
  }

  /// Creates a new user with an injected password policy
  pub fn with_policy(
    email: impl Into<String>,
    password: impl Into<String>,
    first_name: impl Into<String>,
    last_name: impl Into<String>,
    policy: &PasswordPolicy,
  ) -> Result<Self, ValidationError> {
    let email = Email::new(email)?;
    let password = Password::with_policy(password, policy)?;

    let now = Utc::now();
    Ok(Self {
      id: Uuid::new_v4(),
      email,
      password,
      first_name: first_name.into(),
      last_name: last_name.into(),
      is_active: true,
      email_verified: false,
      created_at: now,
      updated_at: now,
      last_login_at: None,
      failed_login_attempts: 0,
      locked_until: None,
    })
  }

  /// Reconstructs a user from stored fields without validation
  #[allow(clippy::too_many_arguments)]
  pub fn from_db(
    id: Uuid,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    is_active: bool,
    email_verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    last_login_at: Option<DateTime<Utc>>,
    locked_until: Option<DateTime<Utc>>,
    failed_login_attempts: u32,
  ) -> Self {
    Self {
      id,
      email: Email::new_unchecked(email),
      password: Password::from_hash(password_hash),
      first_name,
      last_name,
      is_active,
      email_verified,
      created_at,
      updated_at,
      last_login_at,
      locked_until,
      failed_login_attempts,
    }
  }

  /// Returns the email as a string slice
  pub fn email_str(&self) -> &str {
    self.email.as_str()
  }

  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }

  /// Replaces the email after validation; the new address needs verifying.
  pub fn change_email(&mut self, new_email: impl Into<String>) -> Result<(), ValidationError> {
    self.email = Email::new(new_email)?;
    self.email_verified = false;
    self.updated_at = Utc::now();
    Ok(())
  }

  /// Replaces the password after validation against the default policy.
  /// The new value is plaintext until `hash_password` runs.
  pub fn change_password(&mut self, new_password: impl Into<String>) -> Result<(), ValidationError> {
    self.change_password_with_policy(new_password, &PasswordPolicy::default())
  }

  /// Replaces the password after validation against an injected policy, so
  /// deployments running a non-default policy apply the same rules on
  /// change as on registration.
  pub fn change_password_with_policy(
    &mut self,
    new_password: impl Into<String>,
    policy: &PasswordPolicy,
  ) -> Result<(), ValidationError> {
    self.password = Password::with_policy(new_password, policy)?;
    self.updated_at = Utc::now();
    Ok(())
  }

  /// Swaps the in-memory password for its bcrypt hash
  pub fn hash_password(&mut self) -> Result<(), AuthError> {
    if self.password.is_empty() {
      return Err(AuthError::Hash(HashError::NoPasswordSet));
    }

    let hash = self.password.hash()?;
    self.password = Password::from_hash(hash);
    Ok(())
  }

  /// Checks a plaintext candidate against the stored password hash
  pub fn verify_password(&self, plaintext: &str) -> bool {
    Password::new_unchecked(plaintext).matches_hash(self.password.value())
  }

  /// Resets lockout bookkeeping after a successful authentication
  pub fn record_successful_login(&mut self) {
    let now = Utc::now();
    self.last_login_at = Some(now);
    self.failed_login_attempts = 0;
    self.locked_until = None;
    self.updated_at = now;
  }

  /// Counts a failed authentication; the fifth consecutive failure locks
  /// the account for thirty minutes.
  pub fn record_failed_login(&mut self) {
    self.failed_login_attempts += 1;
    self.updated_at = Utc::now();

    if self.failed_login_attempts >= MAX_FAILED_LOGIN_ATTEMPTS {
      self.locked_until = Some(Utc::now() + Duration::minutes(LOCKOUT_DURATION_MINUTES));
    }
  }

  /// True while a lockout timestamp is set and still in the future.
  /// Expiry alone does not reset the failure counter; only a successful
  /// login or a manual unlock does.
  pub fn is_locked(&self) -> bool {
    match self.locked_until {
      Some(until) => Utc::now() < until,
      None => false,
    }
  }

  /// Operator-initiated unlock: clears the lock and the counter
  pub fn unlock(&mut self) {
    self.locked_until = None;
    self.failed_login_attempts = 0;
    self.updated_at = Utc::now();
  }

  pub fn activate(&mut self) {
    self.is_active = true;
    self.updated_at = Utc::now();
  }

  pub fn deactivate(&mut self) {
    self.is_active = false;
    self.updated_at = Utc::now();
  }

  pub fn verify_email(&mut self) {
    self.email_verified = true;
    self.updated_at = Utc::now();
  }

  /// Account-state gate checked before any password comparison
  pub fn can_login(&self) -> Result<(), AuthError> {
    if !self.is_active {
      return Err(AuthError::AccountInactive);
    }

    if self.is_locked() {
      return Err(AuthError::AccountLocked);
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::errors::ValidationError;

  fn test_user() -> User {
    User::new("new@user.com", "Str0ng!Pass", "Jane", "Doe").unwrap()
  }

  #[test]
  fn test_new_user_defaults() {
    let user = test_user();

    assert_eq!(user.email_str(), "new@user.com");
    assert_eq!(user.full_name(), "Jane Doe");
    assert!(user.is_active);
    assert!(!user.email_verified);
    assert_eq!(user.failed_login_attempts, 0);
    assert!(user.last_login_at.is_none());
    assert!(user.locked_until.is_none());
    assert_eq!(user.created_at, user.updated_at);
  }

  #[test]
  fn test_new_user_rejects_invalid_input() {
    assert!(matches!(
      User::new("not-an-email", "Str0ng!Pass", "Jane", "Doe"),
      Err(ValidationError::EmailInvalidFormat)
    ));
    assert!(matches!(
      User::new("new@user.com", "weak", "Jane", "Doe"),
      Err(ValidationError::PasswordTooShort { .. })
    ));
  }

  #[test]
  fn test_round_trip_through_storage() {
    let mut user = test_user();
    user.password = Password::from_hash(user.password.hash_with_cost(4).unwrap());

    let restored = User::from_db(
      user.id,
      user.email_str().to_string(),
      user.password.value().to_string(),
      user.first_name.clone(),
      user.last_name.clone(),
      user.is_active,
      user.email_verified,
      user.created_at,
      user.updated_at,
      user.last_login_at,
      user.locked_until,
      user.failed_login_attempts,
    );

    assert_eq!(restored.id, user.id);
    assert_eq!(restored.email_str(), user.email_str());
    assert_eq!(restored.first_name, user.first_name);
    assert_eq!(restored.last_name, user.last_name);
    assert_eq!(restored.is_active, user.is_active);
    assert_eq!(restored.email_verified, user.email_verified);
    assert_eq!(restored.failed_login_attempts, user.failed_login_attempts);
  }

  #[test]
  fn test_lockout_after_five_failures() {
    let mut user = test_user();

    for _ in 0..4 {
      user.record_failed_login();
    }
    assert_eq!(user.failed_login_attempts, 4);
    assert!(!user.is_locked());
    assert!(user.can_login().is_ok());

    user.record_failed_login();
    assert_eq!(user.failed_login_attempts, 5);
    assert!(user.is_locked());

    let locked_until = user.locked_until.expect("lock timestamp set");
    let expected = Utc::now() + Duration::minutes(LOCKOUT_DURATION_MINUTES);
    assert!((expected - locked_until).num_seconds().abs() < 5);

    assert!(matches!(user.can_login(), Err(AuthError::AccountLocked)));
  }

  #[test]
  fn test_successful_login_resets_lockout() {
    let mut user = test_user();
    for _ in 0..5 {
      user.record_failed_login();
    }
    assert!(user.is_locked());

    user.record_successful_login();
    assert!(!user.is_locked());
    assert_eq!(user.failed_login_attempts, 0);
    assert!(user.locked_until.is_none());
    assert!(user.last_login_at.is_some());
  }

  #[test]
  fn test_expired_lock_clears_is_locked_but_not_counter() {
    let mut user = test_user();
    user.failed_login_attempts = 5;
    user.locked_until = Some(Utc::now() - Duration::seconds(1));

    assert!(!user.is_locked());
    assert!(user.can_login().is_ok());
    // The counter only resets on success or manual unlock.
    assert_eq!(user.failed_login_attempts, 5);
  }

  #[test]
  fn test_manual_unlock_resets_counter() {
    let mut user = test_user();
    for _ in 0..5 {
      user.record_failed_login();
    }

    user.unlock();
    assert!(!user.is_locked());
    assert_eq!(user.failed_login_attempts, 0);
  }

  #[test]
  fn test_inactive_account_cannot_login() {
    let mut user = test_user();
    user.deactivate();

    assert!(matches!(user.can_login(), Err(AuthError::AccountInactive)));

    user.activate();
    assert!(user.can_login().is_ok());
  }

  #[test]
  fn test_change_email_clears_verified_flag() {
    let mut user = test_user();
    user.verify_email();
    assert!(user.email_verified);

    user.change_email("other@user.com").unwrap();
    assert_eq!(user.email_str(), "other@user.com");
    assert!(!user.email_verified);

    // A rejected change leaves the current state untouched.
    assert!(user.change_email("bad").is_err());
    assert_eq!(user.email_str(), "other@user.com");
  }

  #[test]
  fn test_change_password_revalidates() {
    let mut user = test_user();
    assert!(user.change_password("weak").is_err());
    assert!(user.change_password("An0ther!Pass").is_ok());
  }

  #[test]
  fn test_change_password_applies_injected_policy() {
    let policy = PasswordPolicy {
      max_length: 60,
      ..PasswordPolicy::default()
    };
    let mut user = test_user();

    // 64 characters: fine under the default policy, over the 60-char variant.
    let long = format!("Ab1!{}", "x".repeat(60));
    assert_eq!(
      user.change_password_with_policy(&long, &policy).unwrap_err(),
      ValidationError::PasswordTooLong { max: 60 }
    );
    assert!(user.change_password(&long).is_ok());
  }

  #[test]
  fn test_hash_password_and_verify() {
    let mut user = test_user();
    let plaintext = "Str0ng!Pass";

    user.hash_password().unwrap();
    assert_ne!(user.password.value(), plaintext);
    assert!(user.password.value().starts_with("$2"));

    assert!(user.verify_password(plaintext));
    assert!(!user.verify_password("Wr0ng!Pass"));
  }
}
