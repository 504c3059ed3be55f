use std::sync::Arc;
use tracing::warn;

use super::entities::User;
use super::errors::{AuthError, TokenError, ValidationError};
use super::ports::UserRepository;
use super::token::{Claims, TokenService};

/// Authentication orchestrator: persistence lookup, account-state checks,
/// lockout bookkeeping, and token issuance.
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  token_service: Arc<TokenService>,
}

impl AuthService {
  pub fn new(user_repo: Arc<dyn UserRepository>, token_service: Arc<TokenService>) -> Self {
    Self {
      user_repo,
      token_service,
    }
  }

  /// Verifies credentials and issues a token.
  ///
  /// Unknown email, lookup failure, and wrong password all surface as
  /// `InvalidCredentials` so responses cannot be used to enumerate
  /// accounts. Account-state errors (inactive, locked) are distinct and
  /// checked before any password comparison.
  ///
  /// Bookkeeping writes after a FAILED attempt are best-effort: a write
  /// error is logged and the caller still gets the real auth error. The
  /// write after a SUCCESSFUL attempt must land, otherwise the user would
  /// authenticate against stale lockout state, so that failure is surfaced.
  pub async fn authenticate(&self, email: &str, password: &str) -> Result<(User, String), AuthError> {
    if email.is_empty() {
      return Err(
        ValidationError::MissingField {
          field: "email".to_string(),
        }
        .into(),
      );
    }

    if password.is_empty() {
      return Err(
        ValidationError::MissingField {
          field: "password".to_string(),
        }
        .into(),
      );
    }

    let mut user = match self.user_repo.find_by_email(email).await {
      Ok(Some(user)) => user,
      Ok(None) => return Err(AuthError::InvalidCredentials),
      Err(e) => {
        warn!(error = %e, "user lookup failed during login");
        return Err(AuthError::InvalidCredentials);
      }
    };

    if let Err(state_error) = user.can_login() {
      user.record_failed_login();
      self.persist_failed_attempt(&user).await;
      return Err(state_error);
    }

    if !user.verify_password(password) {
      user.record_failed_login();
      self.persist_failed_attempt(&user).await;
      return Err(AuthError::InvalidCredentials);
    }

    user.record_successful_login();
    if let Err(e) = self.user_repo.update(&user).await {
      warn!(error = %e, user_id = %user.id, "failed to persist successful login state");
      return Err(AuthError::LoginUpdateFailed);
    }

    let token = self
      .token_service
      .issue(&user.id.to_string(), user.email_str())
      .map_err(|e| {
        warn!(error = %e, user_id = %user.id, "token issuance failed");
        AuthError::TokenCreationFailed
      })?;

    Ok((user, token))
  }

  /// Validates a token and returns its claims
  pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
    self.token_service.validate(token)
  }

  /// Issues a token for an already-authenticated user
  pub fn create_user_token(&self, user: &User) -> Result<String, AuthError> {
    self
      .token_service
      .issue(&user.id.to_string(), user.email_str())
      .map_err(AuthError::from)
  }

  async fn persist_failed_attempt(&self, user: &User) {
    if let Err(e) = self.user_repo.update(user).await {
      warn!(error = %e, user_id = %user.id, "failed to persist failed-login bookkeeping");
    }
  }
}
