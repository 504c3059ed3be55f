use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;

/// Command for logging in a user
#[derive(Debug, Clone)]
pub struct LoginUserCommand {
  pub email: String,
  pub password: String,
}

/// Response after successful login
#[derive(Debug, Clone)]
pub struct LoginUserResponse {
  pub user_id: Uuid,
  pub email: String,
  pub first_name: String,
  pub last_name: String,
  pub email_verified: bool,
  /// Signed token for subsequent requests
  pub token: String,
}

/// Use case for authenticating a user and issuing a token
pub struct LoginUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LoginUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the login use case. Credential and account-state semantics
  /// live in `AuthService::authenticate`; this layer only shapes the
  /// response.
  pub async fn execute(&self, command: LoginUserCommand) -> Result<LoginUserResponse, AuthError> {
    let (user, token) = self
      .auth_service
      .authenticate(&command.email, &command.password)
      .await?;

    Ok(LoginUserResponse {
      user_id: user.id,
      email: user.email_str().to_string(),
      first_name: user.first_name,
      last_name: user.last_name,
      email_verified: user.email_verified,
      token,
    })
  }
}
