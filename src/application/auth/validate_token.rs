use std::sync::Arc;
use tracing::debug;

use crate::domain::auth::services::AuthService;

/// Response describing a token's validity.
///
/// Invalid tokens are not an error at this layer: callers asked "is this
/// token good?", and a definitive "no" answers the question.
#[derive(Debug, Clone)]
pub struct ValidateTokenResponse {
  pub valid: bool,
  pub user_id: Option<String>,
  pub email: Option<String>,
}

/// Use case for checking a token presented by a client or a peer service
pub struct ValidateTokenUseCase {
  auth_service: Arc<AuthService>,
}

impl ValidateTokenUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub fn execute(&self, token: &str) -> ValidateTokenResponse {
    match self.auth_service.validate_token(token) {
      Ok(claims) => ValidateTokenResponse {
        valid: true,
        user_id: Some(claims.user_id),
        email: Some(claims.email),
      },
      Err(e) => {
        debug!(error = %e, "token validation failed");
        ValidateTokenResponse {
          valid: false,
          user_id: None,
          email: None,
        }
      }
    }
  }
}
