use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::UserRepository;

/// Response carrying a user's profile fields
#[derive(Debug, Clone)]
pub struct UserProfileResponse {
  pub user_id: Uuid,
  pub email: String,
  pub first_name: String,
  pub last_name: String,
  pub is_active: bool,
  pub email_verified: bool,
  pub created_at: DateTime<Utc>,
  pub last_login_at: Option<DateTime<Utc>>,
}

/// Use case for fetching the profile of an authenticated user
pub struct GetUserProfileUseCase {
  user_repo: Arc<dyn UserRepository>,
}

impl GetUserProfileUseCase {
  pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
    Self { user_repo }
  }

  pub async fn execute(&self, user_id: Uuid) -> Result<UserProfileResponse, AuthError> {
    let user = self
      .user_repo
      .find_by_id(user_id)
      .await?
      .ok_or(AuthError::UserNotFound)?;

    Ok(UserProfileResponse {
      user_id: user.id,
      email: user.email_str().to_string(),
      first_name: user.first_name,
      last_name: user.last_name,
      is_active: user.is_active,
      email_verified: user.email_verified,
      created_at: user.created_at,
      last_login_at: user.last_login_at,
    })
  }
}
