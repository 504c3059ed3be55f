use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::entities::User;
use crate::domain::auth::errors::{AuthError, ValidationError};
use crate::domain::auth::ports::UserRepository;
use crate::domain::auth::value_objects::Email;

/// Command for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
  /// User's email address
  pub email: String,
  /// User's password (plain text, will be hashed)
  pub password: String,
  pub first_name: String,
  pub last_name: String,
}

/// Response after successful user registration
#[derive(Debug, Clone)]
pub struct RegisterUserResponse {
  /// Unique identifier of the newly created user
  pub user_id: Uuid,
  pub email: String,
  pub first_name: String,
  pub last_name: String,
  pub created_at: DateTime<Utc>,
}

/// Use case for registering a new user
pub struct RegisterUserUseCase {
  user_repo: Arc<dyn UserRepository>,
}

impl RegisterUserUseCase {
  pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
    Self { user_repo }
  }

  /// Executes the user registration use case
  ///
  /// # Errors
  /// Returns `AuthError` if registration fails (e.g., email already exists,
  /// validation errors)
  pub async fn execute(
    &self,
    command: RegisterUserCommand,
  ) -> Result<RegisterUserResponse, AuthError> {
    for (value, field) in [
      (&command.email, "email"),
      (&command.password, "password"),
      (&command.first_name, "first_name"),
      (&command.last_name, "last_name"),
    ] {
      if value.trim().is_empty() {
        return Err(
          ValidationError::MissingField {
            field: field.to_string(),
          }
          .into(),
        );
      }
    }

    // Uniqueness is checked against the normalized address, the same form
    // the entity stores.
    let email = Email::new(command.email)?;
    if self.user_repo.exists_by_email(email.as_str()).await? {
      return Err(AuthError::EmailAlreadyExists);
    }

    let mut user = User::new(
      email.into_inner(),
      command.password,
      command.first_name,
      command.last_name,
    )?;
    user.hash_password()?;

    self.user_repo.create(&user).await?;

    Ok(RegisterUserResponse {
      user_id: user.id,
      email: user.email_str().to_string(),
      first_name: user.first_name,
      last_name: user.last_name,
      created_at: user.created_at,
    })
  }
}
