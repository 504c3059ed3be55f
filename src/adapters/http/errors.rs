use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::auth::errors::{AuthError, RepositoryError};

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ApiError {
  /// Validation error (400 Bad Request)
  Validation(String),

  /// Authentication error (401/403/409/423)
  Auth(AuthErrorKind),

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

/// Authentication error kinds
#[derive(Debug, Serialize)]
pub enum AuthErrorKind {
  /// Invalid credentials (401)
  InvalidCredentials,

  /// Invalid, expired, or missing token (401)
  InvalidToken,

  /// Account locked after repeated failures (423)
  AccountLocked,

  /// Account deactivated (403)
  AccountInactive,

  /// Email already exists (409)
  EmailAlreadyExists,

  /// User not found (404)
  UserNotFound,
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::Auth(kind) => write!(f, "Authentication error: {:?}", kind),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Auth(kind) => match kind {
        AuthErrorKind::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthErrorKind::InvalidToken => StatusCode::UNAUTHORIZED,
        AuthErrorKind::AccountLocked => StatusCode::LOCKED,
        AuthErrorKind::AccountInactive => StatusCode::FORBIDDEN,
        AuthErrorKind::EmailAlreadyExists => StatusCode::CONFLICT,
        AuthErrorKind::UserNotFound => StatusCode::NOT_FOUND,
      },
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message, details) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone(), None),
      ApiError::Auth(kind) => {
        let (err_type, msg) = match kind {
          AuthErrorKind::InvalidCredentials => (
            "invalid_credentials",
            "Invalid email or password".to_string(),
          ),
          AuthErrorKind::InvalidToken => (
            "invalid_token",
            "Invalid or missing authorization token".to_string(),
          ),
          AuthErrorKind::AccountLocked => (
            "account_locked",
            "Account is temporarily locked due to failed login attempts".to_string(),
          ),
          AuthErrorKind::AccountInactive => {
            ("account_inactive", "Account is inactive".to_string())
          }
          AuthErrorKind::EmailAlreadyExists => (
            "email_already_exists",
            "An account with this email already exists".to_string(),
          ),
          AuthErrorKind::UserNotFound => ("user_not_found", "User not found".to_string()),
        };
        (err_type, msg, None)
      }
      ApiError::Internal(msg) => {
        // Don't expose internal error details in production
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
          None,
        )
      }
    };

    let error_response = ErrorResponse {
      error: error_type.to_string(),
      message,
      details,
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(error_response)
  }
}

/// Convert AuthError to ApiError
impl From<AuthError> for ApiError {
  fn from(error: AuthError) -> Self {
    match error {
      AuthError::InvalidCredentials => ApiError::Auth(AuthErrorKind::InvalidCredentials),
      AuthError::EmailAlreadyExists => ApiError::Auth(AuthErrorKind::EmailAlreadyExists),
      AuthError::UserNotFound => ApiError::Auth(AuthErrorKind::UserNotFound),
      AuthError::AccountInactive => ApiError::Auth(AuthErrorKind::AccountInactive),
      AuthError::AccountLocked => ApiError::Auth(AuthErrorKind::AccountLocked),
      AuthError::Token(_) => ApiError::Auth(AuthErrorKind::InvalidToken),
      AuthError::Validation(err) => ApiError::Validation(err.to_string()),
      AuthError::Repository(err) => match err {
        RepositoryError::NotFound => ApiError::Auth(AuthErrorKind::UserNotFound),
        RepositoryError::DuplicateKey(_) => ApiError::Auth(AuthErrorKind::EmailAlreadyExists),
        _ => ApiError::Internal(err.to_string()),
      },
      AuthError::Hash(err) => ApiError::Internal(err.to_string()),
      e @ (AuthError::LoginUpdateFailed | AuthError::TokenCreationFailed) => {
        ApiError::Internal(e.to_string())
      }
    }
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();

    ApiError::Validation(messages.join(", "))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::errors::{TokenError, ValidationError};

  #[test]
  fn test_api_error_status_codes() {
    assert_eq!(
      ApiError::Validation("test".to_string()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::Auth(AuthErrorKind::InvalidCredentials).status_code(),
      StatusCode::UNAUTHORIZED
    );
    assert_eq!(
      ApiError::Auth(AuthErrorKind::AccountLocked).status_code(),
      StatusCode::LOCKED
    );
    assert_eq!(
      ApiError::Auth(AuthErrorKind::EmailAlreadyExists).status_code(),
      StatusCode::CONFLICT
    );
    assert_eq!(
      ApiError::Internal("test".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn test_auth_error_conversion() {
    let api_error: ApiError = AuthError::InvalidCredentials.into();
    assert_eq!(api_error.status_code(), StatusCode::UNAUTHORIZED);

    let api_error: ApiError = AuthError::EmailAlreadyExists.into();
    assert_eq!(api_error.status_code(), StatusCode::CONFLICT);

    let api_error: ApiError = AuthError::Token(TokenError::Expired).into();
    assert_eq!(api_error.status_code(), StatusCode::UNAUTHORIZED);

    let api_error: ApiError = AuthError::Validation(ValidationError::EmailEmpty).into();
    assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);

    let api_error: ApiError = AuthError::LoginUpdateFailed.into();
    assert_eq!(api_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
  }
}
