use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request for user registration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
  /// User's email address
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  /// User's password
  #[validate(length(
    min = 8,
    max = 72,
    message = "Password must be between 8 and 72 characters"
  ))]
  pub password: String,

  #[validate(length(
    min = 1,
    max = 100,
    message = "First name must be between 1 and 100 characters"
  ))]
  pub first_name: String,

  #[validate(length(
    min = 1,
    max = 100,
    message = "Last name must be between 1 and 100 characters"
  ))]
  pub last_name: String,
}

/// Request for user login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
  /// User's email address
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  /// User's password
  #[validate(length(min = 1, message = "Password is required"))]
  pub password: String,
}

/// Request for validating a token presented by a client or peer service
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ValidateTokenRequest {
  #[validate(length(min = 1, message = "Token is required"))]
  pub token: String,
}

/// Response after successful user registration
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
  /// Unique identifier of the newly created user
  pub user_id: Uuid,

  pub email: String,
  pub first_name: String,
  pub last_name: String,

  /// Timestamp when the account was created
  pub created_at: DateTime<Utc>,
}

/// Response after successful user login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
  /// Unique identifier of the user
  pub user_id: Uuid,

  pub email: String,
  pub first_name: String,
  pub last_name: String,
  pub email_verified: bool,

  /// Signed token for authentication
  pub token: String,
}

/// Response describing whether a presented token is valid
#[derive(Debug, Clone, Serialize)]
pub struct ValidateTokenResponse {
  pub valid: bool,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub user_id: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub email: Option<String>,
}

/// Response containing the authenticated user's profile
#[derive(Debug, Clone, Serialize)]
pub struct UserProfileResponse {
  /// Unique identifier of the user
  pub user_id: Uuid,

  pub email: String,
  pub first_name: String,
  pub last_name: String,
  pub is_active: bool,
  pub email_verified: bool,

  /// Timestamp when the user account was created
  pub created_at: DateTime<Utc>,

  /// Timestamp of user's last login
  #[serde(skip_serializing_if = "Option::is_none")]
  pub last_login_at: Option<DateTime<Utc>>,
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,

  /// Optional detailed error information
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use validator::Validate;

  fn register_request() -> RegisterRequest {
    RegisterRequest {
      email: "test@example.com".to_string(),
      password: "SecureP@ss123".to_string(),
      first_name: "Test".to_string(),
      last_name: "User".to_string(),
    }
  }

  #[test]
  fn test_register_request_validation_valid() {
    assert!(register_request().validate().is_ok());
  }

  #[test]
  fn test_register_request_validation_invalid_email() {
    let mut request = register_request();
    request.email = "invalid-email".to_string();

    assert!(request.validate().is_err());
  }

  #[test]
  fn test_register_request_validation_password_length() {
    let mut request = register_request();
    request.password = "short".to_string();
    assert!(request.validate().is_err());

    request.password = "P@1".repeat(25);
    assert!(request.validate().is_err());
  }

  #[test]
  fn test_login_request_validation_valid() {
    let request = LoginRequest {
      email: "test@example.com".to_string(),
      password: "password123".to_string(),
    };

    assert!(request.validate().is_ok());
  }

  #[test]
  fn test_validate_token_request_rejects_empty_token() {
    let request = ValidateTokenRequest {
      token: String::new(),
    };

    assert!(request.validate().is_err());
  }

  #[test]
  fn test_validate_token_response_omits_empty_fields() {
    let response = ValidateTokenResponse {
      valid: false,
      user_id: None,
      email: None,
    };

    let json = serde_json::to_string(&response).unwrap();
    assert_eq!(json, r#"{"valid":false}"#);
  }
}
