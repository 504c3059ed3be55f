use thiserror::Error;

/// Main authentication error type
#[derive(Debug, Error)]
pub enum AuthError {
  /// Returned for unknown email and wrong password alike so callers cannot
  /// probe which accounts exist.
  #[error("invalid credentials")]
  InvalidCredentials,

  #[error("user with this email already exists")]
  EmailAlreadyExists,

  #[error("user not found")]
  UserNotFound,

  #[error("account is inactive")]
  AccountInactive,

  #[error("account is temporarily locked due to failed login attempts")]
  AccountLocked,

  #[error("failed to update user login information")]
  LoginUpdateFailed,

  #[error("failed to create authentication token")]
  TokenCreationFailed,

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),

  #[error("Hash error: {0}")]
  Hash(#[from] HashError),

  #[error("Token error: {0}")]
  Token(#[from] TokenError),

  #[error("Validation error: {0}")]
  Validation(#[from] ValidationError),
}

/// Repository-related errors
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("Database connection failed: {0}")]
  ConnectionFailed(String),

  #[error("Query execution failed: {0}")]
  QueryFailed(String),

  #[error("Record not found")]
  NotFound,

  #[error("Duplicate key violation: {0}")]
  DuplicateKey(String),

  #[error("Database error: {0}")]
  DatabaseError(String),
}

/// Password hashing and verification errors
#[derive(Debug, Error)]
pub enum HashError {
  #[error("Failed to hash password: {0}")]
  HashingFailed(String),

  #[error("Failed to verify password: {0}")]
  VerificationFailed(String),

  #[error("password is not set")]
  NoPasswordSet,
}

/// Token creation and validation errors
#[derive(Debug, Error)]
pub enum TokenError {
  #[error("token cannot be empty")]
  EmptyToken,

  #[error("subject id cannot be empty")]
  EmptySubject,

  #[error("email cannot be empty")]
  EmptyEmail,

  #[error("token has expired")]
  Expired,

  #[error("token signature is invalid")]
  BadSignature,

  #[error("unexpected signing algorithm")]
  UnexpectedAlgorithm,

  #[error("malformed token: {0}")]
  Malformed(String),

  #[error("failed to sign token: {0}")]
  SigningFailed(String),
}

/// Input validation errors
///
/// Email and password rules are evaluated in a fixed order, so the variant
/// returned for a given input is deterministic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
  #[error("email cannot be empty")]
  EmailEmpty,

  #[error("email address is too long (maximum {max} characters)")]
  EmailTooLong { max: usize },

  #[error("invalid email format")]
  EmailInvalidFormat,

  #[error("email cannot contain consecutive dots")]
  EmailConsecutiveDots,

  #[error("email local part cannot start or end with a dot")]
  EmailLocalDotPlacement,

  #[error("email local part must be between 1 and 64 characters")]
  EmailLocalPartLength,

  #[error("email domain part must be between 1 and 253 characters")]
  EmailDomainPartLength,

  #[error("password cannot be empty")]
  PasswordEmpty,

  #[error("password must be at least {min} characters long")]
  PasswordTooShort { min: usize },

  #[error("password is too long (maximum {max} characters)")]
  PasswordTooLong { max: usize },

  #[error("password must contain at least one uppercase letter")]
  PasswordMissingUppercase,

  #[error("password must contain at least one lowercase letter")]
  PasswordMissingLowercase,

  #[error("password must contain at least one digit")]
  PasswordMissingDigit,

  #[error("password must contain at least one special character")]
  PasswordMissingSpecial,

  #[error("password contains a common weak pattern")]
  PasswordWeakPattern,

  #[error("password cannot be a simple sequence")]
  PasswordSequential,

  #[error("Missing required field: {field}")]
  MissingField { field: String },
}

// Automatic conversions from external error types

impl From<sqlx::Error> for RepositoryError {
  fn from(error: sqlx::Error) -> Self {
    match error {
      sqlx::Error::RowNotFound => RepositoryError::NotFound,
      sqlx::Error::Database(db_err) => {
        if db_err.is_unique_violation() {
          RepositoryError::DuplicateKey(db_err.message().to_string())
        } else {
          RepositoryError::DatabaseError(db_err.message().to_string())
        }
      }
      sqlx::Error::PoolTimedOut => RepositoryError::ConnectionFailed("Pool timed out".to_string()),
      sqlx::Error::PoolClosed => RepositoryError::ConnectionFailed("Pool closed".to_string()),
      _ => RepositoryError::QueryFailed(error.to_string()),
    }
  }
}

impl From<sqlx::Error> for AuthError {
  fn from(error: sqlx::Error) -> Self {
    AuthError::Repository(RepositoryError::from(error))
  }
}

impl From<bcrypt::BcryptError> for HashError {
  fn from(error: bcrypt::BcryptError) -> Self {
    HashError::HashingFailed(error.to_string())
  }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
  fn from(error: jsonwebtoken::errors::Error) -> Self {
    use jsonwebtoken::errors::ErrorKind;

    match error.kind() {
      ErrorKind::ExpiredSignature => TokenError::Expired,
      ErrorKind::InvalidSignature => TokenError::BadSignature,
      ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
        TokenError::UnexpectedAlgorithm
      }
      _ => TokenError::Malformed(error.to_string()),
    }
  }
}
